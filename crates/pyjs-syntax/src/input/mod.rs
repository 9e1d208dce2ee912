//! Readers that parse source code into the syntax tree.

#[cfg(feature = "read-python")]
mod python;
#[cfg(feature = "read-python")]
pub use python::read_python;

pub mod strings;
