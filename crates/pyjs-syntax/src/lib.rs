//! Python syntax for the pyjs translator.
//!
//! `pyjs-syntax` parses Python source with tree-sitter and produces a typed,
//! closed syntax tree ([`Module`]). The tree mirrors Python's own `ast`
//! module closely enough that translation rules can be stated per node kind.
//!
//! # Example
//!
//! ```ignore
//! use pyjs_syntax::{input::read_python, StmtKind};
//!
//! let module = read_python("x = 1 + 2")?;
//! assert!(matches!(module.body[0].kind, StmtKind::Assign { .. }));
//! ```
//!
//! The reader performs no semantic validation. Constructs the translator
//! rejects are still represented here so it can name them in diagnostics.

pub mod ast;
pub mod error;
pub mod input;

pub use ast::{
    Alias, Arg, Arguments, BinaryOp, BoolOp, CmpOp, Constant, Expr, FStringPart, FunctionDef,
    Keyword, Module, Stmt, StmtKind, UnaryOp,
};
pub use error::ReadError;

#[cfg(feature = "read-python")]
pub use input::read_python;
