//! Static lowering tables for names and operators.

pub mod names;
pub mod operators;
