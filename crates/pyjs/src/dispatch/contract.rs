//! Output shape checks, enabled by `TranspileOptions::contract_checks`.
//!
//! Expression handlers return exactly one `Expression` by type; what is
//! left to check at runtime is emptiness and what ends up inside blocks.

use crate::error::{Result, TranspileError};
use crate::tree::{Block, Expression, Fragment};

fn violation(handler: &'static str, detail: impl Into<String>) -> TranspileError {
    TranspileError::Contract {
        handler,
        detail: detail.into(),
    }
}

pub(super) fn check_expression(handler: &'static str, expr: &Expression) -> Result<()> {
    if expr.is_empty() {
        return Err(violation(handler, "produced an empty expression"));
    }
    Ok(())
}

/// Statement handlers may only yield statements and blocks, recursively.
pub(super) fn check_statements(handler: &'static str, fragments: &[Fragment]) -> Result<()> {
    for fragment in fragments {
        match fragment {
            Fragment::Expression(_) => {
                return Err(violation(
                    handler,
                    "produced a bare expression where a statement was expected",
                ));
            }
            Fragment::Statement(stmt) if stmt.body().is_empty() => {
                return Err(violation(handler, "produced an empty statement"));
            }
            Fragment::Statement(_) => {}
            Fragment::Block(block) => check_block(handler, block)?,
        }
    }
    Ok(())
}

fn check_block(handler: &'static str, block: &Block) -> Result<()> {
    check_statements(handler, block.children())
}
