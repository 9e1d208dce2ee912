//! Names, attribute access, indexing and operators.

use super::Dispatcher;
use crate::error::{Result, TranspileError};
use crate::tables::{names, operators};
use crate::tree::Expression;
use pyjs_syntax::{BinaryOp, BoolOp, CmpOp, Constant, Expr, UnaryOp};

fn elided_reference(name: &str) -> TranspileError {
    TranspileError::compilation(format!(
        "`{name}` has no JavaScript equivalent outside of a call"
    ))
}

impl Dispatcher<'_> {
    pub(super) fn name(&self, id: &str) -> Result<Expression> {
        if self.shadowed.contains(id) {
            return Ok(id.into());
        }
        match names::lookup(id) {
            Some("") => Err(elided_reference(id)),
            Some(target) => Ok(target.into()),
            None => Ok(id.into()),
        }
    }

    /// `expr` is the whole attribute node, so dotted table entries such as
    /// `asyncio.create_task` match before the chain is split.
    pub(super) fn attribute(&self, expr: &Expr, value: &Expr, attr: &str) -> Result<Expression> {
        match self.builtin(expr) {
            Some("") => {
                let path = names::dotted_path(expr).unwrap_or_else(|| attr.to_string());
                return Err(elided_reference(&path));
            }
            Some(target) => return Ok(target.into()),
            None => {}
        }
        let base = self.operand(value)?;
        // `1.real` would lex as a number
        let base = if matches!(value, Expr::Constant(Constant::Int(_))) {
            base.parenthesized()
        } else {
            base
        };
        Ok(base.text(".").text(attr))
    }

    pub(super) fn subscript(&self, value: &Expr, slice: &Expr) -> Result<Expression> {
        match slice {
            Expr::Name(_) | Expr::Constant(_) => {}
            Expr::Slice { .. } => {
                return Err(TranspileError::compilation("slicing is not supported"));
            }
            Expr::Tuple(_) => {
                return Err(TranspileError::compilation(
                    "multi-dimensional subscripts are not supported",
                ));
            }
            other => {
                return Err(TranspileError::compilation(format!(
                    "only names and constants can be used as subscripts, got {}",
                    other.kind_name()
                )));
            }
        }
        Ok(self
            .operand(value)?
            .text("[")
            .append(self.expression(slice)?)
            .text("]"))
    }

    pub(super) fn binary(&self, left: &Expr, op: BinaryOp, right: &Expr) -> Result<Expression> {
        let lower = operators::binary(op).ok_or_else(|| {
            TranspileError::compilation(format!(
                "operator `{}` has no JavaScript equivalent",
                op.symbol()
            ))
        })?;
        Ok(lower(self.operand(left)?, self.operand(right)?))
    }

    pub(super) fn unary(&self, op: UnaryOp, operand: &Expr) -> Result<Expression> {
        let lower = operators::unary(op).ok_or_else(|| {
            TranspileError::compilation(format!("unary operator {op:?} has no lowering"))
        })?;
        Ok(lower(self.operand(operand)?))
    }

    pub(super) fn boolean(&self, op: BoolOp, values: &[Expr]) -> Result<Expression> {
        let lower = operators::boolean(op).ok_or_else(|| {
            TranspileError::compilation(format!("boolean operator {op:?} has no lowering"))
        })?;

        let mut operands = values.iter();
        let first = operands
            .next()
            .ok_or_else(|| TranspileError::compilation("boolean operation without operands"))?;
        let mut lowered = self.operand(first)?;
        for value in operands {
            lowered = lower(lowered, self.operand(value)?);
        }
        Ok(lowered)
    }

    /// `a < b < c` becomes `(a < b) && (b < c)`; `b` is evaluated twice.
    pub(super) fn compare(
        &self,
        left: &Expr,
        ops: &[CmpOp],
        comparators: &[Expr],
    ) -> Result<Expression> {
        let chained = ops.len() > 1;
        let mut pairs = Vec::with_capacity(ops.len());
        let mut lhs = left;

        for (op, rhs) in ops.iter().zip(comparators) {
            let lower = operators::comparison(*op).ok_or_else(|| {
                TranspileError::compilation(format!("comparison {op:?} has no lowering"))
            })?;
            let pair = lower(self.operand(lhs)?, self.operand(rhs)?);
            pairs.push(if chained { pair.parenthesized() } else { pair });
            lhs = rhs;
        }

        if pairs.is_empty() {
            return Err(TranspileError::compilation("comparison without operators"));
        }
        Ok(Expression::join(pairs, " && "))
    }

    pub(super) fn conditional(&self, test: &Expr, body: &Expr, orelse: &Expr) -> Result<Expression> {
        Ok(Expression::from("(")
            .append(self.operand(test)?)
            .text(" ? ")
            .append(self.operand(body)?)
            .text(" : ")
            .append(self.operand(orelse)?)
            .text(")"))
    }

    pub(super) fn named(&self, target: &str, value: &Expr) -> Result<Expression> {
        Ok(Expression::from("(")
            .append(self.name(target)?)
            .text(" = ")
            .append(self.expression(value)?)
            .text(")"))
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::{expr, expr_err};

    #[test]
    fn test_builtin_rename() {
        assert_eq!(expr("print"), "console.log");
        assert_eq!(expr("len(xs)"), "unholy_js.py__len(xs)");
    }

    #[test]
    fn test_attribute_chain() {
        assert_eq!(expr("a.b.c"), "a.b.c");
        assert_eq!(expr("(a + b).real"), "(a + b).real");
    }

    #[test]
    fn test_integer_attribute_base() {
        assert_eq!(expr("1 .real"), "(1).real");
        assert_eq!(expr("(255).bit_length()"), "(255).bit_length()");
        assert_eq!(expr("1.5.real"), "1.5.real");
    }

    #[test]
    fn test_elided_name_outside_call() {
        let err = expr_err("asyncio.create_task");
        assert!(err.contains("asyncio.create_task"), "{err}");
    }

    #[test]
    fn test_subscripts() {
        assert_eq!(expr("d[key]"), "d[key]");
        assert_eq!(expr("d['key']"), "d[\"key\"]");
        assert!(expr_err("xs[1:2]").contains("slicing"));
        assert!(expr_err("m[1, 2]").contains("multi-dimensional"));
        assert!(expr_err("xs[-1]").contains("unary operation"));
    }

    #[test]
    fn test_operator_precedence_is_preserved() {
        assert_eq!(expr("(a + b) * c"), "(a + b) * c");
        assert_eq!(expr("a + b * c"), "a + (b * c)");
        assert_eq!(expr("-x ** 2"), "-(x ** 2)");
        assert_eq!(expr("a // b"), "Math.floor(a / b)");
    }

    #[test]
    fn test_matmul_is_rejected() {
        assert!(expr_err("a @ b").contains("`@`"));
    }

    #[test]
    fn test_boolean_operators() {
        assert_eq!(expr("a and b and c"), "a && b && c");
        assert_eq!(expr("a or b and c"), "a || (b && c)");
        assert_eq!(expr("not a"), "!a");
        assert_eq!(expr("not (a or b)"), "!(a || b)");
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(expr("a == b"), "a === b");
        assert_eq!(expr("x is not None"), "x !== null");
        assert_eq!(expr("k in d"), "unholy_js.py__contains(d, k)");
    }

    #[test]
    fn test_chained_comparison() {
        assert_eq!(expr("a < b < c"), "(a < b) && (b < c)");
        assert_eq!(expr("0 <= i < n + 1"), "(0 <= i) && (i < (n + 1))");
    }

    #[test]
    fn test_conditional_and_walrus() {
        assert_eq!(expr("a if c else b"), "(c ? a : b)");
        assert_eq!(expr("(n := len(xs))"), "(n = unholy_js.py__len(xs))");
    }

    #[test]
    fn test_nested_conditionals_parenthesize_once() {
        assert_eq!(expr("a if b else c if d else e"), "(b ? a : (d ? c : e))");
        assert_eq!(expr("x + (y if c else z)"), "x + (c ? y : z)");
        assert_eq!(expr("f((n := 1))"), "f((n = 1))");
    }

    #[test]
    fn test_await() {
        assert_eq!(expr("await fetch(url)"), "await fetch(url)");
    }
}
