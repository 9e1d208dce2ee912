//! Operator lowering.
//!
//! Each entry receives already-dispatched operands (parenthesized where
//! needed by the caller) and builds the JavaScript expression. A missing
//! entry means the operator has no lowering.

use crate::tree::Expression;
use pyjs_syntax::{BinaryOp, BoolOp, CmpOp, UnaryOp};

pub type BinaryLowering = fn(Expression, Expression) -> Expression;
pub type UnaryLowering = fn(Expression) -> Expression;

macro_rules! infix {
    ($($name:ident => $symbol:literal),* $(,)?) => {
        $(
            fn $name(left: Expression, right: Expression) -> Expression {
                left.text(concat!(" ", $symbol, " ")).append(right)
            }
        )*
    };
}

macro_rules! prefix {
    ($($name:ident => $symbol:literal),* $(,)?) => {
        $(
            fn $name(operand: Expression) -> Expression {
                Expression::from($symbol).append(operand)
            }
        )*
    };
}

infix! {
    add => "+",
    sub => "-",
    mul => "*",
    div => "/",
    rem => "%",
    pow => "**",
    shl => "<<",
    shr => ">>",
    bit_or => "|",
    bit_xor => "^",
    bit_and => "&",
    strict_eq => "===",
    strict_ne => "!==",
    lt => "<",
    le => "<=",
    gt => ">",
    ge => ">=",
    and => "&&",
    or => "||",
}

prefix! {
    neg => "-",
    plus => "+",
    not => "!",
    invert => "~",
}

fn floor_div(left: Expression, right: Expression) -> Expression {
    Expression::from("Math.floor(")
        .append(left)
        .text(" / ")
        .append(right)
        .text(")")
}

fn contains(left: Expression, right: Expression) -> Expression {
    Expression::from("unholy_js.py__contains(")
        .append(right)
        .text(", ")
        .append(left)
        .text(")")
}

fn not_contains(left: Expression, right: Expression) -> Expression {
    not(contains(left, right))
}

pub fn binary(op: BinaryOp) -> Option<BinaryLowering> {
    let lowering: BinaryLowering = match op {
        BinaryOp::Add => add,
        BinaryOp::Sub => sub,
        BinaryOp::Mult => mul,
        BinaryOp::Div => div,
        BinaryOp::Mod => rem,
        BinaryOp::Pow => pow,
        BinaryOp::LShift => shl,
        BinaryOp::RShift => shr,
        BinaryOp::BitOr => bit_or,
        BinaryOp::BitXor => bit_xor,
        BinaryOp::BitAnd => bit_and,
        BinaryOp::FloorDiv => floor_div,
        BinaryOp::MatMult => return None,
    };
    Some(lowering)
}

pub fn unary(op: UnaryOp) -> Option<UnaryLowering> {
    let lowering: UnaryLowering = match op {
        UnaryOp::USub => neg,
        UnaryOp::UAdd => plus,
        UnaryOp::Not => not,
        UnaryOp::Invert => invert,
    };
    Some(lowering)
}

pub fn comparison(op: CmpOp) -> Option<BinaryLowering> {
    let lowering: BinaryLowering = match op {
        CmpOp::Eq | CmpOp::Is => strict_eq,
        CmpOp::NotEq | CmpOp::IsNot => strict_ne,
        CmpOp::Lt => lt,
        CmpOp::LtE => le,
        CmpOp::Gt => gt,
        CmpOp::GtE => ge,
        CmpOp::In => contains,
        CmpOp::NotIn => not_contains,
    };
    Some(lowering)
}

pub fn boolean(op: BoolOp) -> Option<BinaryLowering> {
    let lowering: BinaryLowering = match op {
        BoolOp::And => and,
        BoolOp::Or => or,
    };
    Some(lowering)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Fragment, Renderer};

    fn show(expr: Expression) -> String {
        Renderer::default().render(&Fragment::Expression(expr), 0)
    }

    #[test]
    fn test_infix_spacing() {
        let lower = binary(BinaryOp::Pow).unwrap();
        assert_eq!(show(lower("a".into(), "b".into())), "a ** b");
    }

    #[test]
    fn test_floor_division() {
        let lower = binary(BinaryOp::FloorDiv).unwrap();
        assert_eq!(show(lower("7".into(), "2".into())), "Math.floor(7 / 2)");
    }

    #[test]
    fn test_matmul_has_no_lowering() {
        assert!(binary(BinaryOp::MatMult).is_none());
    }

    #[test]
    fn test_identity_comparisons_are_strict() {
        let is = comparison(CmpOp::Is).unwrap();
        let eq = comparison(CmpOp::Eq).unwrap();
        assert_eq!(show(is("x".into(), "null".into())), "x === null");
        assert_eq!(show(eq("x".into(), "1".into())), "x === 1");
    }

    #[test]
    fn test_membership_swaps_operands() {
        let not_in = comparison(CmpOp::NotIn).unwrap();
        assert_eq!(
            show(not_in("k".into(), "d".into())),
            "!unholy_js.py__contains(d, k)"
        );
    }

    #[test]
    fn test_unary() {
        assert_eq!(show(unary(UnaryOp::Not).unwrap()("x".into())), "!x");
        assert_eq!(show(unary(UnaryOp::USub).unwrap()("x".into())), "-x");
    }
}
