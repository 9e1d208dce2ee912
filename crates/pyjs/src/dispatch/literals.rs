//! Constants and container literals.

use super::Dispatcher;
use crate::error::{Result, TranspileError};
use crate::tree::Expression;
use pyjs_syntax::{Constant, Expr};

/// Python integer spelling to JavaScript. Radix prefixes are valid in
/// both languages; `00` is not valid JavaScript.
fn integer_literal(text: &str) -> String {
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    let has_radix = digits.len() > 1
        && digits.starts_with('0')
        && digits[1..].starts_with(['x', 'X', 'o', 'O', 'b', 'B']);
    if !has_radix && digits.chars().all(|c| c == '0') {
        return "0".into();
    }
    digits
}

impl Dispatcher<'_> {
    pub(super) fn constant(&self, constant: &Constant) -> Result<Expression> {
        match constant {
            Constant::None => Ok("null".into()),
            Constant::Bool(true) => Ok("true".into()),
            Constant::Bool(false) => Ok("false".into()),
            Constant::Int(text) => Ok(integer_literal(text).into()),
            Constant::Float(text) => Ok(text.replace('_', "").into()),
            Constant::Str(value) => {
                let quoted = serde_json::to_string(value).map_err(|err| {
                    TranspileError::compilation(format!("cannot encode string literal: {err}"))
                })?;
                Ok(quoted.into())
            }
            Constant::Complex(text) => Err(TranspileError::compilation(format!(
                "complex literal `{text}` has no JavaScript equivalent"
            ))),
            Constant::Bytes(text) => Err(TranspileError::compilation(format!(
                "bytes literal {text} is not supported"
            ))),
            Constant::Ellipsis => Err(TranspileError::compilation("Ellipsis is not supported")),
        }
    }

    fn elements(&self, container: &str, items: &[Expr]) -> Result<Expression> {
        let lowered = items
            .iter()
            .map(|item| match item {
                Expr::Starred(_) => Err(TranspileError::compilation(format!(
                    "starred element in {container} is not supported"
                ))),
                other => self.expression(other),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Expression::join(lowered, ", "))
    }

    pub(super) fn list(&self, items: &[Expr]) -> Result<Expression> {
        Ok(Expression::from("[")
            .append(self.elements("list literal", items)?)
            .text("]"))
    }

    /// Tuples are frozen arrays.
    pub(super) fn tuple(&self, items: &[Expr]) -> Result<Expression> {
        Ok(Expression::from("Object.freeze([")
            .append(self.elements("tuple literal", items)?)
            .text("])"))
    }

    pub(super) fn set(&self, items: &[Expr]) -> Result<Expression> {
        Ok(Expression::from("new Set([")
            .append(self.elements("set literal", items)?)
            .text("])"))
    }

    pub(super) fn dict(&self, keys: &[Option<Expr>], values: &[Expr]) -> Result<Expression> {
        let mut entries = Vec::with_capacity(keys.len());
        for (key, value) in keys.iter().zip(values) {
            let key = key.as_ref().ok_or_else(|| {
                TranspileError::compilation("dict unpacking (`**`) is not supported")
            })?;
            entries.push(
                Expression::from("[")
                    .append(self.expression(key)?)
                    .text("]: ")
                    .append(self.expression(value)?),
            );
        }
        Ok(Expression::from("{")
            .append(Expression::join(entries, ", "))
            .text("}"))
    }
}

#[cfg(test)]
mod tests {
    use super::integer_literal;
    use crate::tests::{expr, expr_err};

    #[test]
    fn test_integer_spelling() {
        assert_eq!(integer_literal("1_000_000"), "1000000");
        assert_eq!(integer_literal("0xFF"), "0xFF");
        assert_eq!(integer_literal("0b1010"), "0b1010");
        assert_eq!(integer_literal("0o17"), "0o17");
        assert_eq!(integer_literal("000"), "0");
    }

    #[test]
    fn test_scalar_constants() {
        assert_eq!(expr("None"), "null");
        assert_eq!(expr("True"), "true");
        assert_eq!(expr("1_0.5"), "10.5");
        assert_eq!(expr("'it\\'s \"fine\"'"), r#""it's \"fine\"""#);
    }

    #[test]
    fn test_rejected_constants() {
        assert!(expr_err("2j").contains("complex"));
        assert!(expr_err("b'abc'").contains("bytes"));
        assert!(expr_err("...").contains("Ellipsis"));
    }

    #[test]
    fn test_containers() {
        assert_eq!(expr("[1, 2, 3]"), "[1, 2, 3]");
        assert_eq!(expr("{1, 2}"), "new Set([1, 2])");
        assert_eq!(expr("(1, 'a')"), "Object.freeze([1, \"a\"])");
        assert_eq!(expr("()"), "Object.freeze([])");
        assert_eq!(expr("{'a': 1, k: [2]}"), "{[\"a\"]: 1, [k]: [2]}");
        assert_eq!(expr("{}"), "{}");
    }

    #[test]
    fn test_container_unpacking_is_rejected() {
        assert!(expr_err("[*xs]").contains("starred"));
        assert!(expr_err("{**base}").contains("unpacking"));
    }
}
