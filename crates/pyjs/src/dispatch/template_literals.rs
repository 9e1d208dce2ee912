//! f-strings as template literals.

use super::Dispatcher;
use crate::error::{Result, TranspileError};
use crate::tables::names;
use crate::tree::Expression;
use pyjs_syntax::FStringPart;

/// Escape literal text for a template literal body. Line breaks are
/// escaped so statement indentation cannot leak into the string.
fn escape_template(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

impl Dispatcher<'_> {
    pub(super) fn joined_str(&self, parts: &[FStringPart]) -> Result<Expression> {
        Ok(Expression::from("`")
            .append(self.template_body(parts)?)
            .text("`"))
    }

    fn template_body(&self, parts: &[FStringPart]) -> Result<Expression> {
        let mut body = Expression::new();
        for part in parts {
            match part {
                FStringPart::Literal(text) => body.push_text(escape_template(text)),
                FStringPart::Replacement {
                    value,
                    conversion,
                    format_spec,
                } => {
                    let mut value = self.expression(value)?;
                    match conversion {
                        None => {}
                        Some('s') => value = Expression::from("String(").append(value).text(")"),
                        Some(other) => {
                            return Err(TranspileError::compilation(format!(
                                "f-string conversion `!{other}` is not supported"
                            )));
                        }
                    }

                    // the format spec is itself a template so nested fields work
                    let field = match format_spec {
                        None => value,
                        Some(spec) => Expression::from(names::resolve("format"))
                            .text("(")
                            .append(value)
                            .text(", `")
                            .append(self.template_body(spec)?)
                            .text("`)"),
                    };
                    body = body.text("${").append(field).text("}");
                }
            }
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::escape_template;
    use crate::tests::{expr, expr_err};

    #[test]
    fn test_escaping() {
        assert_eq!(escape_template("a`b"), "a\\`b");
        assert_eq!(escape_template("${x} $y"), "\\${x} $y");
        assert_eq!(escape_template("c:\\dir\n"), "c:\\\\dir\\n");
    }

    #[test]
    fn test_plain_fields() {
        assert_eq!(expr("f'hello {name}!'"), "`hello ${name}!`");
        assert_eq!(expr("f'{{literal}} {x + 1}'"), "`{literal} ${x + 1}`");
    }

    #[test]
    fn test_format_spec() {
        assert_eq!(
            expr("f'{value:.2f}'"),
            "`${unholy_js.py__format(value, `.2f`)}`"
        );
        assert_eq!(
            expr("f'{value:>{width}}'"),
            "`${unholy_js.py__format(value, `>${width}`)}`"
        );
    }

    #[test]
    fn test_conversions() {
        assert_eq!(expr("f'{x!s}'"), "`${String(x)}`");
        assert!(expr_err("f'{x!r}'").contains("!r"));
        assert!(expr_err("f'{x=}'").contains("!r"));
    }
}
