//! Fragment tree to text.
//!
//! Layout is decided here and nowhere else. Handlers build fragments
//! without knowing their final indentation; the renderer threads a line
//! accumulator through each block so a child can see the lines its
//! earlier siblings produced (for `force_concat` and brace attachment).

use super::fragment::{Block, Expression, Fragment, Piece, Statement};

/// Renders fragments with a fixed indentation unit.
#[derive(Debug, Clone)]
pub struct Renderer {
    unit: String,
    increment: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(4, 1)
    }
}

impl Renderer {
    /// `indent_width` spaces per indentation unit, `increment` units per
    /// block level.
    pub fn new(indent_width: usize, increment: usize) -> Self {
        Self {
            unit: " ".repeat(indent_width),
            increment,
        }
    }

    /// Render a fragment at `ambient` indentation units.
    pub fn render(&self, fragment: &Fragment, ambient: usize) -> String {
        match fragment {
            Fragment::Expression(expr) => self.render_expression(expr),
            Fragment::Statement(stmt) => self.render_statement(stmt, ambient),
            Fragment::Block(block) => self.render_block(block, Vec::new(), ambient, 0).join("\n"),
        }
    }

    fn indent(&self, level: usize) -> String {
        self.unit.repeat(level)
    }

    fn render_expression(&self, expr: &Expression) -> String {
        let mut out = String::new();
        for piece in expr.pieces() {
            match piece {
                Piece::Text(text) => out.push_str(text),
                // nested layout is relative; the enclosing statement indents it
                Piece::Fragment(fragment) => out.push_str(&self.render(fragment, 0)),
            }
        }
        out
    }

    fn render_statement(&self, stmt: &Statement, level: usize) -> String {
        let mut text = self.render_expression(stmt.body());
        if stmt.is_terminated() {
            let kept = text.trim_end_matches(';').len();
            text.truncate(kept);
            text.push(';');
        }
        self.indent_lines(&text, level)
    }

    fn indent_lines(&self, text: &str, level: usize) -> String {
        let prefix = self.indent(level);
        text.split('\n')
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("{prefix}{line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Append `block` to `lines`. Lines before `siblings_from` belong to
    /// the parent and are never attached to.
    fn render_block(
        &self,
        block: &Block,
        mut lines: Vec<String>,
        level: usize,
        siblings_from: usize,
    ) -> Vec<String> {
        let child_level = if block.is_braced() {
            let attach = lines.len() > siblings_from
                && lines.last().is_some_and(|last| !last.trim_end().ends_with(';'));
            if attach && let Some(last) = lines.last_mut() {
                last.push_str(" {");
            } else {
                lines.push(format!("{}{{", self.indent(level)));
            }
            level + self.increment
        } else {
            level
        };

        let first_child = lines.len();
        for child in block.children() {
            lines = self.render_child(child, lines, child_level, first_child);
        }

        if block.is_braced() {
            lines.push(format!("{}}}", self.indent(level)));
        }
        lines
    }

    fn render_child(
        &self,
        child: &Fragment,
        mut lines: Vec<String>,
        level: usize,
        siblings_from: usize,
    ) -> Vec<String> {
        match child {
            Fragment::Block(block) => self.render_block(block, lines, level, siblings_from),
            Fragment::Statement(stmt) => {
                let text = self.render_statement(stmt, level);
                let mut rendered = text.split('\n');
                if stmt.is_force_concat() && lines.len() > siblings_from {
                    let prefix = self.indent(level);
                    let first = rendered.next().unwrap_or_default();
                    if let Some(last) = lines.last_mut() {
                        last.push_str(first.strip_prefix(prefix.as_str()).unwrap_or(first));
                    }
                }
                lines.extend(rendered.map(str::to_string));
                lines
            }
            // only reachable with contract checks off
            Fragment::Expression(expr) => {
                let text = self.indent_lines(&self.render_expression(expr), level);
                lines.extend(text.split('\n').map(str::to_string));
                lines
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(fragment: impl Into<Fragment>) -> String {
        Renderer::default().render(&fragment.into(), 0)
    }

    #[test]
    fn test_statement_terminator_is_normalized() {
        assert_eq!(render(Statement::terminated("x = 1;;")), "x = 1;");
        assert_eq!(render(Statement::open("if (x)")), "if (x)");
    }

    #[test]
    fn test_statement_ambient_indent() {
        let stmt: Fragment = Statement::terminated("a()").into();
        assert_eq!(Renderer::default().render(&stmt, 2), "        a();");
        assert_eq!(Renderer::new(2, 1).render(&stmt, 2), "    a();");
    }

    #[test]
    fn test_brace_attaches_to_open_header() {
        let block = Block::unbraced(vec![
            Statement::open("while (x)").into(),
            Block::braced(vec![Statement::terminated("x = x - 1").into()]).into(),
        ]);
        insta::assert_snapshot!(render(block), @r"
        while (x) {
            x = x - 1;
        }
        ");
    }

    #[test]
    fn test_brace_stands_alone_after_terminated_line() {
        let block = Block::unbraced(vec![
            Statement::terminated("a()").into(),
            Block::braced(Vec::new()).into(),
        ]);
        assert_eq!(render(block), "a();\n{\n}");
    }

    #[test]
    fn test_first_child_never_attaches_to_parent() {
        let block = Block::unbraced(vec![
            Statement::open("if (x)").into(),
            Block::braced(vec![Block::braced(vec![Statement::terminated("y()").into()]).into()])
                .into(),
        ]);
        assert_eq!(render(block), "if (x) {\n    {\n        y();\n    }\n}");
    }

    #[test]
    fn test_force_concat_joins_previous_line() {
        let block = Block::braced(vec![
            Statement::open("return ").into(),
            Statement::terminated("x + 1").force_concat().into(),
        ]);
        assert_eq!(render(block), "{\n    return x + 1;\n}");
    }

    #[test]
    fn test_force_concat_without_sibling_starts_a_line() {
        let block = Block::braced(vec![Statement::terminated(")").force_concat().into()]);
        assert_eq!(render(block), "{\n    );\n}");
    }

    #[test]
    fn test_else_chain() {
        let block = Block::unbraced(vec![
            Statement::open("if (a)").into(),
            Block::braced(vec![Statement::terminated("f()").into()]).into(),
            Statement::open(" else").force_concat().into(),
            Block::braced(vec![Statement::terminated("g()").into()]).into(),
        ]);
        insta::assert_snapshot!(render(block), @r"
        if (a) {
            f();
        } else {
            g();
        }
        ");
    }

    #[test]
    fn test_nested_block_inside_expression() {
        let header = Expression::from("let f = (function f() ")
            .then(Block::braced(vec![Statement::terminated("return 1").into()]))
            .text(")");
        let block = Block::braced(vec![Statement::terminated(header).into()]);
        assert_eq!(
            render(block),
            "{\n    let f = (function f() {\n        return 1;\n    });\n}"
        );
    }

    #[test]
    fn test_blank_lines_have_no_trailing_whitespace() {
        let block = Block::braced(vec![Statement::terminated("a\n\nb").into()]);
        assert_eq!(render(block), "{\n    a\n\n    b;\n}");
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let block: Fragment = Block::unbraced(vec![
            Statement::open("for (const x of xs)").into(),
            Block::braced(vec![Statement::terminated("console.log(x)").into()]).into(),
        ])
        .into();
        let renderer = Renderer::default();
        assert_eq!(renderer.render(&block, 1), renderer.render(&block, 1));
    }
}
