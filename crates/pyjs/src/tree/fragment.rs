//! Fragment types.

/// A unit of JavaScript text waiting for an indentation context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Expression(Expression),
    Statement(Statement),
    Block(Block),
}

impl Fragment {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Fragment::Expression(_) => "expression",
            Fragment::Statement(_) => "statement",
            Fragment::Block(_) => "block",
        }
    }
}

impl From<Expression> for Fragment {
    fn from(expr: Expression) -> Self {
        Fragment::Expression(expr)
    }
}

impl From<Statement> for Fragment {
    fn from(stmt: Statement) -> Self {
        Fragment::Statement(stmt)
    }
}

impl From<Block> for Fragment {
    fn from(block: Block) -> Self {
        Fragment::Block(block)
    }
}

/// A child of an [`Expression`]: literal text or a nested fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Text(String),
    Fragment(Fragment),
}

/// Concatenated text with no layout of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expression {
    pieces: Vec<Piece>,
}

impl Expression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// True when rendering would produce no text.
    pub fn is_empty(&self) -> bool {
        self.pieces
            .iter()
            .all(|piece| matches!(piece, Piece::Text(text) if text.is_empty()))
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        match self.pieces.last_mut() {
            Some(Piece::Text(last)) => last.push_str(&text),
            _ => self.pieces.push(Piece::Text(text)),
        }
    }

    pub fn push(&mut self, fragment: impl Into<Fragment>) {
        self.pieces.push(Piece::Fragment(fragment.into()));
    }

    /// Append literal text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    /// Append a nested fragment.
    pub fn then(mut self, fragment: impl Into<Fragment>) -> Self {
        self.push(fragment);
        self
    }

    /// Splice another expression's pieces onto the end of this one.
    pub fn append(mut self, other: Expression) -> Self {
        for piece in other.pieces {
            match piece {
                Piece::Text(text) => self.push_text(text),
                Piece::Fragment(fragment) => self.pieces.push(Piece::Fragment(fragment)),
            }
        }
        self
    }

    pub fn parenthesized(self) -> Self {
        Expression::from("(").append(self).text(")")
    }

    pub fn join(items: impl IntoIterator<Item = Expression>, separator: &str) -> Self {
        let mut joined = Expression::new();
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                joined.push_text(separator);
            }
            joined = joined.append(item);
        }
        joined
    }
}

impl From<&str> for Expression {
    fn from(text: &str) -> Self {
        Expression::new().text(text)
    }
}

impl From<String> for Expression {
    fn from(text: String) -> Self {
        Expression::new().text(text)
    }
}

/// An expression laid out as its own line.
///
/// `terminated` appends `;` (replacing any trailing ones). `force_concat`
/// glues the rendered text onto the previous sibling line inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    body: Expression,
    terminated: bool,
    force_concat: bool,
}

impl Statement {
    /// A statement ending in `;`.
    pub fn terminated(body: impl Into<Expression>) -> Self {
        Self {
            body: body.into(),
            terminated: true,
            force_concat: false,
        }
    }

    /// A statement with no terminator, such as a control-flow header.
    pub fn open(body: impl Into<Expression>) -> Self {
        Self {
            body: body.into(),
            terminated: false,
            force_concat: false,
        }
    }

    pub fn force_concat(mut self) -> Self {
        self.force_concat = true;
        self
    }

    pub fn set_force_concat(&mut self, force_concat: bool) {
        self.force_concat = force_concat;
    }

    pub fn body(&self) -> &Expression {
        &self.body
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn is_force_concat(&self) -> bool {
        self.force_concat
    }
}

/// A sequence of statements and blocks, one indentation step deeper than
/// its surroundings when braced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    children: Vec<Fragment>,
    braced: bool,
}

impl Block {
    pub fn braced(children: Vec<Fragment>) -> Self {
        Self {
            children,
            braced: true,
        }
    }

    pub fn unbraced(children: Vec<Fragment>) -> Self {
        Self {
            children,
            braced: false,
        }
    }

    pub fn children(&self) -> &[Fragment] {
        &self.children
    }

    pub fn is_braced(&self) -> bool {
        self.braced
    }

    pub fn push(&mut self, fragment: impl Into<Fragment>) {
        self.children.push(fragment.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_text_merges() {
        let expr = Expression::from("a").text(" + ").text("b");
        assert_eq!(expr.pieces(), &[Piece::Text("a + b".into())]);
    }

    #[test]
    fn test_join() {
        let joined = Expression::join(["1".into(), "2".into(), "3".into()], ", ");
        assert_eq!(joined, Expression::from("1, 2, 3"));
        assert!(Expression::join(Vec::new(), ", ").is_empty());
    }

    #[test]
    fn test_empty_text_is_empty() {
        assert!(Expression::from("").is_empty());
        assert!(!Expression::new().then(Block::braced(Vec::new())).is_empty());
    }

    #[test]
    fn test_force_concat_flag() {
        let mut stmt = Statement::terminated("x");
        assert!(!stmt.is_force_concat());
        stmt.set_force_concat(true);
        assert!(stmt.is_force_concat());
        assert!(stmt.is_terminated());
    }
}
