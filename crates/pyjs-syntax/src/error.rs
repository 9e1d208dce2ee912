/// Error that can occur when reading Python source into the syntax tree.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("syntax error on line {line}")]
    Syntax { line: usize },

    #[error("unsupported syntax on line {line}: {what}")]
    Unsupported { what: String, line: usize },

    #[error("expected {expected}, got {got}")]
    UnexpectedNode { expected: String, got: String },
}
