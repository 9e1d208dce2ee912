use pyjs_syntax::ReadError;

/// Error that aborts a translation.
#[derive(Debug, thiserror::Error)]
pub enum TranspileError {
    /// The construct was recognized but has no lowering.
    #[error("{}", located(.message, .line))]
    Compilation {
        message: String,
        line: Option<usize>,
    },

    /// A handler produced output of the wrong shape.
    #[error("contract violated by {handler} handler: {detail}")]
    Contract {
        handler: &'static str,
        detail: String,
    },

    #[error(transparent)]
    Read(#[from] ReadError),

    /// `error` is part of the message, not a `source()`.
    #[error("{filename}: {error}")]
    File {
        filename: String,
        error: Box<TranspileError>,
    },
}

fn located(message: &str, line: &Option<usize>) -> String {
    match line {
        Some(line) => format!("line {line}: {message}"),
        None => message.to_string(),
    }
}

impl TranspileError {
    pub fn compilation(message: impl Into<String>) -> Self {
        TranspileError::Compilation {
            message: message.into(),
            line: None,
        }
    }

    /// Attach a source line unless a more specific one is already set.
    pub fn at_line(self, at: usize) -> Self {
        match self {
            TranspileError::Compilation {
                message,
                line: None,
            } => TranspileError::Compilation {
                message,
                line: Some(at),
            },
            other => other,
        }
    }

    pub fn in_file(self, filename: impl Into<String>) -> Self {
        TranspileError::File {
            filename: filename.into(),
            error: Box::new(self),
        }
    }
}

pub type Result<T, E = TranspileError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_innermost_line_wins() {
        let err = TranspileError::compilation("slicing is not supported")
            .at_line(3)
            .at_line(1);
        assert_eq!(err.to_string(), "line 3: slicing is not supported");
    }

    #[test]
    fn test_file_prefix() {
        let err = TranspileError::compilation("nope").in_file("main.py");
        assert_eq!(err.to_string(), "main.py: nope");
    }
}
