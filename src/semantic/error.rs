use thiserror::Error;

/// First ordering rule a program breaks, with the 1-based index of the
/// statement that broke it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Semantic error: {message} at statement {statement_index}")]
pub struct SemanticError {
    pub message: String,
    pub statement_index: usize,
}

impl SemanticError {
    pub fn new(message: impl Into<String>, statement_index: usize) -> Self {
        Self {
            message: message.into(),
            statement_index,
        }
    }
}
