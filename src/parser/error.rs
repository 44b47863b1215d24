use thiserror::Error;

use crate::token::Token;

/// Syntax error pinned to the offending token, or to the last token when the
/// input ends early.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Syntax error: {message} at line {line}, column {column}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }

    pub(crate) fn at(token: &Token<'_>, message: impl Into<String>) -> Self {
        Self::new(message, token.line, token.column)
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
