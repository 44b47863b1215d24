use thiserror::Error;

use crate::lexer::LexError;
use crate::parser::ParseError;
use crate::semantic::SemanticError;

/// Failure from whichever pipeline stage stopped first. Parser and semantic
/// errors already name their stage when displayed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Lexer error: {0}")]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}
