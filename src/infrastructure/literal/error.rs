use thiserror::Error;

use crate::domain::ConfigError;

/// Malformed document, located by 1-based line and column
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}, column {column}: {message}")]
pub struct SyntaxError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl SyntaxError {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}

impl From<SyntaxError> for ConfigError {
    fn from(err: SyntaxError) -> Self {
        Self::Syntax {
            line: err.line,
            column: err.column,
            message: err.message,
        }
    }
}
