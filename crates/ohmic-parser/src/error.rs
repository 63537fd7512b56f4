//! Error types for ohmic-parser.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("unknown element type: {0}")]
    UnknownElement(String),

    #[error("unknown model: {0}")]
    UnknownModel(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, Error>;
