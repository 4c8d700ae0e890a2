use thiserror::Error;

/// Errors raised while parsing engine-level notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid cell reference: {0}")]
    InvalidCellRef(String),

    #[error("Invalid number format '{pattern}': {message}")]
    InvalidNumberFormat { pattern: String, message: String },

    #[error("Invalid timestamp pattern '{pattern}': {message}")]
    InvalidTimestampPattern { pattern: String, message: String },

    #[error("Invalid time zone: {0}")]
    InvalidTimeZone(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
