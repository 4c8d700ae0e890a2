//! Error types for the rowtally command line

use thiserror::Error;

/// Errors in command-line usage
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0} requires a value")]
    MissingValue(&'static str),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("No CSV file given")]
    MissingFile,

    #[error("Invalid edit '{0}': expected CELL=VALUE, e.g. E2=150000")]
    InvalidEdit(String),

    #[error("Invalid --now value '{0}': expected RFC 3339, e.g. 2024-07-01T08:30:00Z")]
    InvalidInstant(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
