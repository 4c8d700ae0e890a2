//! Error types for rowtally core.

use thiserror::Error;

use rowtally_engine::engine::{CellRef, EngineError};

/// Errors raised by the host model and the handlers running on it.
#[derive(Error, Debug)]
pub enum RowtallyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Range {cell} is out of bounds for sheet '{sheet}' ({max_rows} rows x {max_cols} columns)")]
    InvalidRange {
        sheet: String,
        cell: CellRef,
        max_rows: usize,
        max_cols: usize,
    },

    #[error("You are trying to edit a protected cell: '{sheet}'!{cell}")]
    PermissionDenied { sheet: String, cell: CellRef },

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Workbook has no sheets")]
    NoActiveSheet,

    #[error("Invalid ledger layout: {0}")]
    InvalidLayout(String),

    #[error("CSV file is empty")]
    EmptyCsv,
}

pub type Result<T> = std::result::Result<T, RowtallyError>;
