//! Cell data structures for the sheet grid.
//!
//! - [`CellValue`] - The value stored in a cell (empty, number, text or boolean)
//! - [`Cell`] - A value plus its display number format
//! - [`Grid`] - Sparse storage for cells (backed by `DashMap`)

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use super::cell_ref::CellRef;
use super::format::{NumberFormat, format_number};

/// The value stored in a cell.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    /// Parse user input the way the host sheet does when a value is typed.
    /// - Empty string or whitespace -> Empty
    /// - Quoted string -> Text (without quotes)
    /// - TRUE / FALSE (any case) -> Bool
    /// - Valid number -> Number
    /// - Otherwise -> Text
    pub fn from_input(input: &str) -> CellValue {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
            return CellValue::Text(trimmed[1..trimmed.len() - 1].to_string());
        }

        if trimmed.eq_ignore_ascii_case("true") {
            return CellValue::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return CellValue::Bool(false);
        }

        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(trimmed.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Raw text of the value, ignoring any number format.
    pub fn to_input_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
            CellValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// A cell in the sheet grid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub value: CellValue,
    /// Display number format, e.g. `#,###`. `None` means the sheet default.
    pub number_format: Option<String>,
}

impl Cell {
    pub fn new(value: CellValue) -> Cell {
        Cell {
            value,
            number_format: None,
        }
    }

    /// Display string: numbers go through the cell's number format when one is set.
    /// A format that fails to parse falls back to the raw value.
    pub fn display(&self) -> String {
        match (&self.value, &self.number_format) {
            (CellValue::Number(n), Some(pattern)) => match NumberFormat::parse(pattern) {
                Ok(format) => format.apply(*n),
                Err(_) => format_number(*n),
            },
            (value, _) => value.to_input_string(),
        }
    }
}

/// Sparse grid storage.
pub type Grid = DashMap<CellRef, Cell>;
