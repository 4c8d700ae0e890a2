//! Cell reference parsing and formatting.
//!
//! Rows and columns are 1-based, the way the host sheet numbers them:
//! column 1 is `A`, row 1 is the first row.
//!
//! # Examples
//!
//! ```ignore
//! let cell = CellRef::from_str("C5").unwrap();
//! assert_eq!(cell.col, 3);
//! assert_eq!(cell.row, 5);
//! assert_eq!(cell.to_string(), "C5");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::error::EngineError;

static A1_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$").expect("A1 pattern is valid")
});

/// A reference to a cell by 1-based row and column.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Same row, different column.
    pub fn with_col(self, col: usize) -> CellRef {
        CellRef::new(self.row, col)
    }

    /// Parse a cell reference from spreadsheet notation (e.g., "A1", "C5", "AA10").
    /// Returns None if the input is invalid.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellRef> {
        Self::parse_a1(name)
    }

    fn parse_a1(name: &str) -> Option<CellRef> {
        let caps = A1_PATTERN.captures(name.trim())?;
        let letters = &caps["letters"];
        let numbers = &caps["numbers"];

        let mut col = 0usize;
        for c in letters.to_ascii_uppercase().bytes() {
            let digit = (c - b'A') as usize + 1;
            col = col.checked_mul(26)?.checked_add(digit)?;
        }

        let row = numbers.parse::<usize>().ok()?;
        if row == 0 {
            return None;
        }

        Some(CellRef::new(row, col))
    }

    /// Convert a 1-based column to spreadsheet letters (1 -> A, 26 -> Z, 27 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

impl std::str::FromStr for CellRef {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_a1(s).ok_or_else(|| EngineError::InvalidCellRef(s.to_string()))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row)
    }
}
