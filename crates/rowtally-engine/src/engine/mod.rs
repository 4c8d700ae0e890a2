//! Spreadsheet engine API.
//!
//! This module provides the building blocks the ledger host works with:
//!
//! - [`Cell`], [`CellValue`], [`Grid`] - Data structures for cell storage
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ 1-based row/column)
//! - [`to_number`] - Numeric coercion with a zero fallback
//! - [`NumberFormat`] - Display number formats such as `#,###`
//! - [`TimestampPattern`], [`ScriptTimeZone`] - Timestamp rendering

mod cell;
mod cell_ref;
mod coerce;
mod error;
mod format;
mod timestamp;

pub use cell::{Cell, CellValue, Grid};
pub use cell_ref::CellRef;
pub use coerce::{parse_number, to_number};
pub use error::{EngineError, Result};
pub use format::{NumberFormat, format_number};
pub use timestamp::{DEFAULT_TIMESTAMP_PATTERN, ScriptTimeZone, TimestampPattern};
