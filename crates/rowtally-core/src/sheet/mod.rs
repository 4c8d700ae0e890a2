//! Workbook and sheet state (the grid the triggers edit).

mod ops;
mod range;
mod state;

pub use range::Range;
pub use state::{DEFAULT_MAX_COLS, DEFAULT_MAX_ROWS, Sheet, Workbook};

use crate::error::Result;
use rowtally_engine::engine::{CellRef, CellValue};

/// Single-cell read/write surface a trigger handler works against.
///
/// Rows and columns are 1-based. Every call may fail with a host fault
/// (out-of-range cell, protected cell); handlers pass those on untouched.
pub trait SheetSurface {
    fn name(&self) -> &str;

    fn get_value(&self, cell: CellRef) -> Result<CellValue>;

    fn set_value(&mut self, cell: CellRef, value: CellValue) -> Result<()>;

    /// Set the display number format of a cell, e.g. `#,###`.
    fn set_number_format(&mut self, cell: CellRef, format: &str) -> Result<()>;
}
