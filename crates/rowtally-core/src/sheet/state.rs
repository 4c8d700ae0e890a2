use crate::error::{Result, RowtallyError};
use rowtally_engine::engine::{CellRef, Grid};
use std::collections::HashSet;

/// Rows in a freshly created sheet.
pub const DEFAULT_MAX_ROWS: usize = 1000;
/// Columns in a freshly created sheet (A..Z).
pub const DEFAULT_MAX_COLS: usize = 26;

/// One sheet of a workbook.
pub struct Sheet {
    pub name: String,
    /// Sparse cell storage; absent cells are blank and unformatted.
    pub grid: Grid,
    pub max_rows: usize,
    pub max_cols: usize,
    /// Cells that reject writes.
    pub(crate) protected_cells: HashSet<CellRef>,
    /// Whole columns that reject writes.
    pub(crate) protected_columns: HashSet<usize>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Sheet {
            name: name.into(),
            grid: Grid::new(),
            max_rows: DEFAULT_MAX_ROWS,
            max_cols: DEFAULT_MAX_COLS,
            protected_cells: HashSet::new(),
            protected_columns: HashSet::new(),
        }
    }

    /// Grow the sheet so that it holds at least `rows` x `cols`.
    pub fn ensure_size(&mut self, rows: usize, cols: usize) {
        self.max_rows = self.max_rows.max(rows);
        self.max_cols = self.max_cols.max(cols);
    }

    pub fn protect_cell(&mut self, cell: CellRef) {
        self.protected_cells.insert(cell);
    }

    pub fn protect_column(&mut self, col: usize) {
        self.protected_columns.insert(col);
    }

    pub fn unprotect_column(&mut self, col: usize) -> bool {
        self.protected_columns.remove(&col)
    }

    /// Bottom-right corner of the populated area, or None for an empty sheet.
    pub fn data_extent(&self) -> Option<CellRef> {
        self.grid.iter().fold(None, |acc, entry| {
            let cell = entry.key();
            Some(match acc {
                None => *cell,
                Some(max) => CellRef::new(max.row.max(cell.row), max.col.max(cell.col)),
            })
        })
    }
}

/// An ordered collection of named sheets with one active sheet.
pub struct Workbook {
    sheets: Vec<Sheet>,
    active: usize,
}

impl Workbook {
    pub fn new() -> Self {
        Workbook {
            sheets: Vec::new(),
            active: 0,
        }
    }

    /// Create a workbook holding one sheet, which is active.
    pub fn with_sheet(sheet: Sheet) -> Self {
        Workbook {
            sheets: vec![sheet],
            active: 0,
        }
    }

    /// Append a sheet. The first sheet added becomes active.
    pub fn add_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn set_active_sheet(&mut self, name: &str) -> Result<()> {
        self.active = self.index_of(name)?;
        Ok(())
    }

    pub fn active_sheet(&self) -> Result<&Sheet> {
        self.sheets.get(self.active).ok_or(RowtallyError::NoActiveSheet)
    }

    pub fn active_sheet_mut(&mut self) -> Result<&mut Sheet> {
        self.sheets.get_mut(self.active).ok_or(RowtallyError::NoActiveSheet)
    }

    pub fn sheet_by_name(&self, name: &str) -> Result<&Sheet> {
        Ok(&self.sheets[self.index_of(name)?])
    }

    pub fn sheet_by_name_mut(&mut self, name: &str) -> Result<&mut Sheet> {
        let idx = self.index_of(name)?;
        Ok(&mut self.sheets[idx])
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.sheets
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| RowtallyError::SheetNotFound(name.to_string()))
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}
