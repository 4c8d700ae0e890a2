use super::{Sheet, SheetSurface};
use crate::error::{Result, RowtallyError};
use rowtally_engine::engine::{Cell, CellRef, CellValue, NumberFormat};

impl Sheet {
    fn check_bounds(&self, cell: CellRef) -> Result<()> {
        if cell.row == 0 || cell.col == 0 || cell.row > self.max_rows || cell.col > self.max_cols {
            return Err(RowtallyError::InvalidRange {
                sheet: self.name.clone(),
                cell,
                max_rows: self.max_rows,
                max_cols: self.max_cols,
            });
        }
        Ok(())
    }

    fn check_writable(&self, cell: CellRef) -> Result<()> {
        self.check_bounds(cell)?;
        if self.protected_cells.contains(&cell) || self.protected_columns.contains(&cell.col) {
            return Err(RowtallyError::PermissionDenied {
                sheet: self.name.clone(),
                cell,
            });
        }
        Ok(())
    }

    /// Display string of a cell, with its number format applied.
    pub fn get_display(&self, cell: CellRef) -> String {
        self.grid
            .get(&cell)
            .map(|c| c.display())
            .unwrap_or_default()
    }

    pub fn get_number_format(&self, cell: CellRef) -> Option<String> {
        self.grid.get(&cell).and_then(|c| c.number_format.clone())
    }

    /// Write a block of values starting at `top_left`, row by row.
    /// Nothing is written unless every target cell is writable.
    pub fn set_values(&mut self, top_left: CellRef, rows: &[Vec<CellValue>]) -> Result<()> {
        for (r, row) in rows.iter().enumerate() {
            for c in 0..row.len() {
                self.check_writable(CellRef::new(top_left.row + r, top_left.col + c))?;
            }
        }
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                self.store_value(CellRef::new(top_left.row + r, top_left.col + c), value.clone());
            }
        }
        Ok(())
    }

    /// Store a value, dropping cells that end up blank and unformatted.
    fn store_value(&self, cell: CellRef, value: CellValue) {
        let mut entry = self.grid.entry(cell).or_default();
        entry.value = value;
        let vacant = entry.value.is_empty() && entry.number_format.is_none();
        drop(entry);
        if vacant {
            self.grid.remove(&cell);
        }
    }
}

impl SheetSurface for Sheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_value(&self, cell: CellRef) -> Result<CellValue> {
        self.check_bounds(cell)?;
        Ok(self
            .grid
            .get(&cell)
            .map(|c| c.value.clone())
            .unwrap_or_default())
    }

    fn set_value(&mut self, cell: CellRef, value: CellValue) -> Result<()> {
        self.check_writable(cell)?;
        self.store_value(cell, value);
        Ok(())
    }

    fn set_number_format(&mut self, cell: CellRef, format: &str) -> Result<()> {
        self.check_writable(cell)?;
        NumberFormat::parse(format)?;
        self.grid
            .entry(cell)
            .or_insert_with(|| Cell::new(CellValue::Empty))
            .number_format = Some(format.to_string());
        Ok(())
    }
}
