use rowtally_engine::engine::CellRef;
use std::fmt;

/// A rectangular block of cells on a named sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Range {
    pub sheet: String,
    pub top_left: CellRef,
    pub num_rows: usize,
    pub num_cols: usize,
}

impl Range {
    pub fn new(sheet: impl Into<String>, top_left: CellRef, num_rows: usize, num_cols: usize) -> Range {
        Range {
            sheet: sheet.into(),
            top_left,
            num_rows: num_rows.max(1),
            num_cols: num_cols.max(1),
        }
    }

    pub fn cell(sheet: impl Into<String>, cell: CellRef) -> Range {
        Range::new(sheet, cell, 1, 1)
    }

    /// Column of the top-left cell.
    pub fn column(&self) -> usize {
        self.top_left.col
    }

    /// Row of the top-left cell.
    pub fn row(&self) -> usize {
        self.top_left.row
    }

    pub fn is_single_cell(&self) -> bool {
        self.num_rows == 1 && self.num_cols == 1
    }

    pub fn bottom_right(&self) -> CellRef {
        CellRef::new(
            self.top_left.row + self.num_rows - 1,
            self.top_left.col + self.num_cols - 1,
        )
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_cell() {
            write!(f, "'{}'!{}", self.sheet, self.top_left)
        } else {
            write!(f, "'{}'!{}:{}", self.sheet, self.top_left, self.bottom_right())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_left_indices() {
        let range = Range::new("Potongan", CellRef::new(4, 3), 2, 3);
        assert_eq!(range.column(), 3);
        assert_eq!(range.row(), 4);
        assert!(!range.is_single_cell());
        assert_eq!(range.to_string(), "'Potongan'!C4:E5");
    }

    #[test]
    fn test_single_cell_display() {
        let range = Range::cell("Sheet1", CellRef::new(2, 5));
        assert_eq!(range.to_string(), "'Sheet1'!E2");
    }
}
