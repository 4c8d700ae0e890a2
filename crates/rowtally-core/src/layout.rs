//! Column layout of a deduction ledger row.

use crate::error::{Result, RowtallyError};
use rowtally_engine::engine::{NumberFormat, TimestampPattern};

pub use rowtally_engine::engine::DEFAULT_TIMESTAMP_PATTERN;

/// Deduction columns watched for edits (C..I).
pub const DEFAULT_WATCHED_COLUMNS: [usize; 7] = [3, 4, 5, 6, 7, 8, 9];
/// Column holding the row total (J).
pub const DEFAULT_TOTAL_COLUMN: usize = 10;
/// Column holding the last-edit timestamp (K).
pub const DEFAULT_TIMESTAMP_COLUMN: usize = 11;
pub const DEFAULT_NUMBER_FORMAT: &str = "#,###";

/// Which columns of a row are watched, and where the derived values go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerLayout {
    watched_columns: Vec<usize>,
    total_column: usize,
    timestamp_column: usize,
    number_format: String,
    timestamp_pattern: TimestampPattern,
}

impl LedgerLayout {
    /// Build a validated layout.
    ///
    /// Columns are 1-based. The total and timestamp columns must differ from
    /// each other and from every watched column, otherwise a recompute would
    /// overwrite its own input.
    pub fn new(
        watched_columns: Vec<usize>,
        total_column: usize,
        timestamp_column: usize,
        number_format: &str,
        timestamp_pattern: &str,
    ) -> Result<Self> {
        let invalid = |msg: String| -> Result<Self> { Err(RowtallyError::InvalidLayout(msg)) };

        if watched_columns.is_empty() {
            return invalid("no watched columns".to_string());
        }
        if let Some(col) = watched_columns
            .iter()
            .chain([&total_column, &timestamp_column])
            .find(|c| **c == 0)
        {
            return invalid(format!("column {} is not 1-based", col));
        }
        if total_column == timestamp_column {
            return invalid(format!(
                "total and timestamp share column {}",
                total_column
            ));
        }
        if watched_columns.contains(&total_column) {
            return invalid(format!("total column {} is also watched", total_column));
        }
        if watched_columns.contains(&timestamp_column) {
            return invalid(format!(
                "timestamp column {} is also watched",
                timestamp_column
            ));
        }

        NumberFormat::parse(number_format)?;
        let timestamp_pattern = TimestampPattern::parse(timestamp_pattern)?;

        let mut watched_columns = watched_columns;
        watched_columns.sort_unstable();
        watched_columns.dedup();

        Ok(LedgerLayout {
            watched_columns,
            total_column,
            timestamp_column,
            number_format: number_format.to_string(),
            timestamp_pattern,
        })
    }

    pub fn watched_columns(&self) -> &[usize] {
        &self.watched_columns
    }

    pub fn is_watched(&self, col: usize) -> bool {
        self.watched_columns.contains(&col)
    }

    pub fn total_column(&self) -> usize {
        self.total_column
    }

    pub fn timestamp_column(&self) -> usize {
        self.timestamp_column
    }

    pub fn number_format(&self) -> &str {
        &self.number_format
    }

    pub fn timestamp_pattern(&self) -> &TimestampPattern {
        &self.timestamp_pattern
    }

    /// Watched columns followed by the total column.
    pub fn money_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.watched_columns
            .iter()
            .copied()
            .chain(std::iter::once(self.total_column))
    }
}

impl Default for LedgerLayout {
    fn default() -> Self {
        LedgerLayout {
            watched_columns: DEFAULT_WATCHED_COLUMNS.to_vec(),
            total_column: DEFAULT_TOTAL_COLUMN,
            timestamp_column: DEFAULT_TIMESTAMP_COLUMN,
            number_format: DEFAULT_NUMBER_FORMAT.to_string(),
            timestamp_pattern: TimestampPattern::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_validated() {
        let built = LedgerLayout::new(
            vec![9, 3, 4, 5, 6, 7, 8, 3],
            10,
            11,
            DEFAULT_NUMBER_FORMAT,
            DEFAULT_TIMESTAMP_PATTERN,
        )
        .unwrap();
        assert_eq!(built, LedgerLayout::default());
    }

    #[test]
    fn test_money_columns() {
        let layout = LedgerLayout::default();
        let cols: Vec<usize> = layout.money_columns().collect();
        assert_eq!(cols, vec![3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_rejects_overlapping_columns() {
        let fmt = "#,###";
        let pat = DEFAULT_TIMESTAMP_PATTERN;
        assert!(LedgerLayout::new(vec![], 10, 11, fmt, pat).is_err());
        assert!(LedgerLayout::new(vec![3, 10], 10, 11, fmt, pat).is_err());
        assert!(LedgerLayout::new(vec![3, 11], 10, 11, fmt, pat).is_err());
        assert!(LedgerLayout::new(vec![3], 10, 10, fmt, pat).is_err());
        assert!(LedgerLayout::new(vec![0, 3], 10, 11, fmt, pat).is_err());
    }

    #[test]
    fn test_rejects_bad_formats() {
        assert!(matches!(
            LedgerLayout::new(vec![3], 10, 11, "#,##x", "yyyy"),
            Err(RowtallyError::Engine(_))
        ));
        assert!(LedgerLayout::new(vec![3], 10, 11, "#,###", "yyyy hh").is_err());
    }
}
