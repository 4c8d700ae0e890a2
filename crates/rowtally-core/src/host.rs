//! The host: applies user edits to the workbook and fires edit triggers.

use crate::error::Result;
use crate::session::Session;
use crate::sheet::{Range, SheetSurface, Workbook};
use crate::trigger::{TriggerReport, Triggers};
use rowtally_engine::engine::{CellRef, CellValue};

/// Owns the workbook and delivers every user edit to the registered triggers.
///
/// Edits are processed one at a time: the value is written, then each edit
/// trigger runs to completion before the call returns.
pub struct Host {
    pub workbook: Workbook,
    pub triggers: Triggers,
    pub session: Session,
}

impl Host {
    pub fn new(workbook: Workbook, session: Session) -> Self {
        Host {
            workbook,
            triggers: Triggers::new(),
            session,
        }
    }

    /// Type `input` into one cell of the active sheet.
    ///
    /// A failed write (out of range, protected) is returned as an error and
    /// no trigger runs. Trigger failures are reported, not returned.
    pub fn edit(&mut self, cell: CellRef, input: &str) -> Result<Vec<TriggerReport>> {
        let value = CellValue::from_input(input);
        let sheet = self.workbook.active_sheet_mut()?;
        let old_value = sheet.get_value(cell)?;
        sheet.set_value(cell, value.clone())?;
        let range = Range::cell(sheet.name.clone(), cell);

        Ok(self.triggers.fire_edit(
            &mut self.workbook,
            &range,
            Some(value),
            Some(old_value),
            &self.session,
        ))
    }

    /// Paste a block of inputs with its top-left corner at `top_left`.
    ///
    /// The whole block is delivered as a single edit event; triggers see its
    /// top-left cell.
    pub fn paste(&mut self, top_left: CellRef, rows: &[Vec<String>]) -> Result<Vec<TriggerReport>> {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return Ok(Vec::new());
        }

        let values: Vec<Vec<CellValue>> = rows
            .iter()
            .map(|row| row.iter().map(|input| CellValue::from_input(input)).collect())
            .collect();
        let sheet = self.workbook.active_sheet_mut()?;
        sheet.set_values(top_left, &values)?;
        let range = Range::new(sheet.name.clone(), top_left, rows.len(), width);

        Ok(self
            .triggers
            .fire_edit(&mut self.workbook, &range, None, None, &self.session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RowtallyError;
    use crate::session::FixedClock;
    use crate::sheet::Sheet;
    use crate::trigger::{EditHandler, EditOutcome};
    use chrono::{TimeZone, Utc};
    use rowtally_engine::engine::ScriptTimeZone;

    fn host() -> Host {
        let at = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let session = Session::new(Box::new(FixedClock(at)), ScriptTimeZone::Utc);
        let mut host = Host::new(Workbook::with_sheet(Sheet::new("Potongan")), session);
        host.triggers.on_edit("onEdit", EditHandler::default());
        host
    }

    fn total(host: &Host, row: usize) -> CellValue {
        host.workbook
            .active_sheet()
            .unwrap()
            .get_value(CellRef::new(row, 10))
            .unwrap()
    }

    #[test]
    fn test_each_edit_updates_total() {
        let mut host = host();
        host.edit(CellRef::new(2, 3), "100000").unwrap();
        assert_eq!(total(&host, 2), CellValue::Number(100000.0));

        let reports = host.edit(CellRef::new(2, 9), "25000").unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(total(&host, 2), CellValue::Number(125000.0));
        assert_eq!(
            host.workbook.active_sheet().unwrap().get_display(CellRef::new(2, 10)),
            "125,000"
        );
    }

    #[test]
    fn test_clearing_a_cell_recomputes() {
        let mut host = host();
        host.edit(CellRef::new(2, 3), "40").unwrap();
        host.edit(CellRef::new(2, 4), "2").unwrap();
        host.edit(CellRef::new(2, 3), "").unwrap();
        assert_eq!(total(&host, 2), CellValue::Number(2.0));
    }

    #[test]
    fn test_name_column_edit_is_ignored() {
        let mut host = host();
        let reports = host.edit(CellRef::new(2, 1), "Siti").unwrap();
        assert!(matches!(reports[0].result, Ok(EditOutcome::Ignored)));
        assert_eq!(total(&host, 2), CellValue::Empty);
    }

    #[test]
    fn test_paste_uses_top_left_only() {
        let mut host = host();
        let rows = vec![
            vec!["1".to_string(), "2".to_string()],
            vec!["30".to_string(), "40".to_string()],
        ];
        host.paste(CellRef::new(2, 3), &rows).unwrap();
        assert_eq!(total(&host, 2), CellValue::Number(3.0));
        // Second pasted row is not recomputed.
        assert_eq!(total(&host, 3), CellValue::Empty);
    }

    #[test]
    fn test_paste_starting_left_of_watched_columns_is_ignored() {
        let mut host = host();
        let rows = vec![vec!["Budi".to_string(), "x".to_string(), "5".to_string()]];
        let reports = host.paste(CellRef::new(2, 1), &rows).unwrap();
        assert!(matches!(reports[0].result, Ok(EditOutcome::Ignored)));
        assert_eq!(total(&host, 2), CellValue::Empty);
    }

    #[test]
    fn test_user_write_to_protected_cell_fires_nothing() {
        let mut host = host();
        host.workbook
            .active_sheet_mut()
            .unwrap()
            .protect_cell(CellRef::new(2, 3));
        let err = host.edit(CellRef::new(2, 3), "5").unwrap_err();
        assert!(matches!(err, RowtallyError::PermissionDenied { .. }));
        assert_eq!(total(&host, 2), CellValue::Empty);
    }

    #[test]
    fn test_trigger_failure_is_reported_and_next_edit_proceeds() {
        let mut host = host();
        host.workbook.active_sheet_mut().unwrap().protect_column(11);

        let reports = host.edit(CellRef::new(2, 3), "5").unwrap();
        assert!(reports[0].is_failure());
        assert_eq!(total(&host, 2), CellValue::Empty);

        host.workbook
            .active_sheet_mut()
            .unwrap()
            .unprotect_column(11);
        let reports = host.edit(CellRef::new(2, 4), "6").unwrap();
        assert!(!reports[0].is_failure());
        assert_eq!(total(&host, 2), CellValue::Number(11.0));
    }
}
