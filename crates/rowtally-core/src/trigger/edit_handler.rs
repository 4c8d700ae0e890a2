use super::{EditEvent, EditOutcome, EditTrigger};
use crate::error::Result;
use crate::layout::LedgerLayout;
use crate::session::Session;
use crate::sheet::SheetSurface;
use rowtally_engine::engine::{CellRef, CellValue, to_number};

/// Keeps a deduction row's total and last-edit timestamp current.
///
/// On an edit to a watched column it sums the row's watched cells, writes the
/// timestamp and the total, then applies the number format to the watched
/// cells and the total. Edits anywhere else are ignored. Host faults are
/// returned as-is.
#[derive(Clone, Debug, Default)]
pub struct EditHandler {
    layout: LedgerLayout,
}

impl EditHandler {
    pub fn new(layout: LedgerLayout) -> Self {
        EditHandler { layout }
    }

    pub fn layout(&self) -> &LedgerLayout {
        &self.layout
    }

    /// Recompute the derived cells of `row`.
    pub fn recompute(
        &self,
        sheet: &mut dyn SheetSurface,
        row: usize,
        session: &Session,
    ) -> Result<EditOutcome> {
        let layout = &self.layout;
        let at = CellRef::new(row, 1);

        let mut total = 0.0;
        for &col in layout.watched_columns() {
            total += to_number(&sheet.get_value(at.with_col(col))?);
        }

        let timestamp = session.format_date(session.now(), layout.timestamp_pattern());
        sheet.set_value(
            at.with_col(layout.timestamp_column()),
            CellValue::Text(timestamp.clone()),
        )?;
        sheet.set_value(at.with_col(layout.total_column()), CellValue::Number(total))?;

        for col in layout.money_columns() {
            sheet.set_number_format(at.with_col(col), layout.number_format())?;
        }

        tracing::info!(sheet = sheet.name(), row, total, %timestamp, "row total recomputed");
        Ok(EditOutcome::Recomputed {
            row,
            total,
            timestamp,
        })
    }
}

impl EditTrigger for EditHandler {
    fn on_edit(&self, event: &mut EditEvent<'_>, session: &Session) -> Result<EditOutcome> {
        let col = event.range.column();
        if !self.layout.is_watched(col) {
            tracing::trace!(range = %event.range, "column not watched");
            return Ok(EditOutcome::Ignored);
        }
        let sheet = event.source.active_sheet_mut()?;
        self.recompute(sheet, event.range.row(), session)
    }
}
