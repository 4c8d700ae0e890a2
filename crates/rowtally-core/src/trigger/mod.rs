//! Edit-event subscription and dispatch.
//!
//! Handlers are bound by name with [`Triggers::on_edit`]. The host calls
//! [`Triggers::fire_edit`] once per user edit; every handler runs to
//! completion in registration order and its result lands in a
//! [`TriggerReport`]. A failing handler never stops the others and is never
//! retried.

mod edit_handler;

pub use edit_handler::EditHandler;

use crate::error::Result;
use crate::session::Session;
use crate::sheet::{Range, Workbook};
use rowtally_engine::engine::CellValue;

/// An edit as delivered to a trigger.
pub struct EditEvent<'a> {
    /// The workbook the edit happened in.
    pub source: &'a mut Workbook,
    /// The edited block. Multi-cell pastes arrive as one event.
    pub range: Range,
    /// New value, for single-cell edits.
    pub value: Option<CellValue>,
    /// Previous value, for single-cell edits.
    pub old_value: Option<CellValue>,
}

/// What a trigger did with an event.
#[derive(Clone, Debug, PartialEq)]
pub enum EditOutcome {
    /// The edit did not concern this trigger; nothing was written.
    Ignored,
    /// A row's derived cells were rewritten.
    Recomputed {
        row: usize,
        total: f64,
        timestamp: String,
    },
}

/// A handler for edit events.
pub trait EditTrigger {
    fn on_edit(&self, event: &mut EditEvent<'_>, session: &Session) -> Result<EditOutcome>;
}

impl<F> EditTrigger for F
where
    F: Fn(&mut EditEvent<'_>, &Session) -> Result<EditOutcome>,
{
    fn on_edit(&self, event: &mut EditEvent<'_>, session: &Session) -> Result<EditOutcome> {
        self(event, session)
    }
}

/// Result of running one trigger for one event.
#[derive(Debug)]
pub struct TriggerReport {
    pub trigger: String,
    pub range: Range,
    pub result: Result<EditOutcome>,
}

impl TriggerReport {
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Registered edit triggers.
#[derive(Default)]
pub struct Triggers {
    edit: Vec<(String, Box<dyn EditTrigger>)>,
}

impl Triggers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `trigger` to the edit channel under `name`.
    /// Registering a name twice replaces the earlier handler.
    pub fn on_edit(&mut self, name: impl Into<String>, trigger: impl EditTrigger + 'static) {
        let name = name.into();
        let trigger: Box<dyn EditTrigger> = Box::new(trigger);
        match self.edit.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = trigger,
            None => self.edit.push((name, trigger)),
        }
    }

    /// Remove a handler. Returns false if no handler had that name.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.edit.len();
        self.edit.retain(|(existing, _)| existing != name);
        self.edit.len() != before
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.edit.iter().map(|(name, _)| name.as_str())
    }

    /// Deliver one edit to every registered handler.
    pub fn fire_edit(
        &self,
        book: &mut Workbook,
        range: &Range,
        value: Option<CellValue>,
        old_value: Option<CellValue>,
        session: &Session,
    ) -> Vec<TriggerReport> {
        tracing::debug!(%range, handlers = self.edit.len(), "dispatching edit event");

        self.edit
            .iter()
            .map(|(name, trigger)| {
                let mut event = EditEvent {
                    source: &mut *book,
                    range: range.clone(),
                    value: value.clone(),
                    old_value: old_value.clone(),
                };
                let result = trigger.on_edit(&mut event, session);
                if let Err(err) = &result {
                    tracing::warn!(trigger = %name, %range, error = %err, "edit trigger failed");
                }
                TriggerReport {
                    trigger: name.clone(),
                    range: range.clone(),
                    result,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RowtallyError;
    use crate::sheet::Sheet;
    use rowtally_engine::engine::CellRef;

    fn failing(_: &mut EditEvent<'_>, _: &Session) -> Result<EditOutcome> {
        Err(RowtallyError::SheetNotFound("gone".to_string()))
    }

    fn ignoring(_: &mut EditEvent<'_>, _: &Session) -> Result<EditOutcome> {
        Ok(EditOutcome::Ignored)
    }

    fn checking(event: &mut EditEvent<'_>, _: &Session) -> Result<EditOutcome> {
        assert_eq!(event.value, Some(CellValue::Number(7.0)));
        assert_eq!(event.old_value, Some(CellValue::Empty));
        assert_eq!(event.source.active_sheet()?.name, "Sheet1");
        Ok(EditOutcome::Ignored)
    }

    #[test]
    fn test_failure_does_not_stop_other_triggers() {
        let mut triggers = Triggers::new();
        triggers.on_edit("broken", failing);
        triggers.on_edit("fine", ignoring);

        let mut book = Workbook::with_sheet(Sheet::new("Sheet1"));
        let range = Range::cell("Sheet1", CellRef::new(2, 3));
        let reports = triggers.fire_edit(&mut book, &range, None, None, &Session::default());

        assert_eq!(reports.len(), 2);
        assert!(reports[0].is_failure());
        assert_eq!(reports[1].trigger, "fine");
        assert!(matches!(reports[1].result, Ok(EditOutcome::Ignored)));
    }

    #[test]
    fn test_register_same_name_replaces() {
        let mut triggers = Triggers::new();
        triggers.on_edit("onEdit", failing);
        triggers.on_edit("onEdit", ignoring);
        assert_eq!(triggers.names().collect::<Vec<_>>(), vec!["onEdit"]);

        let mut book = Workbook::with_sheet(Sheet::new("Sheet1"));
        let range = Range::cell("Sheet1", CellRef::new(1, 1));
        let reports = triggers.fire_edit(&mut book, &range, None, None, &Session::default());
        assert!(!reports[0].is_failure());

        assert!(triggers.remove("onEdit"));
        assert!(!triggers.remove("onEdit"));
    }

    #[test]
    fn test_event_carries_values() {
        let mut triggers = Triggers::new();
        triggers.on_edit("check", checking);

        let mut book = Workbook::with_sheet(Sheet::new("Sheet1"));
        let range = Range::cell("Sheet1", CellRef::new(1, 1));
        let reports = triggers.fire_edit(
            &mut book,
            &range,
            Some(CellValue::Number(7.0)),
            Some(CellValue::Empty),
            &Session::default(),
        );
        assert!(!reports[0].is_failure());
    }
}
