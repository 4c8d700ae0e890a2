//! rowtally-core - Host model for ledger edit triggers.
//!
//! A [`Host`] owns a [`Workbook`], the registered [`Triggers`] and the
//! [`Session`] clock. User edits go through the host, which writes the value
//! and then dispatches an [`EditEvent`] to every edit trigger.

pub mod error;
pub mod host;
pub mod layout;
pub mod session;
pub mod sheet;
pub mod storage;
pub mod trigger;

pub use error::{Result, RowtallyError};
pub use host::Host;
pub use layout::LedgerLayout;
pub use session::{Clock, FixedClock, Session, SystemClock};
pub use sheet::{Range, Sheet, SheetSurface, Workbook};
pub use trigger::{EditEvent, EditHandler, EditOutcome, EditTrigger, TriggerReport, Triggers};

pub use rowtally_engine::engine::{CellRef, CellValue};
