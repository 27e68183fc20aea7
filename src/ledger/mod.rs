//! The shift ledger: committed work log entries and reporting over them.

mod overview;
mod record_store;
mod shift_ledger;

pub use overview::{DriverOverview, DriverStatus, LedgerSummary, WorkerLogGroup};
pub use record_store::{KeyValueRecordStore, RecordStore};
pub use shift_ledger::ShiftLedger;
