//! The append-only shift ledger.

use chrono::NaiveDateTime;
use tracing::info;
use uuid::Uuid;

use crate::calculation::WorkDetailCalculator;
use crate::clock::load_marker;
use crate::error::EngineResult;
use crate::models::{WorkLogEntry, Worker};
use crate::store::KeyValueStore;

use super::overview::{
    DriverOverview, DriverStatus, LedgerSummary, WorkerLogGroup, group_by_worker, last_ended,
    sort_newest_first, summarize,
};
use super::record_store::RecordStore;

/// Append-only record of completed shifts, per worker and globally.
///
/// Entries are immutable snapshots: the ledger never edits or deletes them,
/// and the worker name on each entry is the one stamped at creation time.
///
/// # Example
///
/// ```
/// use shift_engine::ledger::{KeyValueRecordStore, ShiftLedger};
/// use shift_engine::models::{WorkDetails, WorkLogEntry, Worker};
/// use shift_engine::store::MemoryStore;
/// use chrono::NaiveDateTime;
///
/// let ledger = ShiftLedger::new(KeyValueRecordStore::new(MemoryStore::new()));
/// let worker = Worker::driver("driver_001", "Max Mustermann");
/// let start = NaiveDateTime::parse_from_str("2026-01-15 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2026-01-15 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let entry = WorkLogEntry::new(&worker, start, end, WorkDetails::zero()).unwrap();
/// let stored = ledger.append(entry).unwrap();
///
/// assert!(stored.id.is_some());
/// assert_eq!(ledger.list_for_worker("driver_001").unwrap().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ShiftLedger<R> {
    records: R,
}

impl<R: RecordStore> ShiftLedger<R> {
    /// Creates a ledger over a record store.
    pub fn new(records: R) -> Self {
        Self { records }
    }

    /// Returns the underlying record store.
    pub fn records(&self) -> &R {
        &self.records
    }

    /// Commits an entry, assigning a fresh id when it has none.
    ///
    /// # Errors
    ///
    /// Propagates any store failure unchanged; nothing is retried.
    pub fn append(&self, mut entry: WorkLogEntry) -> EngineResult<WorkLogEntry> {
        if entry.id.is_none() {
            entry.id = Some(Uuid::new_v4().to_string());
        }

        let stored = self.records.create_entry(entry)?;
        info!(
            entry_id = stored.id.as_deref().unwrap_or_default(),
            worker_id = %stored.worker_id,
            duration_hours = %stored.duration_hours,
            night_hours = %stored.night_hours,
            expense_euro = %stored.expense_euro,
            "Work log entry appended"
        );
        Ok(stored)
    }

    /// Lists a worker's entries, newest start first.
    pub fn list_for_worker(&self, worker_id: &str) -> EngineResult<Vec<WorkLogEntry>> {
        let mut entries = self.records.list_by_worker(worker_id)?;
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    /// Lists every entry across workers, newest start first.
    pub fn list_all(&self) -> EngineResult<Vec<WorkLogEntry>> {
        let mut entries = self.records.list_all()?;
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    /// Groups every entry by worker id.
    pub fn aggregate_by_worker(&self) -> EngineResult<Vec<WorkerLogGroup>> {
        Ok(group_by_worker(self.records.list_all()?))
    }

    /// Totals hours and expenses across the whole ledger.
    pub fn summary(&self) -> EngineResult<LedgerSummary> {
        Ok(summarize(&self.records.list_all()?))
    }

    /// Builds the status board for the drivers in `roster`.
    ///
    /// Workers in other roles are skipped. Live metrics for an open shift are
    /// computed at `now`; a marker dated after `now` reports zero metrics.
    pub fn driver_overview<S>(
        &self,
        roster: &[Worker],
        markers: &S,
        calculator: &WorkDetailCalculator,
        now: NaiveDateTime,
    ) -> EngineResult<Vec<DriverOverview>>
    where
        S: KeyValueStore + ?Sized,
    {
        let mut rows = Vec::new();

        for driver in roster.iter().filter(|w| w.is_driver()) {
            let marker = load_marker(markers, &driver.id)?;
            let logs = self.records.list_by_worker(&driver.id)?;

            let (status, current_shift) = match marker {
                Some(marker) => (
                    DriverStatus::Working,
                    Some(calculator.compute_or_zero(marker.start_time, now)),
                ),
                None => (DriverStatus::NotActive, None),
            };

            rows.push(DriverOverview {
                worker_id: driver.id.clone(),
                worker_name: driver.name.clone(),
                status,
                current_shift,
                total_logs: logs.len(),
                last_log: last_ended(&logs),
            });
        }

        Ok(rows)
    }
}
