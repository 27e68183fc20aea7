//! Record store seam behind the shift ledger.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::EngineResult;
use crate::models::WorkLogEntry;
use crate::store::{ALL_LOGS_KEY, KeyValueStore, read_json, work_logs_key, write_json};

/// Durable storage for committed work log entries.
///
/// The ledger only ever creates and lists entries through this trait; status
/// changes and edits belong to whatever owns the store.
pub trait RecordStore: Send + Sync {
    /// Persists `entry` and returns it as stored.
    fn create_entry(&self, entry: WorkLogEntry) -> EngineResult<WorkLogEntry>;

    /// Lists every entry recorded for `worker_id`, in insertion order.
    fn list_by_worker(&self, worker_id: &str) -> EngineResult<Vec<WorkLogEntry>>;

    /// Lists every entry across all workers, in insertion order.
    fn list_all(&self) -> EngineResult<Vec<WorkLogEntry>>;
}

impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    fn create_entry(&self, entry: WorkLogEntry) -> EngineResult<WorkLogEntry> {
        (**self).create_entry(entry)
    }

    fn list_by_worker(&self, worker_id: &str) -> EngineResult<Vec<WorkLogEntry>> {
        (**self).list_by_worker(worker_id)
    }

    fn list_all(&self) -> EngineResult<Vec<WorkLogEntry>> {
        (**self).list_all()
    }
}

/// A [`RecordStore`] laid out over a [`KeyValueStore`].
///
/// Each entry is appended to the worker's `workLogs:<id>` list and to the
/// global `allLogs` list.
///
/// # Example
///
/// ```
/// use shift_engine::ledger::{KeyValueRecordStore, RecordStore};
/// use shift_engine::store::MemoryStore;
///
/// let records = KeyValueRecordStore::new(MemoryStore::new());
/// assert!(records.list_all().unwrap().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct KeyValueRecordStore<S> {
    store: S,
}

impl<S: KeyValueStore> KeyValueRecordStore<S> {
    /// Wraps a key-value store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn read_list(&self, key: &str) -> EngineResult<Vec<WorkLogEntry>> {
        Ok(read_json(&self.store, key)?.unwrap_or_default())
    }
}

impl<S: KeyValueStore> RecordStore for KeyValueRecordStore<S> {
    fn create_entry(&self, entry: WorkLogEntry) -> EngineResult<WorkLogEntry> {
        let worker_key = work_logs_key(&entry.worker_id);
        let previous_worker_log = self.read_list(&worker_key)?;
        let mut all_logs = self.read_list(ALL_LOGS_KEY)?;

        let mut worker_log = previous_worker_log.clone();
        worker_log.push(entry.clone());
        write_json(&self.store, &worker_key, &worker_log)?;

        all_logs.push(entry.clone());
        if let Err(err) = write_json(&self.store, ALL_LOGS_KEY, &all_logs) {
            warn!(
                worker_id = %entry.worker_id,
                error = %err,
                "Global log write failed, rolling back worker log"
            );
            if let Err(rollback_err) = write_json(&self.store, &worker_key, &previous_worker_log) {
                warn!(
                    worker_id = %entry.worker_id,
                    error = %rollback_err,
                    "Worker log rollback failed"
                );
            }
            return Err(err);
        }

        debug!(
            worker_id = %entry.worker_id,
            worker_entries = worker_log.len(),
            total_entries = all_logs.len(),
            "Entry stored"
        );
        Ok(entry)
    }

    fn list_by_worker(&self, worker_id: &str) -> EngineResult<Vec<WorkLogEntry>> {
        self.read_list(&work_logs_key(worker_id))
    }

    fn list_all(&self) -> EngineResult<Vec<WorkLogEntry>> {
        self.read_list(ALL_LOGS_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{WorkDetails, Worker};
    use crate::store::MemoryStore;
    use chrono::NaiveDateTime;

    /// Memory store that refuses writes to one key.
    struct RefusingStore {
        inner: MemoryStore,
        refused_key: &'static str,
    }

    impl KeyValueStore for RefusingStore {
        fn get(&self, key: &str) -> EngineResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> EngineResult<()> {
            if key == self.refused_key {
                return Err(EngineError::store_unavailable(key, "write refused"));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> EngineResult<()> {
            self.inner.remove(key)
        }
    }

    fn make_entry(worker: &Worker, start: &str, end: &str) -> WorkLogEntry {
        let fmt = "%Y-%m-%d %H:%M:%S";
        WorkLogEntry::new(
            worker,
            NaiveDateTime::parse_from_str(start, fmt).unwrap(),
            NaiveDateTime::parse_from_str(end, fmt).unwrap(),
            WorkDetails::zero(),
        )
        .unwrap()
    }

    #[test]
    fn test_entry_lands_in_worker_and_global_logs() {
        let records = KeyValueRecordStore::new(MemoryStore::new());
        let max = Worker::driver("d1", "Max");
        let erika = Worker::driver("d2", "Erika");

        records
            .create_entry(make_entry(&max, "2026-01-15 08:00:00", "2026-01-15 16:00:00"))
            .unwrap();
        records
            .create_entry(make_entry(&erika, "2026-01-15 09:00:00", "2026-01-15 17:00:00"))
            .unwrap();

        assert_eq!(records.list_by_worker("d1").unwrap().len(), 1);
        assert_eq!(records.list_by_worker("d2").unwrap().len(), 1);
        assert_eq!(records.list_all().unwrap().len(), 2);
        assert!(records.store().get("workLogs:d1").unwrap().is_some());
    }

    #[test]
    fn test_failed_global_write_rolls_back_worker_log() {
        let records = KeyValueRecordStore::new(RefusingStore {
            inner: MemoryStore::new(),
            refused_key: ALL_LOGS_KEY,
        });
        let max = Worker::driver("d1", "Max");

        let result =
            records.create_entry(make_entry(&max, "2026-01-15 08:00:00", "2026-01-15 16:00:00"));

        assert!(matches!(result, Err(EngineError::StoreUnavailable { .. })));
        assert!(records.list_by_worker("d1").unwrap().is_empty());
    }

    #[test]
    fn test_failed_worker_write_propagates() {
        let records = KeyValueRecordStore::new(RefusingStore {
            inner: MemoryStore::new(),
            refused_key: "workLogs:d1",
        });
        let max = Worker::driver("d1", "Max");

        let result =
            records.create_entry(make_entry(&max, "2026-01-15 08:00:00", "2026-01-15 16:00:00"));

        assert!(result.is_err());
        assert!(records.list_all().unwrap().is_empty());
    }
}
