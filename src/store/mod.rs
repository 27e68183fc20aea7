//! Key-value persistence for active markers and work logs.
//!
//! Markers and logs are addressed by string keys and stored as JSON text.
//! The store is injected into [`ShiftClock`](crate::clock::ShiftClock) and
//! [`KeyValueRecordStore`](crate::ledger::KeyValueRecordStore) rather than
//! reached through global state, so tests and production can swap backends.
//!
//! # Key layout
//!
//! | Key                  | Value                              |
//! |----------------------|------------------------------------|
//! | `activeShift:<id>`   | [`ActiveShiftMarker`]              |
//! | `workLogs:<id>`      | list of [`WorkLogEntry`] for a worker |
//! | `allLogs`            | list of every [`WorkLogEntry`]     |
//!
//! [`ActiveShiftMarker`]: crate::models::ActiveShiftMarker
//! [`WorkLogEntry`]: crate::models::WorkLogEntry

mod file;
mod memory;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key for a worker's active shift marker.
pub fn active_shift_key(worker_id: &str) -> String {
    format!("activeShift:{}", worker_id)
}

/// Key for a worker's own work log.
pub fn work_logs_key(worker_id: &str) -> String {
    format!("workLogs:{}", worker_id)
}

/// Key for the cross-worker log.
pub const ALL_LOGS_KEY: &str = "allLogs";

/// A persistent string-to-string store.
///
/// Implementations must make each single-key read and write atomic; nothing
/// else is assumed. Methods take `&self` so one store can back the clocks of
/// many workers at once.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored at `key`, if any.
    fn get(&self, key: &str) -> EngineResult<Option<String>>;

    /// Stores `value` at `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> EngineResult<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> EngineResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> EngineResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> EngineResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> EngineResult<()> {
        (**self).remove(key)
    }
}

/// Reads and decodes the JSON value stored at `key`.
pub fn read_json<T, S>(store: &S, key: &str) -> EngineResult<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        debug!(key, "No value stored");
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| EngineError::CorruptRecord {
            key: key.to_string(),
            message: e.to_string(),
        })
}

/// Encodes `value` as JSON and stores it at `key`.
pub fn write_json<T, S>(store: &S, key: &str, value: &T) -> EngineResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|e| EngineError::CorruptRecord {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    debug!(key, bytes = raw.len(), "Writing value");
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActiveShiftMarker;
    use chrono::NaiveDateTime;

    #[test]
    fn test_key_layout() {
        assert_eq!(active_shift_key("driver_001"), "activeShift:driver_001");
        assert_eq!(work_logs_key("driver_001"), "workLogs:driver_001");
        assert_eq!(ALL_LOGS_KEY, "allLogs");
    }

    #[test]
    fn test_json_helpers_through_arc() {
        let store = Arc::new(MemoryStore::new());
        let marker = ActiveShiftMarker {
            worker_id: "driver_001".to_string(),
            start_time: NaiveDateTime::parse_from_str("2026-01-15 22:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        };

        write_json(&store, "activeShift:driver_001", &marker).unwrap();
        let read: Option<ActiveShiftMarker> = read_json(&store, "activeShift:driver_001").unwrap();
        assert_eq!(read, Some(marker));
    }

    #[test]
    fn test_read_json_missing_key_is_none() {
        let store = MemoryStore::new();
        let read: Option<ActiveShiftMarker> = read_json(&store, "activeShift:nobody").unwrap();
        assert!(read.is_none());
    }

    #[test]
    fn test_read_json_reports_corrupt_value() {
        let store = MemoryStore::new();
        store.set("allLogs", "not json").unwrap();

        let result: EngineResult<Option<Vec<String>>> = read_json(&store, "allLogs");
        match result {
            Err(EngineError::CorruptRecord { key, .. }) => assert_eq!(key, "allLogs"),
            other => panic!("Expected CorruptRecord, got {:?}", other),
        }
    }
}
