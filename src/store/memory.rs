//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::{EngineError, EngineResult};

use super::KeyValueStore;

/// A process-local store backed by a mutex-guarded map.
///
/// # Example
///
/// ```
/// use shift_engine::store::{KeyValueStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// store.set("allLogs", "[]").unwrap();
/// assert_eq!(store.get("allLogs").unwrap(), Some("[]".to_string()));
///
/// store.remove("allLogs").unwrap();
/// assert_eq!(store.get("allLogs").unwrap(), None);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StoreUnavailable`] if the lock is poisoned.
    pub fn len(&self) -> EngineResult<usize> {
        Ok(self.lock("<len>")?.len())
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> EngineResult<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self, key: &str) -> EngineResult<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| EngineError::store_unavailable(key, "memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> EngineResult<Option<String>> {
        Ok(self.lock(key)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> EngineResult<()> {
        self.lock(key)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> EngineResult<()> {
        self.lock(key)?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_value() {
        let store = MemoryStore::new();
        store.set("workLogs:d1", "[1]").unwrap();
        store.set("workLogs:d1", "[1,2]").unwrap();

        assert_eq!(store.get("workLogs:d1").unwrap(), Some("[1,2]".to_string()));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let store = MemoryStore::new();
        assert!(store.remove("activeShift:nobody").is_ok());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_keys_are_independent() {
        let store = MemoryStore::new();
        store.set("activeShift:d1", "a").unwrap();
        store.set("activeShift:d2", "b").unwrap();
        store.remove("activeShift:d1").unwrap();

        assert_eq!(store.get("activeShift:d1").unwrap(), None);
        assert_eq!(store.get("activeShift:d2").unwrap(), Some("b".to_string()));
    }

    #[test]
    fn test_poisoned_lock_is_store_unavailable() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.entries.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(matches!(store.len(), Err(EngineError::StoreUnavailable { .. })));
        assert!(matches!(store.is_empty(), Err(EngineError::StoreUnavailable { .. })));
        assert!(matches!(store.get("allLogs"), Err(EngineError::StoreUnavailable { .. })));
    }
}
