//! Directory-backed key-value store.
//!
//! Each key lives in its own JSON file. Writes go to a temporary sibling and
//! are renamed into place, so a reader never sees a half-written value.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::KeyValueStore;

/// A store keeping one file per key inside a data directory.
///
/// Key characters outside `[A-Za-z0-9_-]` are percent-encoded in the file
/// name, so `activeShift:driver_001` is stored as
/// `activeShift%3Adriver_001.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StoreUnavailable`] if the directory cannot be
    /// created.
    pub fn open<P: AsRef<Path>>(root: P) -> EngineResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| {
            EngineError::store_unavailable(root.display().to_string(), e.to_string())
        })?;
        debug!(root = %root.display(), "Opened file store");
        Ok(Self { root })
    }

    /// Returns the data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", encode_key(key)))
    }
}

fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> EngineResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EngineError::store_unavailable(key, e.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> EngineResult<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value).map_err(|e| EngineError::store_unavailable(key, e.to_string()))?;
        fs::rename(&tmp, &path).map_err(|e| EngineError::store_unavailable(key, e.to_string()))
    }

    fn remove(&self, key: &str) -> EngineResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(EngineError::store_unavailable(key, e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_encode_key_escapes_separator() {
        assert_eq!(encode_key("activeShift:driver_001"), "activeShift%3Adriver_001");
        assert_eq!(encode_key("allLogs"), "allLogs");
        assert_eq!(encode_key("workLogs:a/b"), "workLogs%3Aa%2Fb");
    }

    #[test]
    fn test_round_trip_through_disk() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let store = FileStore::open(root).unwrap();

        assert_eq!(store.get("allLogs").unwrap(), None);
        store.set("allLogs", "[]").unwrap();
        assert_eq!(store.get("allLogs").unwrap(), Some("[]".to_string()));
        assert!(root.join("allLogs.json").exists());

        store.remove("allLogs").unwrap();
        assert_eq!(store.get("allLogs").unwrap(), None);
        store.remove("allLogs").unwrap();
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        FileStore::open(temp_dir.path())
            .unwrap()
            .set("activeShift:d1", "{}")
            .unwrap();

        let reopened = FileStore::open(temp_dir.path()).unwrap();
        assert_eq!(reopened.get("activeShift:d1").unwrap(), Some("{}".to_string()));
    }

    #[test]
    fn test_open_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("nested").join("data");

        let store = FileStore::open(&root).unwrap();
        assert!(root.is_dir());
        assert_eq!(store.root(), root.as_path());
    }
}
