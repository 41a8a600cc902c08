use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, warn};
use serde_json::Value;

use crate::progress::errors::ProgressError;
use crate::progress::reconcile::reconcile;
use crate::progress::types::{ProgressionRecord, DEFAULT_STORAGE_KEY};

const TREE_PROGRESS: &str = "progress";

/// Opaque key-value persistence medium.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ProgressError>;
    fn set(&self, key: &str, value: &[u8]) -> Result<(), ProgressError>;
    fn delete(&self, key: &str) -> Result<(), ProgressError>;
}

/// Sled-backed key-value medium.
pub struct SledStore {
    _db: sled::Db,
    progress: sled::Tree,
}

impl SledStore {
    /// Open (or create) the store rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ProgressError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let progress = db.open_tree(TREE_PROGRESS)?;
        Ok(Self { _db: db, progress })
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ProgressError> {
        Ok(self.progress.get(key.as_bytes())?.map(|bytes| bytes.to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), ProgressError> {
        self.progress.insert(key.as_bytes(), value)?;
        self.progress.flush()?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), ProgressError> {
        self.progress.remove(key.as_bytes())?;
        self.progress.flush()?;
        Ok(())
    }
}

/// In-process medium, mainly for tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, ProgressError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), ProgressError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), ProgressError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

/// Helper builder so tests can easily create throwaway stores with custom paths.
pub struct ProgressStoreBuilder {
    path: PathBuf,
    key: String,
}

impl ProgressStoreBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Store the record under a different key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn open(self) -> Result<ProgressStore, ProgressError> {
        let backend = SledStore::open(&self.path)?;
        Ok(ProgressStore::new(Box::new(backend), self.key))
    }
}

/// Loads, saves and resets the progression record held under one key.
pub struct ProgressStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
}

impl ProgressStore {
    pub fn new(backend: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Sled-backed store at `path` under the default key.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ProgressError> {
        ProgressStoreBuilder::new(path.as_ref()).open()
    }

    /// Non-persistent store, handy for tests.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()), DEFAULT_STORAGE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current record. Absent or unreadable data yields the default record.
    pub fn load(&self) -> ProgressionRecord {
        let bytes = match self.backend.get(&self.key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("no progression record under {}, using defaults", self.key);
                return ProgressionRecord::default();
            }
            Err(e) => {
                warn!("failed to read progression record {}: {}", self.key, e);
                return ProgressionRecord::default();
            }
        };
        match Self::parse(&bytes) {
            Ok(document) => reconcile(&document),
            Err(e) => {
                warn!("discarding unreadable progression record {}: {}", self.key, e);
                ProgressionRecord::default()
            }
        }
    }

    fn parse(bytes: &[u8]) -> Result<Value, ProgressError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(serde_json::from_str(text)?)
    }

    /// Overwrite the persisted record as a whole.
    pub fn save(&self, record: &ProgressionRecord) -> Result<(), ProgressError> {
        let bytes = serde_json::to_vec(record)?;
        self.backend.set(&self.key, &bytes)?;
        debug!("saved progression record {} ({} bytes)", self.key, bytes.len());
        Ok(())
    }

    /// Remove the persisted record so the next load starts from defaults.
    pub fn reset(&self) -> Result<(), ProgressError> {
        self.backend.delete(&self.key)?;
        debug!("deleted progression record {}", self.key);
        Ok(())
    }

    /// Write raw bytes under the record key, bypassing serialization.
    pub fn put_raw(&self, bytes: &[u8]) -> Result<(), ProgressError> {
        self.backend.set(&self.key, bytes)
    }

    /// Raw persisted bytes, if any.
    pub fn get_raw(&self) -> Result<Option<Vec<u8>>, ProgressError> {
        self.backend.get(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::catalog::Slot;
    use tempfile::TempDir;

    #[test]
    fn load_without_record_is_default() {
        let store = ProgressStore::in_memory();
        assert_eq!(store.load(), ProgressionRecord::default());
    }

    #[test]
    fn store_round_trip_record() {
        let dir = TempDir::new().expect("tempdir");
        let store = ProgressStoreBuilder::new(dir.path()).open().expect("store");
        let mut record = ProgressionRecord::default();
        record.points = 42;
        record.owned_items.insert("wizard-hat".into());
        record.equipped.set(Slot::Hat, "wizard-hat");
        store.save(&record).expect("save");
        assert_eq!(store.load(), record);
    }

    #[test]
    fn garbage_bytes_load_as_default() {
        let store = ProgressStore::in_memory();
        store.put_raw(b"{not json").expect("put");
        assert_eq!(store.load(), ProgressionRecord::default());
        store.put_raw(&[0xff, 0xfe, 0x00]).expect("put");
        assert_eq!(store.load(), ProgressionRecord::default());
    }

    #[test]
    fn reset_deletes_rather_than_writes_default() {
        let store = ProgressStore::in_memory();
        let mut record = ProgressionRecord::default();
        record.points = 10;
        store.save(&record).expect("save");
        store.reset().expect("reset");
        assert!(store.get_raw().expect("raw").is_none());
        assert_eq!(store.load(), ProgressionRecord::default());
    }

    #[test]
    fn keys_are_isolated() {
        let dir = TempDir::new().expect("tempdir");
        let store = ProgressStoreBuilder::new(dir.path())
            .with_key("other_app")
            .open()
            .expect("store");
        let mut record = ProgressionRecord::default();
        record.points = 7;
        store.save(&record).expect("save");
        drop(store);

        let default_key = ProgressStore::open(dir.path()).expect("reopen");
        assert_eq!(default_key.key(), DEFAULT_STORAGE_KEY);
        assert_eq!(default_key.load().points, 0);
    }
}
