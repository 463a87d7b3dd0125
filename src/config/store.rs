//! Flat key-value preference storage.
//!
//! The on-disk form is one JSON object; every write rewrites the whole file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use crate::error::AppError;

pub trait PreferenceStore: Send {
    fn read(&self, key: &str) -> Result<Option<Value>, AppError>;
    fn write(&self, key: &str, value: Value) -> Result<(), AppError>;
}

/// `<config dir>/Montag/preferences.json`
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Result<Self, AppError> {
        let dir = dirs::config_dir()
            .ok_or_else(|| AppError::Config("could not determine config directory".into()))?;
        Ok(Self::new(dir.join("Montag").join("preferences.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, Value>, AppError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<Value>, AppError> {
        Ok(self.read_all()?.remove(key))
    }

    fn write(&self, key: &str, value: Value) -> Result<(), AppError> {
        let mut entries = self.read_all().unwrap_or_else(|e| {
            log::warn!("Discarding unreadable preferences at {}: {}", self.path.display(), e);
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(&entries)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory store; clones share the same entries.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, Value>>>,
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Value>, AppError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: Value) -> Result<(), AppError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn temp_store() -> (JsonFileStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("montag_prefs_{}", Uuid::new_v4()));
        (JsonFileStore::new(dir.join("preferences.json")), dir)
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let (store, _dir) = temp_store();
        assert_eq!(store.read("anything").unwrap(), None);
    }

    #[test]
    fn writes_keep_other_keys() {
        let (store, dir) = temp_store();
        store.write("a", json!(1)).unwrap();
        store.write("b", json!({ "nested": true })).unwrap();
        store.write("a", json!(2)).unwrap();

        assert_eq!(store.read("a").unwrap(), Some(json!(2)));
        assert_eq!(store.read("b").unwrap(), Some(json!({ "nested": true })));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn corrupt_file_is_an_error_on_read_and_replaced_on_write() {
        let (store, dir) = temp_store();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(store.path(), "{ not json").unwrap();

        assert!(store.read("a").is_err());
        store.write("a", json!(true)).unwrap();
        assert_eq!(store.read("a").unwrap(), Some(json!(true)));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn memory_store_clones_share_entries() {
        let store = MemoryStore::default();
        let other = store.clone();
        store.write("k", json!("v")).unwrap();
        assert_eq!(other.read("k").unwrap(), Some(json!("v")));
    }
}
