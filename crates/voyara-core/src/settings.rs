// SPDX-License-Identifier: AGPL-3.0
// Voyara Core - Key-value settings persistence
//
// Each namespace is one local JSON object file of string values.
// No cloud sync, no tracking, just simple local persistence.

use crate::types::AppError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// String key-value storage that drafts and sessions are layered on
pub trait KeyValueStore: Send + Sync {
    fn get_string(&self, key: &str) -> Result<Option<String>, AppError>;
    fn put_string(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&self, key: &str) -> Result<(), AppError>;
    fn clear(&self) -> Result<(), AppError>;

    /// Write several entries as one update; on error none of them are stored
    fn put_many(&self, entries: &[(&str, &str)]) -> Result<(), AppError>;

    fn contains(&self, key: &str) -> Result<bool, AppError> {
        Ok(self.get_string(key)?.is_some())
    }
}

fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory cache of one namespace, persisted to disk on changes
pub struct SettingsStore {
    values: RwLock<BTreeMap<String, String>>,
    file_path: PathBuf,
}

impl SettingsStore {
    /// Open a namespace in the default config directory
    pub fn open(namespace: &str) -> Result<Self, AppError> {
        Self::open_in(&crate::default_data_dir()?, namespace)
    }

    /// Open a namespace under `dir`, loading from disk if available
    pub fn open_in(dir: &Path, namespace: &str) -> Result<Self, AppError> {
        fs::create_dir_all(dir)
            .map_err(|e| AppError::FileIo(format!("Failed to create config dir: {}", e)))?;
        let file_path = dir.join(format!("{}.json", namespace));
        tracing::debug!("Settings file path: {:?}", file_path);

        let values = if file_path.exists() {
            let content = fs::read_to_string(&file_path)
                .map_err(|e| AppError::FileIo(format!("Failed to read settings: {}", e)))?;

            serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse {} settings, starting fresh: {}", namespace, e);
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            values: RwLock::new(values),
            file_path,
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Persist the namespace to disk
    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), AppError> {
        let content = serde_json::to_string_pretty(values)
            .map_err(|e| AppError::Serialization(format!("Failed to serialize settings: {}", e)))?;

        fs::write(&self.file_path, content)
            .map_err(|e| AppError::FileIo(format!("Failed to write settings: {}", e)))?;

        Ok(())
    }
}

impl KeyValueStore for SettingsStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(read_lock(&self.values).get(key).cloned())
    }

    fn put_string(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.put_many(&[(key, value)])
    }

    fn put_many(&self, entries: &[(&str, &str)]) -> Result<(), AppError> {
        let mut values = write_lock(&self.values);
        let mut updated = values.clone();
        for (key, value) in entries {
            updated.insert(key.to_string(), value.to_string());
        }
        // Cache only changes once the file is written
        self.persist(&updated)?;
        *values = updated;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut values = write_lock(&self.values);
        if values.remove(key).is_some() {
            self.persist(&values)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        let mut values = write_lock(&self.values);
        values.clear();
        self.persist(&values)
    }
}

/// Volatile store, used for ephemeral sessions and tests
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(read_lock(&self.values).get(key).cloned())
    }

    fn put_string(&self, key: &str, value: &str) -> Result<(), AppError> {
        write_lock(&self.values).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn put_many(&self, entries: &[(&str, &str)]) -> Result<(), AppError> {
        let mut values = write_lock(&self.values);
        for (key, value) in entries {
            values.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        write_lock(&self.values).remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        write_lock(&self.values).clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        {
            let store = SettingsStore::open_in(&dir, "prefs").unwrap();
            store.put_string("theme", "dark").unwrap();
            store.put_string("lang", "en").unwrap();
            store.remove("lang").unwrap();
        }

        let store = SettingsStore::open_in(&dir, "prefs").unwrap();
        assert_eq!(store.get_string("theme").unwrap().as_deref(), Some("dark"));
        assert!(!store.contains("lang").unwrap());
    }

    #[test]
    fn test_namespaces_are_separate_files() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        let a = SettingsStore::open_in(&dir, "a").unwrap();
        let b = SettingsStore::open_in(&dir, "b").unwrap();
        a.put_string("key", "1").unwrap();
        assert_eq!(b.get_string("key").unwrap(), None);
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_corrupt_file_starts_fresh() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("broken.json"), "{not json").unwrap();

        let store = SettingsStore::open_in(&dir, "broken").unwrap();
        assert_eq!(store.get_string("anything").unwrap(), None);
        store.put_string("anything", "ok").unwrap();
        assert_eq!(store.get_string("anything").unwrap().as_deref(), Some("ok"));
    }

    #[test]
    fn test_memory_store_clear() {
        let store = MemoryStore::new();
        store.put_string("a", "1").unwrap();
        store.put_string("b", "2").unwrap();
        store.clear().unwrap();
        assert!(!store.contains("a").unwrap());
        assert!(!store.contains("b").unwrap());
    }
}
