//! Key-value persistence for the host registry.
//!
//! The registry is stored as a single serialized value under one key, so the
//! store only needs whole-value reads and writes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read store {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("Failed to write store {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },

    #[error("Store contents are corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Abstract string key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
}

/// JSON file holding a flat `{ key: value }` object
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path).await {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(StorageError::Read { path: self.path.clone(), source }),
        }
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = self.read_all().await?;
        entries.insert(key.to_string(), value);
        let raw = serde_json::to_string_pretty(&entries)?;

        let write_err = |source| StorageError::Write { path: self.path.clone(), source };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(write_err)?;
        }
        fs::write(&self.path, raw).await.map_err(write_err)?;

        tracing::debug!(path = %self.path.display(), key, "Store updated");
        Ok(())
    }
}

/// Process-local store
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_store_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store.json"));

        assert_eq!(store.get("serverList").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_set_then_get() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("deep/store.json"));

        store.set("serverList", "[]".into()).await.unwrap();
        store.set("other", "x".into()).await.unwrap();

        assert_eq!(store.get("serverList").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get("other").await.unwrap().as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn test_file_store_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = FileStore::new(&path);

        assert!(matches!(store.get("serverList").await, Err(StorageError::Corrupt(_))));
    }

    #[tokio::test]
    async fn test_memory_store_overwrites() {
        let store = MemoryStore::new();
        store.set("k", "1".into()).await.unwrap();
        store.set("k", "2".into()).await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("2"));
    }
}
