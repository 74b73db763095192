//! In-process counter store with optional JSON snapshots.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use async_trait::async_trait;
use dashmap::DashMap;
use tempfile::NamedTempFile;

use crate::storage::{CounterStore, KeyState, Status, StorageError};

/// A thread-safe store keeping every key's state in a shared map.
///
/// Clones share the same map, so one store can back several breakers.
/// Counter updates take the key's shard lock for the whole
/// read-modify-write, which makes increment and decrement atomic.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<String, KeyState>>,
    persistence_path: Option<PathBuf>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that saves to `path` on `save_to_file`.
    pub fn with_persistence(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            persistence_path: Some(path.into()),
        }
    }

    /// Load from a snapshot file if it exists, otherwise start empty.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let store = Self::with_persistence(path);
        if path.exists() {
            let reader = BufReader::new(File::open(path)?);
            let map: HashMap<String, KeyState> = serde_json::from_reader(reader)?;
            for (key, state) in map {
                store.inner.insert(key, state);
            }
            tracing::info!(path = %path.display(), keys = store.inner.len(), "Loaded breaker snapshot");
        }
        Ok(store)
    }

    /// Write every key to the snapshot file. No-op without a persistence path.
    ///
    /// The snapshot is written to a temporary file next to the target and
    /// renamed over it, so readers see either the old or the new snapshot.
    pub fn save_to_file(&self) -> Result<(), StorageError> {
        if let Some(path) = &self.persistence_path {
            let map: HashMap<String, KeyState> = self
                .inner
                .iter()
                .map(|r| (r.key().clone(), r.value().clone()))
                .collect();

            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let mut tmp = NamedTempFile::new_in(dir)?;
            {
                let mut writer = BufWriter::new(tmp.as_file_mut());
                serde_json::to_writer_pretty(&mut writer, &map)?;
                writer.flush()?;
            }
            tmp.as_file().sync_all()?;
            tmp.persist(path).map_err(|e| e.error)?;
            tracing::info!(path = %path.display(), keys = map.len(), "Saved breaker snapshot");
        }
        Ok(())
    }

    /// State of a key, or the fresh-key default.
    pub fn snapshot(&self, key: &str) -> KeyState {
        self.inner
            .get(key)
            .map(|r| r.value().clone())
            .unwrap_or_default()
    }

    /// Keys that have been written at least once, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.inner.iter().map(|r| r.key().clone()).collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl CounterStore for MemoryStore {
    async fn increment_failure_count(&self, key: &str) -> Result<(), StorageError> {
        let mut entry = self.inner.entry(key.to_owned()).or_default();
        entry.failure_count = entry.failure_count.saturating_add(1);
        Ok(())
    }

    async fn decrement_failure_count(&self, key: &str) -> Result<(), StorageError> {
        let mut entry = self.inner.entry(key.to_owned()).or_default();
        entry.failure_count = entry.failure_count.saturating_sub(1);
        Ok(())
    }

    async fn set_failure_count(&self, key: &str, value: u64) -> Result<(), StorageError> {
        self.inner.entry(key.to_owned()).or_default().failure_count = value;
        Ok(())
    }

    async fn get_failure_count(&self, key: &str) -> Result<u64, StorageError> {
        Ok(self.inner.get(key).map(|r| r.failure_count).unwrap_or(0))
    }

    async fn set_last_failure_time(&self, key: &str, at: SystemTime) -> Result<(), StorageError> {
        self.inner.entry(key.to_owned()).or_default().last_failure_time = Some(at);
        Ok(())
    }

    async fn get_last_failure_time(&self, key: &str) -> Result<Option<SystemTime>, StorageError> {
        Ok(self.inner.get(key).and_then(|r| r.last_failure_time))
    }

    async fn set_status(&self, key: &str, status: Status) -> Result<(), StorageError> {
        self.inner.entry(key.to_owned()).or_default().status = status;
        Ok(())
    }

    async fn get_status(&self, key: &str) -> Result<Status, StorageError> {
        Ok(self.inner.get(key).map(|r| r.status).unwrap_or_default())
    }

    async fn reset(&self) -> Result<(), StorageError> {
        self.inner.clear();
        Ok(())
    }
}
