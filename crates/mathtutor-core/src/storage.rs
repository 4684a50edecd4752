//! Best-effort persistence helpers and an in-memory [`KeyValueStore`].
//!
//! Reads and writes through these helpers never fail the caller: errors are
//! logged and the in-memory state stays authoritative for the session.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::error::StorageError;
use crate::traits::KeyValueStore;

/// Storage key for solved records and task status marks.
pub const PROGRESS_KEY: &str = "math_tutor_progress";
/// Storage key for cached user statistics.
pub const STATS_KEY: &str = "math_tutor_stats";

/// Load a document, falling back to `T::default()` when it is missing,
/// unreadable or corrupt.
pub fn load_document<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(doc) => {
                debug!(backend = store.name(), key, "loaded document");
                doc
            }
            Err(source) => {
                let err = StorageError::Corrupt {
                    key: key.to_string(),
                    source,
                };
                warn!(backend = store.name(), error = %err, "ignoring stored document");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            error!(backend = store.name(), key, error = %e, "failed to read document");
            T::default()
        }
    }
}

/// Serialize and write a whole document. Returns `false` if the write failed.
pub fn persist_document<T: Serialize>(store: &dyn KeyValueStore, key: &str, doc: &T) -> bool {
    let json = match serde_json::to_string(doc) {
        Ok(json) => json,
        Err(e) => {
            error!(key, error = %e, "failed to serialize document");
            return false;
        }
    };
    match store.set(key, &json) {
        Ok(()) => true,
        Err(e) => {
            error!(backend = store.name(), key, error = %e, "failed to persist document");
            false
        }
    }
}

/// Delete a document. Returns `false` if the backend refused.
pub fn remove_document(store: &dyn KeyValueStore, key: &str) -> bool {
    match store.remove(key) {
        Ok(()) => true,
        Err(e) => {
            error!(backend = store.name(), key, error = %e, "failed to remove document");
            false
        }
    }
}

/// Volatile store backed by a `HashMap`.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    reject_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail with [`StorageError::QuotaExceeded`].
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StorageError::QuotaExceeded(key.to_string()));
        }
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock().remove(key);
        Ok(())
    }
}
