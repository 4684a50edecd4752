//! Trait definitions for storage backends and catalog sources.
//!
//! Concrete implementations live in `mathtutor-storage`; the in-memory store
//! used by tests and embedders lives in [`crate::storage`].

use async_trait::async_trait;

use crate::error::{CatalogError, StorageError};
use crate::model::Catalog;

// ---------------------------------------------------------------------------
// Key-value storage
// ---------------------------------------------------------------------------

/// Durable string key-value storage, one whole document per key.
///
/// Writes overwrite the full value. There is no merge and no versioning: when
/// two writers share a backend, the last write wins.
pub trait KeyValueStore: Send + Sync {
    /// Human-readable backend name (e.g. "file").
    fn name(&self) -> &str;

    /// Read the value under `key`, `Ok(None)` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// Catalog source
// ---------------------------------------------------------------------------

/// Where the task catalog comes from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable location (path or URL) for logs and errors.
    fn location(&self) -> &str;

    /// Fetch and validate the catalog.
    async fn load(&self) -> Result<Catalog, CatalogError>;
}
