//! mathtutor-storage: Durable backends for mathtutor.
//!
//! Provides the on-disk [`FileStore`], catalog sources for local files and
//! HTTP endpoints, and TOML configuration loading.

pub mod config;
pub mod file;
pub mod source;

pub use config::{load_config_from, TimezonePolicy, TutorConfig};
pub use file::FileStore;
pub use source::{catalog_source_for, FileCatalogSource, HttpCatalogSource};
