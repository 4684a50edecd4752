//! Error types for the tutor core.
//!
//! Storage and catalog errors are defined here rather than in the backend
//! crate so the `Tutor` can log and classify them without string matching.

use thiserror::Error;

/// Errors raised by a key-value storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be read or written.
    #[error("storage I/O error on key '{key}': {message}")]
    Io { key: String, message: String },

    /// The stored document is not valid JSON for the expected shape.
    #[error("corrupt document under key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backend refused the write because it is full.
    #[error("storage quota exceeded while writing '{0}'")]
    QuotaExceeded(String),

    /// Storage is disabled or not available at all.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while fetching or validating the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog source answered with a non-success HTTP status.
    #[error("catalog request failed (HTTP {status}): {url}")]
    HttpStatus { status: u16, url: String },

    /// The catalog could not be fetched at all.
    #[error("failed to fetch catalog from {location}: {message}")]
    Fetch { location: String, message: String },

    /// The document is not a catalog.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// The catalog parsed but breaks a structural rule.
    #[error("invalid catalog: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Errors raised by progress import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The input is not JSON at all.
    #[error("import file is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    /// A required top-level key is absent.
    #[error("import file is missing the '{0}' section")]
    MissingKey(&'static str),

    /// A section is present but has the wrong shape.
    #[error("import section '{section}' is invalid: {source}")]
    InvalidSection {
        section: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors surfaced by `Tutor` operations.
#[derive(Debug, Error)]
pub enum TutorError {
    /// The operation needs the catalog, which failed to load.
    #[error("the task catalog is not loaded; practice and progress views are unavailable")]
    CatalogUnavailable,

    /// No offered task matches the given key.
    #[error("task not found: {0}")]
    TaskNotFound(String),

    /// The submitted answer was blank.
    #[error("please enter an answer")]
    EmptyAnswer,

    /// Progress import was rejected; nothing was applied.
    #[error(transparent)]
    Import(#[from] ImportError),
}
