//! Storage errors.

use thiserror::Error;

/// Failure of a storage backend or of the JSON layer above it.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backend could not be opened (missing directory, unknown store).
    #[error("Failed to open store: {0}")]
    OpenError(String),

    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// A read, write or delete was refused by the backend.
    #[error("Store operation failed: {0}")]
    StoreError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key contains characters the backend cannot store.
    #[error("Invalid key {0:?}")]
    InvalidKey(String),
}
