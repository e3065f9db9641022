//! Store error types.

use thiserror::Error;

/// Errors that can occur when reading or writing the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing store could not be reached (no window, storage disabled).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Failed to serialize a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Filesystem failure in the file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend rejected the operation (quota exceeded, poisoned lock).
    #[error("Store operation failed: {0}")]
    Backend(String),
}
