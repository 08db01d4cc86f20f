//! Error types for local store operations.

use std::io;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur writing to or reading the local store.
///
/// Parse failures on load are deliberately absent: a collection that fails
/// to parse is treated as empty, never as an error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error occurred (file backend, quota exceeded).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A record failed to serialize for saving.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
