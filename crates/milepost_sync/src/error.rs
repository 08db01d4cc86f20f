//! Error types for the coordinator.

use milepost_store::StoreError;
use thiserror::Error;

/// Result type for coordinator operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can escape the coordinator.
///
/// Remote failures never appear here - they are caught and superseded by
/// the local fallback. The only fatal path is a create flow whose local
/// write also fails, leaving nothing persisted.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The local store could not satisfy a write.
    #[error("local store error: {0}")]
    Store(#[from] StoreError),
}
