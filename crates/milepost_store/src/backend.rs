//! Store backend trait definition.

use crate::error::StoreResult;

/// A synchronous string key/value backend.
///
/// Backends are **opaque string stores**. They do not interpret the values
/// they hold; [`crate::LocalStore`] owns the JSON collection format and the
/// key names.
///
/// # Invariants
///
/// - `get` returns exactly the value last `put` under that key
/// - A key never written (or removed) reads as `None`
/// - Backends must be `Send + Sync` for shared access
///
/// There is no cross-process locking: two writers saving the same key race
/// and the later write wins.
///
/// # Implementors
///
/// - [`crate::MemoryBackend`] - For tests
/// - [`crate::FileBackend`] - For persistent storage
pub trait StoreBackend: Send + Sync {
    /// Reads the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (I/O failure, quota).
    fn put(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes the value stored under `key`. Removing an absent key is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails.
    fn remove(&self, key: &str) -> StoreResult<()>;
}
