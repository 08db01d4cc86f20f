//! Typed collection layer over a store backend.

use crate::backend::StoreBackend;
use crate::error::StoreResult;
use milepost_model::{Entry, User};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// Key under which the users collection is stored.
pub const USERS_KEY: &str = "milepost_users";
/// Key under which the entries collection is stored.
pub const ENTRIES_KEY: &str = "milepost_entries";
/// Key under which the current session's user record is stored.
pub const SESSION_KEY: &str = "milepost_session";

/// Typed access to the local collections.
///
/// `LocalStore` owns the JSON format and the collection keys; the backend
/// underneath only sees opaque strings. Loads never fail: a missing or
/// unparseable collection is empty. Saves overwrite the whole collection
/// and propagate backend errors.
///
/// The store has no awareness of the remote side - reconciliation between
/// the two stores is the coordinator's job.
pub struct LocalStore<B: StoreBackend> {
    backend: B,
}

impl<B: StoreBackend> LocalStore<B> {
    /// Creates a store over the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key, error = %e, "local read failed, treating collection as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(key, error = %e, "corrupt local collection, treating as empty");
                Vec::new()
            }
        }
    }

    fn save_collection<T: Serialize>(&self, key: &str, records: &[T]) -> StoreResult<()> {
        let raw = serde_json::to_string(records)?;
        self.backend.put(key, &raw)
    }

    /// Loads all cached users.
    pub fn load_users(&self) -> Vec<User> {
        self.load_collection(USERS_KEY)
    }

    /// Overwrites the users collection.
    ///
    /// # Errors
    ///
    /// Propagates backend write failures.
    pub fn save_users(&self, users: &[User]) -> StoreResult<()> {
        self.save_collection(USERS_KEY, users)
    }

    /// Appends a user, replacing any cached record with the same id.
    ///
    /// # Errors
    ///
    /// Propagates backend write failures.
    pub fn append_user(&self, user: &User) -> StoreResult<()> {
        let mut users = self.load_users();
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        self.save_users(&users)
    }

    /// Loads all cached entries, across every user.
    pub fn load_entries(&self) -> Vec<Entry> {
        self.load_collection(ENTRIES_KEY)
    }

    /// Overwrites the entries collection.
    ///
    /// # Errors
    ///
    /// Propagates backend write failures.
    pub fn save_entries(&self, entries: &[Entry]) -> StoreResult<()> {
        self.save_collection(ENTRIES_KEY, entries)
    }

    /// Inserts an entry at the front of the collection, replacing any
    /// cached record with the same id first.
    ///
    /// # Errors
    ///
    /// Propagates backend write failures.
    pub fn prepend_entry(&self, entry: &Entry) -> StoreResult<()> {
        let mut entries = self.load_entries();
        entries.retain(|e| e.id != entry.id);
        entries.insert(0, entry.clone());
        self.save_entries(&entries)
    }

    /// Returns the current session's user record, if one is stored.
    pub fn session_user(&self) -> Option<User> {
        let raw = match self.backend.get(SESSION_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "session read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "corrupt session record, ignoring");
                None
            }
        }
    }

    /// Stores the current session's user record.
    ///
    /// # Errors
    ///
    /// Propagates backend write failures.
    pub fn set_session_user(&self, user: &User) -> StoreResult<()> {
        let raw = serde_json::to_string(user)?;
        self.backend.put(SESSION_KEY, &raw)
    }

    /// Removes the current session's user record.
    ///
    /// # Errors
    ///
    /// Propagates backend write failures.
    pub fn clear_session(&self) -> StoreResult<()> {
        self.backend.remove(SESSION_KEY)
    }
}
