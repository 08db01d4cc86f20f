//! Remote store trait definition.

use crate::error::{RemoteError, RemoteResult};
use milepost_model::{Entry, User, UserPatch};

/// The remote side of the dual-write design.
///
/// One logical table per record type. Every operation makes a single
/// attempt and may fail with [`RemoteError`]; the synchronization
/// coordinator treats any failure as "remote unavailable" and falls back
/// to the local store. Implementations own the wire-format mapping -
/// callers only ever see the model types.
///
/// # Implementors
///
/// - [`crate::RestRemote`] - HTTP against the hosted service
/// - [`crate::DisabledRemote`] - Installed when credentials are absent
/// - [`crate::MockRemote`] - In-memory tables for tests
pub trait RemoteStore: Send + Sync {
    /// Inserts a user row.
    ///
    /// The service may apply defaults (generated timestamps); the returned
    /// record carries the input merged with whatever the service assigned.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, rejected credentials, or a duplicate
    /// email/username (unique constraint).
    fn create_user(&self, user: &User) -> RemoteResult<User>;

    /// Looks a user up by their unique email.
    ///
    /// Returns `Ok(None)` when no row matches - that is a result, not an
    /// error.
    ///
    /// # Errors
    ///
    /// Fails on transport or auth errors.
    fn user_by_identifier(&self, identifier: &str) -> RemoteResult<Option<User>>;

    /// Applies a typed partial update to a user row.
    ///
    /// Only the fields present on [`UserPatch`] can be persisted; the
    /// remote schema is narrower than the full record.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or when the id matches no row.
    fn update_user(&self, id: &str, patch: &UserPatch) -> RemoteResult<User>;

    /// Inserts an entry row.
    ///
    /// The client-side id placeholder and creation timestamp are not sent;
    /// the returned record carries the server-assigned values, which
    /// supersede the placeholders everywhere.
    ///
    /// # Errors
    ///
    /// Fails on transport or auth errors.
    fn create_entry(&self, entry: &Entry) -> RemoteResult<Entry>;

    /// Lists a user's entries, newest first.
    ///
    /// Never partial: either the full set or an error.
    ///
    /// # Errors
    ///
    /// Fails on transport or auth errors.
    fn entries_for_user(&self, user_id: &str) -> RemoteResult<Vec<Entry>>;
}

impl<R: RemoteStore + ?Sized> RemoteStore for Box<R> {
    fn create_user(&self, user: &User) -> RemoteResult<User> {
        (**self).create_user(user)
    }

    fn user_by_identifier(&self, identifier: &str) -> RemoteResult<Option<User>> {
        (**self).user_by_identifier(identifier)
    }

    fn update_user(&self, id: &str, patch: &UserPatch) -> RemoteResult<User> {
        (**self).update_user(id, patch)
    }

    fn create_entry(&self, entry: &Entry) -> RemoteResult<Entry> {
        (**self).create_entry(entry)
    }

    fn entries_for_user(&self, user_id: &str) -> RemoteResult<Vec<Entry>> {
        (**self).entries_for_user(user_id)
    }
}

/// A remote store that fails every call.
///
/// Installed at startup when the URL or API key is missing from the
/// environment, so the process degrades to local-only operation instead
/// of crashing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledRemote;

impl RemoteStore for DisabledRemote {
    fn create_user(&self, _user: &User) -> RemoteResult<User> {
        Err(RemoteError::Disabled)
    }

    fn user_by_identifier(&self, _identifier: &str) -> RemoteResult<Option<User>> {
        Err(RemoteError::Disabled)
    }

    fn update_user(&self, _id: &str, _patch: &UserPatch) -> RemoteResult<User> {
        Err(RemoteError::Disabled)
    }

    fn create_entry(&self, _entry: &Entry) -> RemoteResult<Entry> {
        Err(RemoteError::Disabled)
    }

    fn entries_for_user(&self, _user_id: &str) -> RemoteResult<Vec<Entry>> {
        Err(RemoteError::Disabled)
    }
}
