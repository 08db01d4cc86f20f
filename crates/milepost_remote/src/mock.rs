//! In-memory remote store for testing.

use crate::error::{RemoteError, RemoteResult};
use crate::remote::RemoteStore;
use milepost_model::{time, Entry, User, UserPatch};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// An in-memory remote with real table semantics.
///
/// Behaves like the hosted service: unique email/username constraints on
/// user inserts, server-assigned ids and creation timestamps on entry
/// inserts, newest-first listing. `set_failing(true)` makes every call
/// fail with a retryable transport error, which is how tests exercise the
/// coordinator's fallback paths.
///
/// # Example
///
/// ```rust
/// use milepost_remote::{MockRemote, RemoteStore};
/// use milepost_model::User;
///
/// let remote = MockRemote::new();
/// remote.create_user(&User::new("alice", "a@x.com", "p1", "Alice")).unwrap();
/// remote.set_failing(true);
/// assert!(remote.user_by_identifier("a@x.com").is_err());
/// ```
#[derive(Debug, Default)]
pub struct MockRemote {
    failing: AtomicBool,
    users: RwLock<Vec<User>>,
    entries: RwLock<Vec<Entry>>,
    next_id: AtomicU64,
}

impl MockRemote {
    /// Creates a new empty mock remote.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Seeds a user row directly, bypassing constraints.
    pub fn seed_user(&self, user: User) {
        self.users.write().push(user);
    }

    /// Seeds an entry row directly.
    pub fn seed_entry(&self, entry: Entry) {
        self.entries.write().push(entry);
    }

    /// Returns a snapshot of the users table.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.users.read().clone()
    }

    /// Returns a snapshot of the entries table.
    #[must_use]
    pub fn entries(&self) -> Vec<Entry> {
        self.entries.read().clone()
    }

    fn check_available(&self) -> RemoteResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(RemoteError::http_retryable("mock remote set to fail"))
        } else {
            Ok(())
        }
    }

    fn assign_id(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        format!("srv-{n}")
    }
}

impl RemoteStore for MockRemote {
    fn create_user(&self, user: &User) -> RemoteResult<User> {
        self.check_available()?;
        let mut users = self.users.write();
        if users
            .iter()
            .any(|u| u.email == user.email || u.username == user.username)
        {
            return Err(RemoteError::Constraint(format!(
                "duplicate identity for {}",
                user.email
            )));
        }
        users.push(user.clone());
        Ok(user.clone())
    }

    fn user_by_identifier(&self, identifier: &str) -> RemoteResult<Option<User>> {
        self.check_available()?;
        // The service looks up by the unique email column only.
        Ok(self
            .users
            .read()
            .iter()
            .find(|u| u.email == identifier)
            .cloned())
    }

    fn update_user(&self, id: &str, patch: &UserPatch) -> RemoteResult<User> {
        self.check_available()?;
        let mut users = self.users.write();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| RemoteError::http_fatal(format!("update matched no row for id {id}")))?;
        user.apply(patch);
        Ok(user.clone())
    }

    fn create_entry(&self, entry: &Entry) -> RemoteResult<Entry> {
        self.check_available()?;
        let mut stored = entry.clone();
        stored.id = self.assign_id();
        stored.created_at = time::now_iso();
        self.entries.write().push(stored.clone());
        Ok(stored)
    }

    fn entries_for_user(&self, user_id: &str) -> RemoteResult<Vec<Entry>> {
        self.check_available()?;
        let mut entries: Vec<Entry> = self
            .entries
            .read()
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.created_at_ts().cmp(&a.created_at_ts()));
        Ok(entries)
    }
}
