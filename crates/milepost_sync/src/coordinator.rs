//! The synchronization coordinator.

use crate::error::SyncResult;
use crate::merge;
use crate::outcome::{Persistence, Synced};
use milepost_model::{badges_for_entries, Badge, Entry, User, UserPatch, UserStats};
use milepost_remote::RemoteStore;
use milepost_store::{LocalStore, StoreBackend};
use tracing::{debug, warn};

/// Decides remote-vs-local ordering, performs fallback, and merges result
/// sets.
///
/// The coordinator owns the reconciliation logic; the two adapters each
/// own their storage and are unaware of each other. Both are injected, so
/// there is no ambient global state - every caller that needs persistence
/// goes through an explicit instance.
///
/// # Example
///
/// ```rust
/// use milepost_sync::SyncCoordinator;
/// use milepost_store::{LocalStore, MemoryBackend};
/// use milepost_remote::MockRemote;
/// use milepost_model::User;
///
/// let coordinator = SyncCoordinator::new(
///     MockRemote::new(),
///     LocalStore::new(MemoryBackend::new()),
/// );
/// let created = coordinator
///     .create_user(User::new("alice", "a@x.com", "p1", "Alice"))
///     .unwrap();
/// assert!(created.is_cloud_backed());
/// ```
pub struct SyncCoordinator<R: RemoteStore, B: StoreBackend> {
    remote: R,
    local: LocalStore<B>,
}

impl<R: RemoteStore, B: StoreBackend> SyncCoordinator<R, B> {
    /// Creates a coordinator over the two injected stores.
    pub fn new(remote: R, local: LocalStore<B>) -> Self {
        Self { remote, local }
    }

    /// Returns the local store.
    pub fn local(&self) -> &LocalStore<B> {
        &self.local
    }

    /// Returns the remote store.
    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Creates a user, remote first.
    ///
    /// On remote success the service-confirmed record is cached locally
    /// best-effort and returned. On remote failure the input is persisted
    /// locally and returned unchanged; [`Synced::persisted_to`] is how the
    /// caller tells the two apart.
    ///
    /// # Errors
    ///
    /// Fails only when the remote is unavailable **and** the local write
    /// fails - the one case with nothing persisted at all.
    pub fn create_user(&self, user: User) -> SyncResult<Synced<User>> {
        match self.remote.create_user(&user) {
            Ok(confirmed) => {
                let persisted_to = match self.local.append_user(&confirmed) {
                    Ok(()) => Persistence::Both,
                    Err(e) => {
                        warn!(error = %e, "local backup write failed after remote create");
                        Persistence::Remote
                    }
                };
                debug!(id = %confirmed.id, "user created in remote store");
                Ok(Synced::new(confirmed, persisted_to))
            }
            Err(e) => {
                warn!(error = %e, "remote user create failed, using local fallback");
                self.local.append_user(&user)?;
                Ok(Synced::new(user, Persistence::Local))
            }
        }
    }

    /// Authenticates by email or username plus exact password match.
    ///
    /// Remote lookup first; any miss, mismatch, or failure falls back to
    /// scanning the local users collection. `None` is the sentinel for
    /// invalid credentials - infrastructure failure never surfaces from
    /// login. A successful login caches the record as the session user.
    pub fn login_user(&self, identifier: &str, password: &str) -> Option<User> {
        match self.remote.user_by_identifier(identifier) {
            Ok(Some(user)) if user.password == password => {
                debug!(id = %user.id, "remote login succeeded");
                self.cache_session(&user);
                return Some(user);
            }
            Ok(_) => debug!("no remote credential match, checking local"),
            Err(e) => warn!(error = %e, "remote login failed, trying local fallback"),
        }

        let user = self
            .local
            .load_users()
            .into_iter()
            .find(|u| u.matches_identifier(identifier) && u.password == password)?;
        debug!(id = %user.id, "local login succeeded, limited to this device");
        self.cache_session(&user);
        Some(user)
    }

    /// Records an entry, remote first.
    ///
    /// On remote success the server-assigned id and creation timestamp
    /// supersede the client placeholders, both in the returned record and
    /// in the local cache. On remote failure the entry is cached locally
    /// with its placeholders intact.
    ///
    /// # Errors
    ///
    /// Fails only when both stores reject the write.
    pub fn create_entry(&self, entry: Entry) -> SyncResult<Synced<Entry>> {
        match self.remote.create_entry(&entry) {
            Ok(confirmed) => {
                let persisted_to = match self.local.prepend_entry(&confirmed) {
                    Ok(()) => Persistence::Both,
                    Err(e) => {
                        warn!(error = %e, "local cache write failed after remote create");
                        Persistence::Remote
                    }
                };
                debug!(id = %confirmed.id, "entry created in remote store");
                Ok(Synced::new(confirmed, persisted_to))
            }
            Err(e) => {
                warn!(error = %e, "remote entry create failed, using local fallback");
                self.local.prepend_entry(&entry)?;
                Ok(Synced::new(entry, Persistence::Local))
            }
        }
    }

    /// Lists a user's entries, newest first.
    ///
    /// On remote success the result is unioned with this user's locally
    /// cached entries (remote copy wins on an id collision) and the cache's
    /// slice for this user is replaced with the merged set - other users'
    /// cached entries are untouched. On remote failure the local subset is
    /// returned in the same order. Reads never error; a failed local parse
    /// degrades to an empty result.
    pub fn entries_for_user(&self, user_id: &str) -> Vec<Entry> {
        match self.remote.entries_for_user(user_id) {
            Ok(remote_entries) => {
                debug!(count = remote_entries.len(), "loaded entries from remote store");
                let cache = self.local.load_entries();
                let merged = merge::merge_user_entries(remote_entries, &cache, user_id);
                let updated = merge::replace_user_entries(cache, user_id, &merged);
                if let Err(e) = self.local.save_entries(&updated) {
                    warn!(error = %e, "entry cache refresh failed");
                }
                merged
            }
            Err(e) => {
                warn!(error = %e, "remote entry list failed, using local cache");
                let mut entries: Vec<Entry> = self
                    .local
                    .load_entries()
                    .into_iter()
                    .filter(|entry| entry.user_id == user_id)
                    .collect();
                merge::sort_newest_first(&mut entries);
                entries
            }
        }
    }

    /// Applies a typed partial update, remote first.
    ///
    /// On remote success the updated record is written through to the
    /// local users collection and session record best-effort. On remote
    /// failure the patch is applied to the locally cached record. Returns
    /// `None` when the id is unknown to whichever store answered.
    ///
    /// # Errors
    ///
    /// Fails when the fallback path cannot save the patched collection.
    pub fn update_user(&self, id: &str, patch: &UserPatch) -> SyncResult<Option<Synced<User>>> {
        match self.remote.update_user(id, patch) {
            Ok(updated) => {
                let persisted_to = match self.local.append_user(&updated) {
                    Ok(()) => Persistence::Both,
                    Err(e) => {
                        warn!(error = %e, "local write-through failed after remote update");
                        Persistence::Remote
                    }
                };
                self.refresh_session(&updated);
                Ok(Some(Synced::new(updated, persisted_to)))
            }
            Err(e) => {
                warn!(error = %e, "remote user update failed, patching local record");
                let mut users = self.local.load_users();
                let Some(user) = users.iter_mut().find(|u| u.id == id) else {
                    return Ok(None);
                };
                user.apply(patch);
                let updated = user.clone();
                self.local.save_users(&users)?;
                self.refresh_session(&updated);
                Ok(Some(Synced::new(updated, Persistence::Local)))
            }
        }
    }

    /// Probes for an existing identity by email or username.
    ///
    /// Used by registration callers to reject duplicates before calling
    /// [`Self::create_user`]. Password is not checked.
    pub fn lookup_user(&self, identifier: &str) -> Option<User> {
        match self.remote.user_by_identifier(identifier) {
            Ok(Some(user)) => return Some(user),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "remote lookup failed, scanning local users"),
        }
        self.local
            .load_users()
            .into_iter()
            .find(|u| u.matches_identifier(identifier))
    }

    /// Returns the current session's user record.
    pub fn current_user(&self) -> Option<User> {
        self.local.session_user()
    }

    /// Stores the session user record.
    ///
    /// # Errors
    ///
    /// Propagates local write failures.
    pub fn set_current_user(&self, user: &User) -> SyncResult<()> {
        self.local.set_session_user(user)?;
        Ok(())
    }

    /// Clears the session record.
    ///
    /// # Errors
    ///
    /// Propagates local write failures.
    pub fn logout(&self) -> SyncResult<()> {
        self.local.clear_session()?;
        Ok(())
    }

    /// Recomputes the badge view from the user's entry count.
    pub fn badges_for_user(&self, user_id: &str) -> Vec<Badge> {
        badges_for_entries(&self.entries_for_user(user_id))
    }

    /// Recomputes aggregate statistics from the user's entries.
    pub fn stats_for_user(&self, user_id: &str) -> UserStats {
        UserStats::compute(&self.entries_for_user(user_id))
    }

    fn cache_session(&self, user: &User) {
        if let Err(e) = self.local.set_session_user(user) {
            warn!(error = %e, "session cache write failed");
        }
    }

    fn refresh_session(&self, user: &User) {
        if self
            .local
            .session_user()
            .is_some_and(|session| session.id == user.id)
        {
            self.cache_session(user);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use milepost_remote::MockRemote;
    use milepost_store::MemoryBackend;

    fn coordinator() -> SyncCoordinator<MockRemote, MemoryBackend> {
        SyncCoordinator::new(MockRemote::new(), LocalStore::new(MemoryBackend::new()))
    }

    #[test]
    fn create_user_reaches_both_stores() {
        let coordinator = coordinator();
        let created = coordinator
            .create_user(User::new("alice", "a@x.com", "p1", "Alice"))
            .unwrap();

        assert_eq!(created.persisted_to, Persistence::Both);
        assert_eq!(coordinator.remote().users().len(), 1);
        assert_eq!(coordinator.local().load_users().len(), 1);
    }

    #[test]
    fn create_user_falls_back_to_local() {
        let coordinator = coordinator();
        coordinator.remote().set_failing(true);

        let user = User::new("alice", "a@x.com", "p1", "Alice");
        let created = coordinator.create_user(user.clone()).unwrap();

        assert_eq!(created.persisted_to, Persistence::Local);
        assert_eq!(created.record, user);
        assert!(coordinator.remote().users().is_empty());
        assert_eq!(coordinator.local().load_users(), vec![user]);
    }

    #[test]
    fn login_prefers_remote_record() {
        let coordinator = coordinator();
        coordinator
            .create_user(User::new("alice", "a@x.com", "p1", "Alice"))
            .unwrap();

        let user = coordinator.login_user("a@x.com", "p1").unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(coordinator.current_user().unwrap().id, user.id);
    }

    #[test]
    fn login_by_username_uses_local_scan() {
        let coordinator = coordinator();
        coordinator
            .create_user(User::new("alice", "a@x.com", "p1", "Alice"))
            .unwrap();

        // The remote only resolves emails; username logins come from the
        // local scan.
        assert!(coordinator.login_user("alice", "p1").is_some());
        assert!(coordinator.login_user("alice", "wrong").is_none());
    }

    #[test]
    fn update_user_falls_back_to_local_patch() {
        let coordinator = coordinator();
        coordinator.remote().set_failing(true);
        let user = User::new("alice", "a@x.com", "p1", "Alice");
        coordinator.create_user(user.clone()).unwrap();

        let updated = coordinator
            .update_user(&user.id, &UserPatch::new().with_full_name("Alice B"))
            .unwrap()
            .unwrap();

        assert_eq!(updated.persisted_to, Persistence::Local);
        assert_eq!(updated.record.full_name, "Alice B");
        assert_eq!(coordinator.local().load_users()[0].full_name, "Alice B");
    }

    #[test]
    fn update_unknown_user_is_none() {
        let coordinator = coordinator();
        coordinator.remote().set_failing(true);
        let result = coordinator
            .update_user("ghost", &UserPatch::new().with_full_name("X"))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn update_refreshes_matching_session() {
        let coordinator = coordinator();
        let created = coordinator
            .create_user(User::new("alice", "a@x.com", "p1", "Alice"))
            .unwrap();
        coordinator.set_current_user(&created.record).unwrap();

        coordinator
            .update_user(&created.record.id, &UserPatch::new().with_full_name("Alice B"))
            .unwrap();

        assert_eq!(coordinator.current_user().unwrap().full_name, "Alice B");
    }

    #[test]
    fn lookup_user_scans_local_when_remote_down() {
        let coordinator = coordinator();
        coordinator.remote().set_failing(true);
        coordinator
            .create_user(User::new("alice", "a@x.com", "p1", "Alice"))
            .unwrap();

        assert!(coordinator.lookup_user("alice").is_some());
        assert!(coordinator.lookup_user("a@x.com").is_some());
        assert!(coordinator.lookup_user("bob").is_none());
    }

    #[test]
    fn logout_clears_session() {
        let coordinator = coordinator();
        let user = User::new("alice", "a@x.com", "p1", "Alice");
        coordinator.set_current_user(&user).unwrap();

        coordinator.logout().unwrap();
        assert!(coordinator.current_user().is_none());
    }

    #[test]
    fn badges_derive_from_entry_count() {
        let coordinator = coordinator();
        coordinator.remote().set_failing(true);
        let entry = Entry::new("u1", "t", "d", "course", "2024-06-01");
        coordinator.create_entry(entry).unwrap();

        let badges = coordinator.badges_for_user("u1");
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].id, "first_steps");
    }
}
