//! End-to-end tests for the local-first fallback contract.

use milepost_model::{Entry, User};
use milepost_remote::MockRemote;
use milepost_store::{LocalStore, MemoryBackend};
use milepost_sync::{Persistence, SyncCoordinator};

fn coordinator() -> SyncCoordinator<MockRemote, MemoryBackend> {
    SyncCoordinator::new(MockRemote::new(), LocalStore::new(MemoryBackend::new()))
}

fn entry_at(user_id: &str, title: &str, created_at: &str) -> Entry {
    let mut entry = Entry::new(user_id, title, "d", "course", "2024-06-01");
    entry.created_at = created_at.into();
    entry
}

#[test]
fn offline_creates_remain_retrievable() {
    let coordinator = coordinator();
    coordinator.remote().set_failing(true);

    let user = User::new("alice", "a@x.com", "p1", "Alice");
    let created = coordinator.create_user(user.clone()).unwrap();
    assert_eq!(created.record, user);
    assert_eq!(created.persisted_to, Persistence::Local);

    let entry = Entry::new(&user.id, "Offline entry", "d", "project", "2024-06-01");
    let recorded = coordinator.create_entry(entry.clone()).unwrap();
    assert_eq!(recorded.record, entry);

    // Still down: both records come back from the local store.
    assert_eq!(coordinator.lookup_user("alice").unwrap().id, user.id);
    let listed = coordinator.entries_for_user(&user.id);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, entry.id);
}

#[test]
fn server_assigned_id_supersedes_placeholder() {
    let coordinator = coordinator();

    let entry = Entry::new("u1", "t", "d", "course", "2024-06-01");
    let placeholder = entry.id.clone();

    let recorded = coordinator.create_entry(entry).unwrap();
    assert_ne!(recorded.record.id, placeholder);
    assert_eq!(recorded.persisted_to, Persistence::Both);

    // The cache holds the server id, not the placeholder.
    let cached = coordinator.local().load_entries();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].id, recorded.record.id);
}

#[test]
fn repeated_syncs_do_not_accumulate_duplicates() {
    let coordinator = coordinator();
    coordinator
        .remote()
        .seed_entry(entry_at("u1", "a", "2024-06-02T00:00:00Z"));
    coordinator
        .remote()
        .seed_entry(entry_at("u1", "b", "2024-06-01T00:00:00Z"));

    let first = coordinator.entries_for_user("u1");
    let second = coordinator.entries_for_user("u1");

    assert_eq!(first.len(), 2);
    assert_eq!(first.len(), second.len());
    let ids = |entries: &[Entry]| {
        let mut v: Vec<String> = entries.iter().map(|e| e.id.clone()).collect();
        v.sort();
        v
    };
    assert_eq!(ids(&first), ids(&second));
    assert_eq!(coordinator.local().load_entries().len(), 2);
}

#[test]
fn failed_sync_for_one_user_does_not_touch_another() {
    let coordinator = coordinator();
    coordinator
        .remote()
        .seed_entry(entry_at("user-a", "a1", "2024-06-01T00:00:00Z"));

    // Healthy sync caches user A's entries.
    assert_eq!(coordinator.entries_for_user("user-a").len(), 1);

    // Remote goes down; user B's read must not return or disturb A's cache.
    coordinator.remote().set_failing(true);
    assert!(coordinator.entries_for_user("user-b").is_empty());

    let cached = coordinator.local().load_entries();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].user_id, "user-a");
}

#[test]
fn listings_are_newest_first_from_either_store() {
    let coordinator = coordinator();
    for (title, at) in [
        ("oldest", "2024-06-01T00:00:00Z"),
        ("newest", "2024-06-03T00:00:00Z"),
        ("middle", "2024-06-02T00:00:00Z"),
    ] {
        coordinator.remote().seed_entry(entry_at("u1", title, at));
    }

    let assert_descending = |entries: &[Entry]| {
        for pair in entries.windows(2) {
            assert!(pair[0].created_at_ts() >= pair[1].created_at_ts());
        }
    };

    let from_remote = coordinator.entries_for_user("u1");
    assert_eq!(from_remote.len(), 3);
    assert_descending(&from_remote);

    // Same contract when the listing is served from the local cache.
    coordinator.remote().set_failing(true);
    let from_local = coordinator.entries_for_user("u1");
    assert_eq!(from_local.len(), 3);
    assert_descending(&from_local);
}

#[test]
fn local_only_credentials_resolve_offline() {
    let coordinator = coordinator();

    let mut user = User::new("alice", "a@x.com", "p1", "Alice");
    user.id = "1".into();
    coordinator.local().append_user(&user).unwrap();

    // Remote is healthy but has no such user: lookup returns null and the
    // local scan decides.
    let logged_in = coordinator.login_user("alice", "p1").unwrap();
    assert_eq!(logged_in.id, "1");
    assert!(coordinator.login_user("alice", "wrong").is_none());
}

#[test]
fn outage_entries_survive_the_next_successful_sync() {
    let coordinator = coordinator();

    // Recorded while the remote was down: placeholder id, local only.
    coordinator.remote().set_failing(true);
    let offline = coordinator
        .create_entry(entry_at("u1", "written offline", "2024-06-02T00:00:00Z"))
        .unwrap();

    // Remote comes back with its own copy of history.
    coordinator.remote().set_failing(false);
    coordinator
        .remote()
        .seed_entry(entry_at("u1", "cloud entry", "2024-06-01T00:00:00Z"));

    let merged = coordinator.entries_for_user("u1");
    let ids: Vec<&str> = merged.iter().map(|e| e.id.as_str()).collect();
    assert!(ids.contains(&offline.record.id.as_str()));
    assert_eq!(merged.len(), 2);
    // The union lands in the cache, so the next offline read still sees both.
    coordinator.remote().set_failing(true);
    assert_eq!(coordinator.entries_for_user("u1").len(), 2);
}

#[test]
fn duplicate_registration_is_detectable_before_create() {
    let coordinator = coordinator();
    coordinator
        .create_user(User::new("alice", "a@x.com", "p1", "Alice"))
        .unwrap();

    // The registration caller probes first and refuses the duplicate.
    assert!(coordinator.lookup_user("a@x.com").is_some());
    assert!(coordinator.lookup_user("alice").is_some());
    assert!(coordinator.lookup_user("new@x.com").is_none());
}
