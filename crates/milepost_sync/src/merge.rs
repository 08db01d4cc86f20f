//! Record identity and merge policy.
//!
//! When the two stores both hold entries for a user, the sequences are
//! combined remote-first, deduplicated by `id` (first occurrence wins),
//! and sorted newest-first. The policy provides no conflict resolution:
//! if the same id exists in both stores with divergent fields, the
//! first-seen copy wins silently.

use milepost_model::Entry;
use std::collections::HashSet;

/// Keeps the first occurrence of each `id`, preserving order.
#[must_use]
pub fn dedup_by_id(entries: Vec<Entry>) -> Vec<Entry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|e| seen.insert(e.id.clone()))
        .collect()
}

/// Sorts descending by `createdAt`.
///
/// The sort is stable: entries with equal (or unparseable) timestamps keep
/// their input order.
pub fn sort_newest_first(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.created_at_ts().cmp(&a.created_at_ts()));
}

/// Unions a remote result set with one user's locally cached entries.
///
/// Remote entries come first, so on an id collision the remote copy wins.
/// Local entries for other users are not consulted. The result is sorted
/// newest-first.
#[must_use]
pub fn merge_user_entries(remote: Vec<Entry>, local_cache: &[Entry], user_id: &str) -> Vec<Entry> {
    let mut combined = remote;
    combined.extend(
        local_cache
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned(),
    );
    let mut merged = dedup_by_id(combined);
    sort_newest_first(&mut merged);
    merged
}

/// Replaces one user's slice of the cache with `fresh`, preserving every
/// other user's cached entries untouched.
#[must_use]
pub fn replace_user_entries(cache: Vec<Entry>, user_id: &str, fresh: &[Entry]) -> Vec<Entry> {
    let mut updated: Vec<Entry> = cache.into_iter().filter(|e| e.user_id != user_id).collect();
    updated.extend(fresh.iter().cloned());
    updated
}
