//! User account record and typed partial update.

use crate::time;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account.
///
/// `id` is an opaque, caller-generated string that is stable across both
/// stores. `email` and `username` are unique within the remote service;
/// registration callers are expected to probe for an existing identity
/// before creating a new account.
///
/// The `password` field holds the credential as an opaque string compared
/// by exact equality. There is no hashing - this matches the stored-data
/// format and makes the crate unsuitable as-is for anything beyond a
/// single-user demo deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque stable identifier.
    pub id: String,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Credential, compared by exact string equality.
    pub password: String,
    /// Display name.
    pub full_name: String,
    /// ISO-8601 creation timestamp.
    pub created_at: String,
    /// Number of entries recorded, maintained by the caller.
    pub total_entries: u32,
    /// Number of badges unlocked, maintained by the caller.
    pub total_badges: u32,
    /// Consecutive-day learning streak, maintained by the caller.
    pub learning_streak: u32,
    /// ISO-8601 date of the most recent entry, if any.
    pub last_entry_date: Option<String>,
}

impl User {
    /// Creates a new account with a generated id, the current timestamp,
    /// and zeroed counters.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.into(),
            email: email.into(),
            password: password.into(),
            full_name: full_name.into(),
            created_at: time::now_iso(),
            total_entries: 0,
            total_badges: 0,
            learning_streak: 0,
            last_entry_date: None,
        }
    }

    /// Returns true if `identifier` matches this user's email or username.
    #[must_use]
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.email == identifier || self.username == identifier
    }

    /// Applies a partial update in place.
    ///
    /// Absent patch fields leave the record untouched. Identity fields
    /// (`id`, `username`, `email`, `created_at`) are not patchable.
    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(full_name) = &patch.full_name {
            self.full_name = full_name.clone();
        }
        if let Some(password) = &patch.password {
            self.password = password.clone();
        }
        if let Some(total_entries) = patch.total_entries {
            self.total_entries = total_entries;
        }
        if let Some(total_badges) = patch.total_badges {
            self.total_badges = total_badges;
        }
        if let Some(learning_streak) = patch.learning_streak {
            self.learning_streak = learning_streak;
        }
        if let Some(last_entry_date) = &patch.last_entry_date {
            self.last_entry_date = Some(last_entry_date.clone());
        }
    }
}

/// A typed partial update for [`User`].
///
/// Only the fields present here can be persisted by an update - the set the
/// remote schema accepts. Everything else on [`User`] is fixed at creation,
/// so an update cannot smuggle arbitrary fields the way a raw key filter
/// could.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// New credential.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// New entry counter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_entries: Option<u32>,
    /// New badge counter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_badges: Option<u32>,
    /// New streak value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_streak: Option<u32>,
    /// New most-recent-entry date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_entry_date: Option<String>,
}

impl UserPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.password.is_none()
            && self.total_entries.is_none()
            && self.total_badges.is_none()
            && self.learning_streak.is_none()
            && self.last_entry_date.is_none()
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// Sets the credential.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the counters and streak derived from the entry list.
    #[must_use]
    pub fn with_progress(
        mut self,
        total_entries: u32,
        total_badges: u32,
        learning_streak: u32,
        last_entry_date: impl Into<String>,
    ) -> Self {
        self.total_entries = Some(total_entries);
        self.total_badges = Some(total_badges);
        self.learning_streak = Some(learning_streak);
        self.last_entry_date = Some(last_entry_date.into());
        self
    }
}
