//! Wire-format rows for the hosted service.
//!
//! The remote schema uses all-lowercase column names while the model types
//! serialize camelCase. These row structs are the only place both
//! spellings appear; the adapter converts at the boundary so callers never
//! see the wire format.

use milepost_model::{Entry, User, UserPatch};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Insert payload for the `users` table.
///
/// Only the minimal column set is sent; the service fills defaults for
/// the rest, and [`UserRow::merge_into`] folds them back into the record.
#[derive(Debug, Serialize)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: &user.id,
            username: &user.username,
            email: &user.email,
            password: &user.password,
        }
    }
}

/// A `users` row as returned by the service.
#[derive(Debug, Deserialize)]
pub(crate) struct UserRow {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub fullname: Option<String>,
    #[serde(default)]
    pub createdat: Option<String>,
    #[serde(default)]
    pub totalentries: Option<u32>,
    #[serde(default)]
    pub totalbadges: Option<u32>,
    #[serde(default)]
    pub learningstreak: Option<u32>,
    #[serde(default)]
    pub lastentrydate: Option<String>,
}

impl UserRow {
    /// Folds service-assigned columns over `base`.
    ///
    /// Columns the service returned win; null or absent columns keep the
    /// base record's values.
    pub(crate) fn merge_into(self, base: &User) -> User {
        let mut user = base.clone();
        user.id = self.id;
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(password) = self.password {
            user.password = password;
        }
        if let Some(fullname) = self.fullname {
            user.full_name = fullname;
        }
        if let Some(createdat) = self.createdat {
            user.created_at = createdat;
        }
        if let Some(totalentries) = self.totalentries {
            user.total_entries = totalentries;
        }
        if let Some(totalbadges) = self.totalbadges {
            user.total_badges = totalbadges;
        }
        if let Some(learningstreak) = self.learningstreak {
            user.learning_streak = learningstreak;
        }
        if let Some(lastentrydate) = self.lastentrydate {
            user.last_entry_date = Some(lastentrydate);
        }
        user
    }

    /// Standalone conversion for lookups, defaulting null columns.
    pub(crate) fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            full_name: self.fullname.unwrap_or_default(),
            created_at: self.createdat.unwrap_or_default(),
            total_entries: self.totalentries.unwrap_or_default(),
            total_badges: self.totalbadges.unwrap_or_default(),
            learning_streak: self.learningstreak.unwrap_or_default(),
            last_entry_date: self.lastentrydate,
        }
    }
}

/// Builds the PATCH body for a typed user update, in wire column names.
pub(crate) fn user_patch_body(patch: &UserPatch) -> Value {
    let mut map = Map::new();
    if let Some(full_name) = &patch.full_name {
        map.insert("fullname".into(), json!(full_name));
    }
    if let Some(password) = &patch.password {
        map.insert("password".into(), json!(password));
    }
    if let Some(total_entries) = patch.total_entries {
        map.insert("totalentries".into(), json!(total_entries));
    }
    if let Some(total_badges) = patch.total_badges {
        map.insert("totalbadges".into(), json!(total_badges));
    }
    if let Some(learning_streak) = patch.learning_streak {
        map.insert("learningstreak".into(), json!(learning_streak));
    }
    if let Some(last_entry_date) = &patch.last_entry_date {
        map.insert("lastentrydate".into(), json!(last_entry_date));
    }
    Value::Object(map)
}

/// Insert payload for the `entries` table.
///
/// The client id placeholder and creation timestamp are deliberately
/// absent - the service assigns both, and the assigned values supersede
/// the placeholders.
#[derive(Debug, Serialize)]
pub(crate) struct NewEntryRow<'a> {
    pub userid: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub date: &'a str,
}

impl<'a> From<&'a Entry> for NewEntryRow<'a> {
    fn from(entry: &'a Entry) -> Self {
        Self {
            userid: &entry.user_id,
            title: &entry.title,
            description: &entry.description,
            category: &entry.category,
            date: &entry.date,
        }
    }
}

/// An `entries` row as returned by the service.
#[derive(Debug, Deserialize)]
pub(crate) struct EntryRow {
    pub id: String,
    pub userid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub createdat: Option<String>,
}

impl EntryRow {
    pub(crate) fn into_entry(self) -> Entry {
        Entry {
            id: self.id,
            user_id: self.userid,
            title: self.title,
            description: self.description,
            category: self.category,
            date: self.date,
            created_at: self.createdat.unwrap_or_default(),
        }
    }
}
