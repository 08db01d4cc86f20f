//! Learning-milestone entry record.

use crate::time;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Well-known entry categories.
///
/// The category set is open: any string is accepted and stored verbatim.
/// These constants cover the values the front ends offer.
pub mod category {
    /// Followed a tutorial.
    pub const TUTORIAL: &str = "tutorial";
    /// Built or shipped a project.
    pub const PROJECT: &str = "project";
    /// Completed a course.
    pub const COURSE: &str = "course";
    /// Attended a workshop.
    pub const WORKSHOP: &str = "workshop";
    /// Earned a certification.
    pub const CERTIFICATION: &str = "certification";
}

/// One learning-milestone record.
///
/// Entries are immutable once created: there is no update or delete path.
/// `id` starts as a client-generated placeholder; when the remote store
/// accepts the record, the server-assigned id and creation timestamp
/// supersede the placeholders everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Record identifier - server-assigned when the remote write succeeds,
    /// otherwise the client placeholder.
    pub id: String,
    /// Owning user's id. Always set.
    pub user_id: String,
    /// Short title of the milestone.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Category string; see [`category`] for well-known values.
    pub category: String,
    /// ISO-8601 date the learning occurred.
    pub date: String,
    /// ISO-8601 timestamp of record creation.
    pub created_at: String,
}

impl Entry {
    /// Creates a new entry with a placeholder id and the current creation
    /// timestamp.
    pub fn new(
        user_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            title: title.into(),
            description: description.into(),
            category: category.into(),
            date: date.into(),
            created_at: time::now_iso(),
        }
    }

    /// Parses `created_at` for ordering; unparseable values map to the
    /// epoch so sorting is total.
    #[must_use]
    pub fn created_at_ts(&self) -> DateTime<Utc> {
        time::parse_iso_or_epoch(&self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_generates_placeholder_id() {
        let entry = Entry::new("u1", "Learned Rust", "ownership", category::COURSE, "2024-06-01");
        assert!(!entry.id.is_empty());
        assert_eq!(entry.user_id, "u1");
        assert!(crate::time::parse_iso(&entry.created_at).is_some());
    }

    #[test]
    fn entry_serializes_camel_case() {
        let entry = Entry::new("u1", "t", "d", "project", "2024-06-01");
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn created_at_ts_is_total() {
        let mut entry = Entry::new("u1", "t", "d", "project", "2024-06-01");
        entry.created_at = "corrupt".into();
        assert_eq!(entry.created_at_ts(), DateTime::<Utc>::UNIX_EPOCH);
    }
}
