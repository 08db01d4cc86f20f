//! Derived per-user statistics.

use crate::badge::badges_for_entries;
use crate::entry::Entry;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate statistics for one user, recomputed from the entry list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// Total entries recorded.
    pub total_entries: u32,
    /// Badges currently unlocked.
    pub total_badges: u32,
    /// Consecutive-day streak ending today.
    pub current_streak: u32,
    /// Entry count per category.
    pub categories: BTreeMap<String, u32>,
    /// `created_at` of the oldest entry, or now when there are none.
    pub joined_at: String,
}

impl UserStats {
    /// Computes statistics from an entry list ordered newest-first.
    #[must_use]
    pub fn compute(entries: &[Entry]) -> Self {
        let now = Utc::now();

        // Streak walk: each entry may extend the run by one day at most.
        let mut current_streak: u32 = 0;
        for entry in entries {
            let days_ago = (now - entry.created_at_ts()).num_days();
            if days_ago <= i64::from(current_streak) + 1 {
                current_streak += 1;
            } else {
                break;
            }
        }

        let mut categories: BTreeMap<String, u32> = BTreeMap::new();
        for entry in entries {
            *categories.entry(entry.category.clone()).or_insert(0) += 1;
        }

        Self {
            total_entries: entries.len() as u32,
            total_badges: badges_for_entries(entries).len() as u32,
            current_streak,
            categories,
            joined_at: entries
                .last()
                .map(|e| e.created_at.clone())
                .unwrap_or_else(crate::time::now_iso),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, SecondsFormat};

    fn entry_days_ago(days: i64, category: &str) -> Entry {
        let mut e = Entry::new("u1", "t", "d", category, "2024-06-01");
        e.created_at = (Utc::now() - Duration::days(days))
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        e
    }

    #[test]
    fn empty_list_has_zero_stats() {
        let stats = UserStats::compute(&[]);
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.total_badges, 0);
        assert_eq!(stats.current_streak, 0);
        assert!(stats.categories.is_empty());
    }

    #[test]
    fn consecutive_days_extend_the_streak() {
        let entries = vec![
            entry_days_ago(0, "course"),
            entry_days_ago(1, "course"),
            entry_days_ago(2, "project"),
        ];
        let stats = UserStats::compute(&entries);
        assert_eq!(stats.current_streak, 3);
    }

    #[test]
    fn gap_breaks_the_streak() {
        let entries = vec![entry_days_ago(0, "course"), entry_days_ago(10, "course")];
        let stats = UserStats::compute(&entries);
        assert_eq!(stats.current_streak, 1);
    }

    #[test]
    fn categories_are_counted() {
        let entries = vec![
            entry_days_ago(0, "course"),
            entry_days_ago(1, "course"),
            entry_days_ago(2, "project"),
        ];
        let stats = UserStats::compute(&entries);
        assert_eq!(stats.categories.get("course"), Some(&2));
        assert_eq!(stats.categories.get("project"), Some(&1));
    }

    #[test]
    fn joined_at_is_oldest_entry() {
        let entries = vec![entry_days_ago(0, "course"), entry_days_ago(5, "course")];
        let stats = UserStats::compute(&entries);
        assert_eq!(stats.joined_at, entries[1].created_at);
    }
}
