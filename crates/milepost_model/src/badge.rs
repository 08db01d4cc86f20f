//! Derived badge view.
//!
//! Badges are never persisted. They are recomputed from the count of a
//! user's entries against fixed milestone thresholds on every read.

use crate::entry::Entry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Entry-count thresholds at which badges unlock.
pub const MILESTONE_THRESHOLDS: [usize; 4] = [1, 5, 10, 20];

/// Badge rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rarity {
    /// Unlocked by the first entry.
    Common,
    /// Unlocked at five entries.
    Uncommon,
    /// Unlocked at ten entries.
    Rare,
    /// Unlocked at twenty entries.
    Legendary,
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Legendary => "Legendary",
        };
        f.write_str(name)
    }
}

/// A gamified achievement derived from entry counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    /// Stable badge identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Unlock description.
    pub description: String,
    /// Rarity tier.
    pub rarity: Rarity,
    /// Emoji icon.
    pub icon: String,
    /// `created_at` of the entry that crossed the threshold.
    pub unlocked_at: Option<String>,
}

struct Milestone {
    threshold: usize,
    id: &'static str,
    name: &'static str,
    description: &'static str,
    rarity: Rarity,
    icon: &'static str,
}

const MILESTONES: [Milestone; 4] = [
    Milestone {
        threshold: MILESTONE_THRESHOLDS[0],
        id: "first_steps",
        name: "First Steps",
        description: "Recorded your first learning milestone",
        rarity: Rarity::Common,
        icon: "\u{1F3AF}",
    },
    Milestone {
        threshold: MILESTONE_THRESHOLDS[1],
        id: "learning_streak",
        name: "Learning Streak",
        description: "Completed 5 learning milestones",
        rarity: Rarity::Uncommon,
        icon: "\u{1F525}",
    },
    Milestone {
        threshold: MILESTONE_THRESHOLDS[2],
        id: "knowledge_builder",
        name: "Knowledge Builder",
        description: "Reached 10 learning milestones",
        rarity: Rarity::Rare,
        icon: "\u{1F3D7}\u{FE0F}",
    },
    Milestone {
        threshold: MILESTONE_THRESHOLDS[3],
        id: "learning_master",
        name: "Learning Master",
        description: "Achieved 20 learning milestones",
        rarity: Rarity::Legendary,
        icon: "\u{1F451}",
    },
];

/// Computes the unlocked badges for an entry list.
///
/// `entries` must be ordered newest-first, the order every coordinator read
/// returns. The unlock timestamp of each badge is the `created_at` of the
/// entry that crossed its threshold, counted from the oldest entry.
#[must_use]
pub fn badges_for_entries(entries: &[Entry]) -> Vec<Badge> {
    let count = entries.len();
    MILESTONES
        .iter()
        .filter(|m| count >= m.threshold)
        .map(|m| Badge {
            id: m.id.to_string(),
            name: m.name.to_string(),
            description: m.description.to_string(),
            rarity: m.rarity,
            icon: m.icon.to_string(),
            unlocked_at: entries
                .get(count - m.threshold)
                .map(|e| e.created_at.clone()),
        })
        .collect()
}
