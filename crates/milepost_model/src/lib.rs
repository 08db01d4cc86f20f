//! # Milepost Model
//!
//! Record types and derived views for Milepost.
//!
//! This crate defines the two persisted record types - [`User`] and
//! [`Entry`] - along with the typed partial-update structure
//! ([`UserPatch`]) and the derived, never-persisted views ([`Badge`],
//! [`UserStats`]).
//!
//! ## Conventions
//!
//! - Identifiers are opaque strings, generated as UUID v4 by constructors.
//! - Timestamps are ISO-8601 strings in UTC. Records keep them as strings
//!   (the stored format); [`time::parse_iso`] is used wherever ordering or
//!   day arithmetic is needed, and unparseable values sort as the epoch.
//! - Structs serialize with camelCase field names, matching the local
//!   storage format. The remote wire format differs and is mapped inside
//!   the remote adapter, not here.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod badge;
mod entry;
mod stats;
mod user;

pub mod time;

pub use badge::{badges_for_entries, Badge, Rarity, MILESTONE_THRESHOLDS};
pub use entry::{category, Entry};
pub use stats::UserStats;
pub use user::{User, UserPatch};
