//! # Milepost Sync
//!
//! Local-first synchronization coordinator for Milepost.
//!
//! This crate implements the dual-write contract between the remote store
//! (durable, network-bound, may fail) and the local store (synchronous,
//! always available). Callers get one uniform API regardless of network
//! availability.
//!
//! ## Fallback order
//!
//! Every operation runs the same strict sequence:
//!
//! ```text
//! ATTEMPT_REMOTE ── ok ──▶ best-effort local cache write ──▶ DONE
//!       │
//!     failed
//!       ▼
//! ATTEMPT_LOCAL ── ok ──▶ DONE
//!       │
//!     failed ──▶ create flows: error; read flows: empty result
//! ```
//!
//! Remote is always attempted before local, never raced, one attempt per
//! store per call - no retries, no backoff. A [`milepost_remote::RemoteError`]
//! never escapes to the caller; it is logged and superseded by the local
//! path's result. Write operations return [`Synced`] so callers that care
//! can observe which store actually persisted the record.
//!
//! ## Key Invariants
//!
//! - Returned entry sequences are newest-first by `createdAt`, whichever
//!   store produced them
//! - Records are deduplicated by `id`, first occurrence wins; divergent
//!   copies of the same id are not reconciled
//! - Corrupt local data reads as an empty collection, never an error
//!
//! ## Limits
//!
//! The design trades consistency for availability: no delivery guarantees,
//! no idempotency keys, no conflict resolution beyond first-id-seen wins.
//! It is intended for one interactive session; concurrent whole-collection
//! saves can lose an update.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod coordinator;
mod error;
mod outcome;

pub mod merge;

pub use coordinator::SyncCoordinator;
pub use error::{SyncError, SyncResult};
pub use outcome::{Persistence, Synced};
