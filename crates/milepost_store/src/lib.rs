//! # Milepost Store
//!
//! Local store adapter for Milepost.
//!
//! This crate provides the synchronous, always-available side of the
//! dual-write design. Collections are stored as whole JSON arrays under
//! fixed string keys; there is no indexing and no query layer - callers
//! load a collection, filter in host-language code, and save it back.
//!
//! ## Design Principles
//!
//! - Backends are opaque string key/value stores ([`StoreBackend`])
//! - [`LocalStore`] owns the JSON format and the collection keys
//! - Corrupt stored data reads as an empty collection, never an error
//! - Saves overwrite the whole collection; the last writer wins
//!
//! ## Available Backends
//!
//! - [`MemoryBackend`] - For tests and ephemeral sessions
//! - [`FileBackend`] - One file per key under a data directory
//!
//! ## Example
//!
//! ```rust
//! use milepost_store::{LocalStore, MemoryBackend};
//! use milepost_model::User;
//!
//! let store = LocalStore::new(MemoryBackend::new());
//! store.append_user(&User::new("alice", "a@x.com", "p1", "Alice")).unwrap();
//! assert_eq!(store.load_users().len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;
mod store;

pub use backend::StoreBackend;
pub use error::{StoreError, StoreResult};
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use store::{LocalStore, ENTRIES_KEY, SESSION_KEY, USERS_KEY};
