//! # Milepost Remote
//!
//! Remote store adapter for Milepost.
//!
//! This crate provides the asynchronous-by-failure side of the dual-write
//! design: CRUD against a hosted relational service, one table per record
//! type (`users`, `entries`). Every operation can fail - network, auth,
//! constraint violation, malformed response - and every failure is
//! reported as a [`RemoteError`] the coordinator treats uniformly as
//! "remote unavailable, fall back".
//!
//! ## Architecture
//!
//! - [`RemoteStore`] is the contract the coordinator consumes
//! - [`RestRemote`] implements it over a PostgREST-style HTTP dialect,
//!   behind the [`HttpClient`] trait so tests substitute a fake
//! - [`DisabledRemote`] stands in when credentials are absent at startup,
//!   failing every call instead of crashing the process
//! - [`MockRemote`] gives tests an in-memory remote with real table
//!   semantics (unique constraints, server-assigned ids)
//!
//! The remote wire schema uses all-lowercase column names; the mapping to
//! the camelCase record types lives entirely in this crate, so callers
//! never see the wire format.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod http;
mod mock;
mod remote;
mod rest;
mod wire;

pub use config::{RemoteConfig, ENV_REMOTE_KEY, ENV_REMOTE_URL};
pub use error::{RemoteError, RemoteResult};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use mock::MockRemote;
pub use remote::{DisabledRemote, RemoteStore};
pub use rest::RestRemote;
