//! Password gate for the documentation site.
//!
//! This module decides whether the current visitor may see the content and
//! records that decision in a [`LocalStore`](crate::storage::LocalStore).
//!
//! # Features
//!
//! * **Digest check**: Candidate passwords are hashed with SHA-256 and compared,
//!   as lower-case hex, against a configured reference digest.
//! * **Expiry**: An approval record is honoured for a fixed window
//!   (24 hours by default) and removed once it is older than that.
//! * **Self-healing**: Corrupt, expired, or foreign records are deleted on read.
//!
//! The reference digest ships with the site and the check runs on the
//! visitor's side, so this keeps casual readers out and nothing more.
//!
//! # Architecture
//!
//! * [`data`]: The serialized session record.
//! * [`guard`]: `is_authenticated`, `authenticate` and `logout`.

pub mod data;
pub mod guard;

pub use data::SessionRecord;
pub use guard::{
    digest_hex, GateError, GuardSettings, SessionGuard, SessionStatus, DEFAULT_SESSION_KEY,
    DEFAULT_SESSION_TTL_MS,
};
