//! Key/value storage backing the session record and theme preference.
//!
//! The gate and the theme toggle never touch a concrete backend. They are
//! handed something implementing [`LocalStore`], which mirrors the shape of
//! browser local storage: string keys, string values, and three operations.
//!
//! # Architecture
//!
//! * [`memory`]: In-process map, used by tests and embedders.
//! * [`file`]: JSON object file on disk, rewritten on every change.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

/// Errors raised by a [`LocalStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("Failed to access store file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The entries could not be encoded as a JSON object.
    #[error("Failed to encode store file {path}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A string-keyed store with `get`/`set`/`clear` semantics.
pub trait LocalStore {
    /// Return the value stored under `key`, if any.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn clear(&mut self, key: &str) -> StoreResult<()>;
}

impl<S: LocalStore + ?Sized> LocalStore for &mut S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn clear(&mut self, key: &str) -> StoreResult<()> {
        (**self).clear(key)
    }
}
