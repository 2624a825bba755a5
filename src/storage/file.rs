//! JSON-file store.
//!
//! The file holds a single JSON object mapping keys to string values, the
//! same shape browser local storage exposes. The whole object is rewritten
//! after every `set` or `clear`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{LocalStore, StoreError, StoreResult};

/// A [`LocalStore`] persisted as a JSON object file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, loading existing entries.
    ///
    /// A missing file is treated as an empty store; it is created on the
    /// first write. A file that is not a JSON object of strings is moved
    /// aside to `<name>.corrupt` and the store starts empty.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                match serde_json::from_str(&content) {
                    Ok(entries) => entries,
                    Err(e) => {
                        log::warn!(
                            "Store file {} is not a valid JSON object ({}), starting empty",
                            path.display(),
                            e
                        );
                        quarantine(&path);
                        BTreeMap::new()
                    }
                }
            }
        } else {
            BTreeMap::new()
        };

        log::debug!(
            "Opened store {} with {} key(s)",
            path.display(),
            entries.len()
        );
        Ok(Self { path, entries })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `entries` to disk. `self.entries` is only replaced by callers
    /// once this succeeds.
    fn flush(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(entries).map_err(|source| {
            StoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        self.entries = next;
        Ok(())
    }

    fn clear(&mut self, key: &str) -> StoreResult<()> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.remove(key);
        self.flush(&next)?;
        self.entries = next;
        Ok(())
    }
}

/// Rename an unreadable store file out of the way so the next write does not
/// destroy it.
fn quarantine(path: &Path) {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".corrupt");
    let target = path.with_file_name(name);
    match fs::rename(path, &target) {
        Ok(()) => log::warn!("Moved unreadable store to {}", target.display()),
        Err(e) => log::warn!("Could not move unreadable store aside: {}", e),
    }
}
