//! Session guard: digest check plus the persisted approval record.

use sha2::{Digest, Sha256};

use crate::clock::{Clock, SystemClock};
use crate::session::data::SessionRecord;
use crate::storage::{LocalStore, StoreError};

/// Default approval window: 24 hours.
pub const DEFAULT_SESSION_TTL_MS: i64 = 24 * 60 * 60 * 1000;

/// Default store key for the session record.
pub const DEFAULT_SESSION_KEY: &str = "docgate.session";

/// Errors the guard cannot absorb on its own.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// The store refused a write or delete.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The session record could not be serialized.
    #[error("Failed to serialize session record")]
    Serialize(#[from] serde_json::Error),
}

/// Compute the lower-case hex SHA-256 digest of `input`.
#[must_use]
pub fn digest_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Static parameters of the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardSettings {
    /// Hex digest of the accepted password.
    pub reference_digest: String,
    /// How long an approval record stays valid.
    pub ttl_ms: i64,
    /// Store key holding the record.
    pub session_key: String,
}

impl GuardSettings {
    /// Settings with the default TTL and key.
    pub fn new(reference_digest: impl Into<String>) -> Self {
        Self {
            reference_digest: reference_digest.into(),
            ttl_ms: DEFAULT_SESSION_TTL_MS,
            session_key: DEFAULT_SESSION_KEY.to_string(),
        }
    }

    /// Override the approval window.
    #[must_use]
    pub fn with_ttl_ms(mut self, ttl_ms: i64) -> Self {
        self.ttl_ms = ttl_ms;
        self
    }

    /// Override the store key.
    #[must_use]
    pub fn with_session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = key.into();
        self
    }
}

/// What the guard found in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// A valid record; `remaining_ms` until it expires.
    Valid { remaining_ms: i64 },
    /// No record stored.
    Missing,
    /// The stored value did not parse. It has been removed.
    Corrupt,
    /// The record was older than the approval window. It has been removed.
    Expired,
    /// The record was made against another reference digest. It has been removed.
    DigestMismatch,
    /// The store could not be read.
    Unavailable,
}

impl SessionStatus {
    /// Whether content may be shown.
    #[must_use]
    pub fn is_authenticated(self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Short label for status output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Valid { .. } => "authenticated",
            Self::Missing => "locked",
            Self::Corrupt => "locked (corrupt session removed)",
            Self::Expired => "locked (session expired)",
            Self::DigestMismatch => "locked (stale session removed)",
            Self::Unavailable => "locked (store unavailable)",
        }
    }
}

/// The password gate.
///
/// Owns (or borrows, via `&mut S`) the store holding the session record.
///
/// # Example
///
/// ```
/// use docgate::session::{digest_hex, GuardSettings, SessionGuard};
/// use docgate::storage::MemoryStore;
///
/// let settings = GuardSettings::new(digest_hex("open sesame"));
/// let mut guard = SessionGuard::new(MemoryStore::new(), settings);
///
/// assert!(!guard.is_authenticated());
/// assert!(!guard.authenticate("guess").unwrap());
/// assert!(guard.authenticate("open sesame").unwrap());
/// assert!(guard.is_authenticated());
/// ```
#[derive(Debug)]
pub struct SessionGuard<S, C = SystemClock> {
    store: S,
    clock: C,
    settings: GuardSettings,
}

impl<S: LocalStore> SessionGuard<S, SystemClock> {
    /// Create a guard reading the system clock.
    pub fn new(store: S, settings: GuardSettings) -> Self {
        Self::with_clock(store, settings, SystemClock)
    }
}

impl<S: LocalStore, C: Clock> SessionGuard<S, C> {
    /// Create a guard with an explicit clock.
    pub fn with_clock(store: S, settings: GuardSettings, clock: C) -> Self {
        Self {
            store,
            clock,
            settings,
        }
    }

    /// The guard's settings.
    #[must_use]
    pub fn settings(&self) -> &GuardSettings {
        &self.settings
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Whether a valid session record is present.
    ///
    /// Invalid records are removed as a side effect; see [`Self::inspect`].
    pub fn is_authenticated(&mut self) -> bool {
        self.inspect().is_authenticated()
    }

    /// Read and classify the stored session record.
    ///
    /// Corrupt, expired and mismatched records are deleted, so a repeated
    /// call reports [`SessionStatus::Missing`].
    pub fn inspect(&mut self) -> SessionStatus {
        let raw = match self.store.get(&self.settings.session_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return SessionStatus::Missing,
            Err(e) => {
                log::warn!("Could not read session record: {}", e);
                return SessionStatus::Unavailable;
            }
        };

        let record = match SessionRecord::from_json(&raw) {
            Ok(record) => record,
            Err(e) => {
                log::debug!("Discarding unparseable session record: {}", e);
                self.discard();
                return SessionStatus::Corrupt;
            }
        };

        let now = self.clock.now_millis();
        if record.is_expired_at(now, self.settings.ttl_ms) {
            log::debug!(
                "Session expired ({} ms old, window {} ms)",
                record.age_at(now),
                self.settings.ttl_ms
            );
            self.discard();
            return SessionStatus::Expired;
        }

        if record.digest != self.settings.reference_digest {
            log::debug!("Session was issued against a different reference digest");
            self.discard();
            return SessionStatus::DigestMismatch;
        }

        SessionStatus::Valid {
            remaining_ms: self.settings.ttl_ms - record.age_at(now),
        }
    }

    /// Check `candidate` against the reference digest.
    ///
    /// On a match a fresh session record replaces any existing one and
    /// `Ok(true)` is returned. A mismatch returns `Ok(false)` and leaves the
    /// store untouched.
    ///
    /// # Errors
    ///
    /// Returns an error only when the matching record cannot be persisted.
    pub fn authenticate(&mut self, candidate: &str) -> Result<bool, GateError> {
        if digest_hex(candidate) != self.settings.reference_digest {
            log::info!("Password rejected");
            return Ok(false);
        }

        let record = SessionRecord::new(
            self.clock.now_millis(),
            self.settings.reference_digest.clone(),
        );
        self.store
            .set(&self.settings.session_key, &record.to_json()?)?;
        log::info!("Password accepted, session stored");
        Ok(true)
    }

    /// Delete the session record unconditionally.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot delete the key.
    pub fn logout(&mut self) -> Result<(), GateError> {
        self.store.clear(&self.settings.session_key)?;
        log::info!("Session cleared");
        Ok(())
    }

    fn discard(&mut self) {
        if let Err(e) = self.store.clear(&self.settings.session_key) {
            log::warn!("Could not remove invalid session record: {}", e);
        }
    }
}
