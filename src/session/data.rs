//! The persisted proof-of-login.

use serde::{Deserialize, Serialize};

/// Approval record written after a successful login.
///
/// Serialized as `{"timestamp": <epoch millis>, "digest": "<hex>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// When the login happened, in epoch milliseconds.
    pub timestamp: i64,
    /// Reference digest the login was checked against.
    pub digest: String,
}

impl SessionRecord {
    /// Create a record stamped at `timestamp`.
    pub fn new(timestamp: i64, digest: impl Into<String>) -> Self {
        Self {
            timestamp,
            digest: digest.into(),
        }
    }

    /// Milliseconds elapsed between the record and `now`.
    ///
    /// Negative when the record claims to come from the future.
    #[must_use]
    pub fn age_at(&self, now: i64) -> i64 {
        now.saturating_sub(self.timestamp)
    }

    /// Whether the record is past `ttl_ms` at `now`.
    ///
    /// A record exactly `ttl_ms` old is still valid.
    #[must_use]
    pub fn is_expired_at(&self, now: i64, ttl_ms: i64) -> bool {
        self.age_at(now) > ttl_ms
    }

    /// Serialize to the compact JSON stored under the session key.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a stored session value.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
