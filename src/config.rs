//! Application configuration management.
//!
//! Settings are layered, later sources winning:
//!
//! 1. Built-in defaults
//! 2. TOML file (`--config`, or `config.toml` in the platform config dir)
//! 3. `DOCGATE_*` environment variables (e.g. `DOCGATE_SESSION_TTL_MS`)
//!
//! # Example
//!
//! ```toml
//! reference_digest = "624d3cb6fe59feb63b503eba49b457caeeb6e6f35f58f53b9b665079a853840f"
//! session_ttl_ms = 86400000
//! min_query_len = 2
//! index_path = "site/pages.toml"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::debounce::DEFAULT_DEBOUNCE;
use crate::search::{Marker, SearchOptions, MIN_QUERY_LEN};
use crate::session::{GuardSettings, DEFAULT_SESSION_KEY, DEFAULT_SESSION_TTL_MS};
use crate::theme::DEFAULT_THEME_KEY;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "DOCGATE_";

/// Digest of the stock password `docgate`.
pub const DEFAULT_REFERENCE_DIGEST: &str =
    "624d3cb6fe59feb63b503eba49b457caeeb6e6f35f58f53b9b665079a853840f";

const KNOWN_KEYS: &[&str] = &[
    "reference_digest",
    "session_ttl_ms",
    "session_key",
    "theme_key",
    "min_query_len",
    "debounce_ms",
    "highlight_open",
    "highlight_close",
    "index_path",
    "store_path",
];

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration value for '{field}': {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lower-case hex SHA-256 of the accepted password.
    pub reference_digest: String,
    /// Approval window in milliseconds.
    pub session_ttl_ms: i64,
    /// Store key holding the session record.
    pub session_key: String,
    /// Store key holding the theme name.
    pub theme_key: String,
    /// Shortest query that triggers a search.
    pub min_query_len: usize,
    /// Keystroke debounce delay in milliseconds.
    pub debounce_ms: u64,
    pub highlight_open: String,
    pub highlight_close: String,
    /// Content index file; the bundled index is used when unset.
    pub index_path: Option<PathBuf>,
    /// Store file; defaults to `store.json` in the platform data dir.
    pub store_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_digest: DEFAULT_REFERENCE_DIGEST.to_string(),
            session_ttl_ms: DEFAULT_SESSION_TTL_MS,
            session_key: DEFAULT_SESSION_KEY.to_string(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
            min_query_len: MIN_QUERY_LEN,
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            highlight_open: "<mark>".to_string(),
            highlight_close: "</mark>".to_string(),
            index_path: None,
            store_path: None,
        }
    }
}

impl Config {
    /// Load layered configuration.
    ///
    /// `path` overrides the platform config file. A missing file is not an
    /// error; defaults and environment still apply.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);

        if let Some(path) = &path {
            warn_unknown_keys(path);
        }

        let config: Self = Self::figment(path.as_deref())
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        log::debug!("Configuration loaded: {:?}", config);
        Ok(config)
    }

    /// The provider chain behind [`Config::load`].
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Check values that would make the gate or search misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let digest = &self.reference_digest;
        if digest.len() != 64 || !digest.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(ConfigError::Invalid {
                field: "reference_digest",
                message: "expected 64 lower-case hex characters (SHA-256)".to_string(),
            });
        }
        if self.session_ttl_ms <= 0 {
            return Err(ConfigError::Invalid {
                field: "session_ttl_ms",
                message: format!("must be positive, got {}", self.session_ttl_ms),
            });
        }
        if self.min_query_len == 0 {
            return Err(ConfigError::Invalid {
                field: "min_query_len",
                message: "must be at least 1".to_string(),
            });
        }
        for (field, key) in [("session_key", &self.session_key), ("theme_key", &self.theme_key)] {
            if key.is_empty() {
                return Err(ConfigError::Invalid {
                    field,
                    message: "must not be empty".to_string(),
                });
            }
        }
        if self.session_key == self.theme_key {
            return Err(ConfigError::Invalid {
                field: "theme_key",
                message: "must differ from session_key".to_string(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn guard_settings(&self) -> GuardSettings {
        GuardSettings::new(self.reference_digest.clone())
            .with_ttl_ms(self.session_ttl_ms)
            .with_session_key(self.session_key.clone())
    }

    #[must_use]
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            min_query_len: self.min_query_len,
            marker: Marker::new(self.highlight_open.clone(), self.highlight_close.clone()),
        }
    }

    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Store file to use: configured, else the platform data dir.
    pub fn resolved_store_path(&self) -> Option<PathBuf> {
        self.store_path.clone().or_else(|| {
            project_dirs().map(|dirs| dirs.data_dir().join("store.json"))
        })
    }

    /// Platform-specific configuration file path.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "docgate", "docgate")
}

/// Top-level keys in `content` that are not configuration fields, each with
/// the closest known key when one is similar enough.
pub fn unknown_keys(content: &str) -> Vec<(String, Option<&'static str>)> {
    let Ok(table) = content.parse::<toml::Table>() else {
        return Vec::new();
    };

    table
        .keys()
        .filter(|key| !KNOWN_KEYS.contains(&key.as_str()))
        .map(|key| {
            let suggestion = KNOWN_KEYS
                .iter()
                .map(|known| (*known, strsim::jaro_winkler(key, known)))
                .filter(|(_, score)| *score > 0.8)
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(known, _)| known);
            (key.clone(), suggestion)
        })
        .collect()
}

fn warn_unknown_keys(path: &Path) {
    let Ok(content) = fs::read_to_string(path) else {
        return;
    };
    for (key, suggestion) in unknown_keys(&content) {
        match suggestion {
            Some(known) => log::warn!(
                "Unknown config key '{}' in {}, did you mean '{}'?",
                key,
                path.display(),
                known
            ),
            None => log::warn!("Unknown config key '{}' in {}", key, path.display()),
        }
    }
}
