//! Light/dark theme preference.
//!
//! The preference is stored as the plain string `"light"` or `"dark"` under
//! the theme key. With nothing stored, the theme follows the environment:
//! a light terminal background selects light, otherwise dark.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::storage::{LocalStore, StoreError};

/// Default store key for the theme preference.
pub const DEFAULT_THEME_KEY: &str = "docgate.theme";

/// Site colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Errors from theme parsing and persistence.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("Unknown theme '{name}'{}", suggestion_suffix(.suggestion))]
    Unknown {
        name: String,
        suggestion: Option<&'static str>,
    },

    #[error("Failed to persist theme")]
    Store(#[from] StoreError),
}

fn suggestion_suffix(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(s) => format!(", did you mean '{}'?", s),
        None => String::new(),
    }
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    /// The stored name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Theme suggested by the environment, dark when unsure.
    #[must_use]
    pub fn detect() -> Self {
        if is_light_terminal() {
            Self::Light
        } else {
            Self::Dark
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        if let Some(theme) = Self::ALL.into_iter().find(|t| t.as_str() == name) {
            return Ok(theme);
        }

        let suggestion = Self::ALL
            .into_iter()
            .map(Theme::as_str)
            .map(|candidate| (candidate, strsim::jaro_winkler(&name, candidate)))
            .filter(|(_, score)| *score > 0.7)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(candidate, _)| candidate);

        Err(ThemeError::Unknown {
            name: s.to_string(),
            suggestion,
        })
    }
}

/// Read the stored theme, falling back to [`Theme::detect`].
///
/// Unreadable or unrecognised values fall back too; they are left in place
/// and overwritten on the next save.
pub fn load<S: LocalStore + ?Sized>(store: &S, key: &str) -> Theme {
    match store.get(key) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
            log::debug!("Ignoring stored theme: {}", e);
            Theme::detect()
        }),
        Ok(None) => Theme::detect(),
        Err(e) => {
            log::warn!("Could not read theme preference: {}", e);
            Theme::detect()
        }
    }
}

/// Persist `theme`.
pub fn save<S: LocalStore + ?Sized>(
    store: &mut S,
    key: &str,
    theme: Theme,
) -> Result<(), ThemeError> {
    store.set(key, theme.as_str())?;
    log::debug!("Theme set to {}", theme);
    Ok(())
}

/// Flip the current theme, persist it and return the new value.
pub fn toggle<S: LocalStore + ?Sized>(store: &mut S, key: &str) -> Result<Theme, ThemeError> {
    let next = load(store, key).toggled();
    save(store, key, next)?;
    Ok(next)
}

/// Simple heuristic to detect if the terminal is light-themed.
///
/// `COLORFGBG` is set by some terminals (rxvt, xterm, konsole) as "fg;bg".
fn is_light_terminal() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .as_deref()
        .and_then(background_from_colorfgbg)
        .is_some_and(|bg| bg >= 7 && bg != 8)
}

fn background_from_colorfgbg(value: &str) -> Option<u32> {
    value.rsplit(';').next()?.trim().parse().ok()
}
