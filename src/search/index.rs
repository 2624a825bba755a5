//! The content index: page descriptors loaded once from configuration data.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const BUILTIN_INDEX: &str = include_str!("../../data/pages.toml");

/// Errors raised while loading a content index.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("Failed to read index file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML index")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON index")]
    Json(#[from] serde_json::Error),

    #[error("Page #{position} has an empty {field}")]
    EmptyField {
        position: usize,
        field: &'static str,
    },
}

/// A searchable page descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl PageRecord {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        keywords: impl IntoIterator<Item = impl Into<String>>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
            description: description.into(),
        }
    }

    /// Whether `needle` (already passed through [`fold_case`]) occurs in
    /// the title, any keyword, or the description.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        fold_case(&self.title).contains(needle)
            || self.keywords.iter().any(|k| fold_case(k).contains(needle))
            || fold_case(&self.description).contains(needle)
    }
}

/// Lower-case `text` one character at a time.
///
/// Unlike [`str::to_lowercase`] there is no context-sensitive mapping (final
/// sigma), so every output character belongs to exactly one input character.
/// Highlighting relies on that to map matches back onto the original text.
#[must_use]
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

#[derive(Deserialize)]
struct IndexFile {
    pages: Vec<PageRecord>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonIndex {
    Wrapped(IndexFile),
    Bare(Vec<PageRecord>),
}

/// Ordered, immutable list of pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentIndex {
    pages: Vec<PageRecord>,
}

impl ContentIndex {
    /// Build an index from pages, keeping their order.
    pub fn new(pages: Vec<PageRecord>) -> Self {
        Self { pages }
    }

    /// The index bundled with the crate.
    pub fn builtin() -> Result<Self, IndexError> {
        Self::from_toml_str(BUILTIN_INDEX)
    }

    /// Load an index file. `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let content = fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let index = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };
        log::debug!(
            "Loaded {} page(s) from {}",
            index.len(),
            path.display()
        );
        Ok(index)
    }

    /// Parse a TOML document with a `[[pages]]` array.
    pub fn from_toml_str(content: &str) -> Result<Self, IndexError> {
        let file: IndexFile = toml::from_str(content)?;
        Self::validated(file.pages)
    }

    /// Parse JSON: either `{"pages": [...]}` or a bare array.
    pub fn from_json_str(content: &str) -> Result<Self, IndexError> {
        let pages = match serde_json::from_str(content)? {
            JsonIndex::Wrapped(file) => file.pages,
            JsonIndex::Bare(pages) => pages,
        };
        Self::validated(pages)
    }

    fn validated(pages: Vec<PageRecord>) -> Result<Self, IndexError> {
        for (position, page) in pages.iter().enumerate() {
            if page.title.trim().is_empty() {
                return Err(IndexError::EmptyField {
                    position,
                    field: "title",
                });
            }
            if page.url.trim().is_empty() {
                return Err(IndexError::EmptyField {
                    position,
                    field: "url",
                });
            }
        }
        Ok(Self { pages })
    }

    #[must_use]
    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
