//! Keyword search and title highlighting.
//!
//! Matching is a plain substring test on case-folded text (see
//! [`fold_case`]) against the title, each keyword, and the description. Results keep index order; there is no
//! scoring. The query is only ever used literally: highlighting escapes it
//! before building the pattern.

use regex::Regex;
use serde::Serialize;

use crate::search::index::{fold_case, PageRecord};

/// Queries shorter than this (in characters, after trimming) are inactive.
pub const MIN_QUERY_LEN: usize = 2;

/// Opening and closing strings wrapped around highlighted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub open: String,
    pub close: String,
}

impl Marker {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

impl Default for Marker {
    fn default() -> Self {
        Self::new("<mark>", "</mark>")
    }
}

/// Search tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub min_query_len: usize,
    pub marker: Marker,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_query_len: MIN_QUERY_LEN,
            marker: Marker::default(),
        }
    }
}

/// A run of title text, emphasized or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub emphasized: bool,
}

/// Title text split into plain and emphasized runs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Highlighted {
    segments: Vec<Segment>,
}

impl Highlighted {
    fn plain(text: &str) -> Self {
        let mut h = Self::default();
        h.push(text, false);
        h
    }

    fn push(&mut self, text: &str, emphasized: bool) {
        if !text.is_empty() {
            self.segments.push(Segment {
                text: text.to_string(),
                emphasized,
            });
        }
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of emphasized runs.
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.segments.iter().filter(|s| s.emphasized).count()
    }

    /// The text with every emphasized run wrapped in `marker`.
    #[must_use]
    pub fn render(&self, marker: &Marker) -> String {
        self.render_with(|text| format!("{}{}{}", marker.open, text, marker.close))
    }

    /// The text with emphasized runs passed through `emphasize`.
    pub fn render_with<F>(&self, mut emphasize: F) -> String
    where
        F: FnMut(&str) -> String,
    {
        let mut out = String::new();
        for segment in &self.segments {
            if segment.emphasized {
                out.push_str(&emphasize(&segment.text));
            } else {
                out.push_str(&segment.text);
            }
        }
        out
    }

    /// The original text without markers.
    #[must_use]
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Split `title` around every occurrence of `query`, compared after
/// [`fold_case`] exactly as [`PageRecord::matches`] compares them.
#[must_use]
pub fn highlight(title: &str, query: &str) -> Highlighted {
    let needle = fold_case(query);
    if needle.is_empty() {
        return Highlighted::plain(title);
    }

    let pattern = match Regex::new(&regex::escape(&needle)) {
        Ok(pattern) => pattern,
        Err(e) => {
            log::debug!("Highlight pattern rejected, showing plain title: {}", e);
            return Highlighted::plain(title);
        }
    };

    let (folded, origin) = fold_with_origin(title);
    let mut out = Highlighted::default();
    let mut last = 0;
    for m in pattern.find_iter(&folded) {
        // Widen to whole source characters; a match may begin or end inside
        // the expansion of one character.
        let start = origin[m.start()].max(last);
        let end = char_end(title, origin[m.end() - 1]);
        if start >= end {
            continue;
        }
        out.push(&title[last..start], false);
        out.push(&title[start..end], true);
        last = end;
    }
    out.push(&title[last..], false);
    out
}

/// [`fold_case`] plus, for every byte of the result, the byte offset of the
/// source character it came from.
fn fold_with_origin(text: &str) -> (String, Vec<usize>) {
    let mut folded = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len());
    for (offset, c) in text.char_indices() {
        for lower in c.to_lowercase() {
            folded.push(lower);
            origin.extend(std::iter::repeat(offset).take(lower.len_utf8()));
        }
    }
    (folded, origin)
}

fn char_end(text: &str, offset: usize) -> usize {
    offset + text[offset..].chars().next().map_or(0, char::len_utf8)
}

/// One matching page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub page: &'a PageRecord,
    pub title: Highlighted,
}

impl SearchHit<'_> {
    /// Title with matches wrapped in `marker`.
    #[must_use]
    pub fn highlighted_title(&self, marker: &Marker) -> String {
        self.title.render(marker)
    }
}

/// Result of a search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<'a> {
    /// Query too short; the results panel should be hidden.
    Inactive,
    /// Active query with nothing found; show a "no results" message.
    NoResults,
    /// Matches in index order. Never empty.
    Matches(Vec<SearchHit<'a>>),
}

impl<'a> SearchOutcome<'a> {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Inactive)
    }

    /// The hits, empty for `Inactive` and `NoResults`.
    #[must_use]
    pub fn hits(&self) -> &[SearchHit<'a>] {
        match self {
            Self::Matches(hits) => hits,
            _ => &[],
        }
    }
}

/// Search `index` with default options.
#[must_use]
pub fn search<'a>(query: &str, index: &'a [PageRecord]) -> SearchOutcome<'a> {
    search_with(query, index, &SearchOptions::default())
}

/// Search `index` for `query`.
#[must_use]
pub fn search_with<'a>(
    query: &str,
    index: &'a [PageRecord],
    options: &SearchOptions,
) -> SearchOutcome<'a> {
    let query = query.trim();
    if query.chars().count() < options.min_query_len {
        return SearchOutcome::Inactive;
    }

    let needle = fold_case(query);
    let hits: Vec<SearchHit<'a>> = index
        .iter()
        .filter(|page| page.matches(&needle))
        .map(|page| SearchHit {
            page,
            title: highlight(&page.title, query),
        })
        .collect();

    log::trace!("Query {:?} matched {} page(s)", query, hits.len());

    if hits.is_empty() {
        SearchOutcome::NoResults
    } else {
        SearchOutcome::Matches(hits)
    }
}
