//! Search-as-you-type driver.

use std::time::{Duration, Instant};

use crate::config::Config;
use crate::debounce::Debouncer;
use crate::search::index::ContentIndex;
use crate::search::query::{search_with, SearchOptions, SearchOutcome};

/// Debounces keystrokes and runs the search once input settles.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
/// use docgate::search::{ContentIndex, LiveSearch, SearchOptions};
///
/// let index = ContentIndex::builtin().unwrap();
/// let mut live = LiveSearch::new(&index, SearchOptions::default(), Duration::from_millis(200));
///
/// let t0 = Instant::now();
/// live.on_input("bi", t0);
/// live.on_input("bim", t0 + Duration::from_millis(50));
/// assert!(live.tick(t0 + Duration::from_millis(100)).is_none());
/// let outcome = live.tick(t0 + Duration::from_millis(250)).unwrap();
/// assert!(!outcome.hits().is_empty());
/// ```
#[derive(Debug)]
pub struct LiveSearch<'a> {
    index: &'a ContentIndex,
    options: SearchOptions,
    debouncer: Debouncer<String>,
}

impl<'a> LiveSearch<'a> {
    pub fn new(index: &'a ContentIndex, options: SearchOptions, delay: Duration) -> Self {
        Self {
            index,
            options,
            debouncer: Debouncer::new(delay),
        }
    }

    /// Driver using the configured query length, marker and `debounce_ms`.
    pub fn from_config(index: &'a ContentIndex, config: &Config) -> Self {
        Self::new(index, config.search_options(), config.debounce())
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.debouncer.delay()
    }

    /// Record the current contents of the search box.
    pub fn on_input(&mut self, query: &str, now: Instant) {
        self.debouncer.schedule(query.to_string(), now);
    }

    /// Run the pending search if the input has been quiet long enough.
    pub fn tick(&mut self, now: Instant) -> Option<SearchOutcome<'a>> {
        let query = self.debouncer.poll(now)?;
        Some(search_with(&query, self.index.pages(), &self.options))
    }

    /// Drop a pending search, e.g. when the search box loses focus.
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
