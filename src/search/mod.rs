//! In-page keyword search over the content index.
//!
//! # Architecture
//!
//! * [`index`]: Page records and loading the index from TOML/JSON.
//! * [`query`]: The filter itself and title highlighting.
//! * [`live`]: Debounced search-as-you-type on top of [`query`].

pub mod index;
pub mod live;
pub mod query;

pub use index::{fold_case, ContentIndex, IndexError, PageRecord};
pub use live::LiveSearch;
pub use query::{
    highlight, search, search_with, Highlighted, Marker, SearchHit, SearchOptions, SearchOutcome,
    Segment, MIN_QUERY_LEN,
};
