//! docgate - client-side core for a static documentation site
//!
//! A password gate with an expiring session record, a persisted light/dark
//! theme preference, and keyword search over a small content index. All
//! state lives behind the [`storage::LocalStore`] trait, so the same logic
//! runs against browser-style local storage, a JSON file, or memory.

pub mod app;
pub mod cli;
pub mod clock;
pub mod config;
pub mod debounce;
pub mod error;
pub mod logging;
pub mod search;
pub mod session;
pub mod storage;
pub mod theme;

pub use app::run_app;
