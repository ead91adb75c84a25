//! Web search implementations for quickseek.
//!
//! All backends implement the `quickseek_core::SearchProvider` trait and
//! report failures as `SearchError` values rather than panicking.

pub mod duckduckgo;

pub use duckduckgo::DuckDuckGoSearch;
