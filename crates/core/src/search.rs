//! SearchProvider trait — the abstraction over web search backends.

use async_trait::async_trait;
use crate::error::SearchError;
use crate::model::SearchResult;

/// A best-effort web search backend.
///
/// Implementations must catch every failure (network, parsing, rate limits)
/// at the boundary and report it as a [`SearchError`] value.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// A human-readable name for this backend (e.g., "duckduckgo").
    fn name(&self) -> &str;

    /// Run `query` and return at most `limit` results, best match first.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError>;
}
