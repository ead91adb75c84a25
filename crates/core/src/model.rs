//! Domain values: model identifiers and search results.

use std::fmt;

/// Tag the runtime applies to a model pulled without an explicit tag.
const IMPLICIT_TAG: &str = "latest";

/// Opaque name of a locally installed text-generation model
/// (e.g. `"llama3.2:latest"`, `"gemma3:4b"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelId(String);

impl ModelId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identifier refers to the `listed` model.
    ///
    /// A bare name matches its `:latest` tag, so `llama3.2` is satisfied by a
    /// listing entry `llama3.2:latest`.
    pub fn matches(&self, listed: &ModelId) -> bool {
        if self.0 == listed.0 {
            return true;
        }
        if self.0.contains(':') {
            return false;
        }
        listed
            .0
            .strip_prefix(self.0.as_str())
            .and_then(|rest| rest.strip_prefix(':'))
            .is_some_and(|tag| tag == IMPLICIT_TAG)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ModelId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A single web search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            url: url.into(),
        }
    }

    /// The snippet cut to at most `max_chars` characters, with `...` appended
    /// when anything was dropped.
    pub fn snippet_preview(&self, max_chars: usize) -> String {
        match self.snippet.char_indices().nth(max_chars) {
            Some((byte_idx, _)) => format!("{}...", &self.snippet[..byte_idx]),
            None => self.snippet.clone(),
        }
    }
}
