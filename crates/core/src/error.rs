//! Error types for the quickseek domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each collaborator has its own error enum; [`AgentError`] covers the fatal
//! setup problems raised while building an agent.

use std::time::Duration;
use thiserror::Error;

/// Model suggested in remediation text when nothing is installed.
pub const SUGGESTED_MODEL: &str = "gemma3:4b";

/// Where the model runtime can be downloaded.
pub const RUNTIME_DOWNLOAD_URL: &str = "https://ollama.com/download";

/// Failures reported by a [`crate::ModelRuntime`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The runtime executable could not be located at all.
    #[error("'{program}' is not installed or not on PATH")]
    NotInstalled { program: String },

    /// Rendered with `Duration`'s debug form, e.g. `60s` or `200ms`.
    #[error("'{operation}' timed out after {timeout:?}")]
    Timeout { operation: String, timeout: Duration },

    /// The runtime ran but exited unsuccessfully.
    #[error("'{operation}' failed: {reason}")]
    Failed { operation: String, reason: String },

    #[error("I/O error: {0}")]
    Io(String),
}

/// Failures reported by a [`crate::SearchProvider`] implementation.
///
/// These never escape the agent: research degrades to a placeholder instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Search endpoint returned status {0}")]
    Status(u16),

    #[error("Rate limited by search provider")]
    RateLimited,

    #[error("Failed to parse search results: {0}")]
    Parse(String),

    #[error("Search timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

/// Fatal errors raised while constructing an agent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    /// The model runtime is not installed or cannot be executed.
    #[error("Model runtime is not available: {reason}")]
    RuntimeUnavailable { reason: String },

    /// No model could be selected automatically.
    #[error("No model is available: {reason}")]
    NoModelAvailable { reason: String },

    /// An explicitly requested model is not installed.
    #[error("Model '{model}' not found (available: {})", format_available(.available))]
    ModelNotFound { model: String, available: Vec<String> },
}

fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        "none".to_string()
    } else {
        available.join(", ")
    }
}

impl AgentError {
    /// Classify a failure to list installed models.
    ///
    /// A missing executable means the runtime itself is unavailable; any
    /// other listing failure leaves nothing to select from.
    pub fn from_listing(err: RuntimeError) -> Self {
        match err {
            RuntimeError::NotInstalled { .. } => Self::RuntimeUnavailable {
                reason: err.to_string(),
            },
            other => Self::NoModelAvailable {
                reason: format!("could not list models: {other}"),
            },
        }
    }

    /// Remediation lines shown to the user before exiting, English first,
    /// then Spanish.
    pub fn remediation(&self) -> Vec<String> {
        match self {
            Self::RuntimeUnavailable { .. } => vec![
                format!("Install Ollama from: {RUNTIME_DOWNLOAD_URL}"),
                format!("Instala Ollama desde: {RUNTIME_DOWNLOAD_URL}"),
            ],
            Self::NoModelAvailable { .. } => vec![
                format!("Install a model with: ollama pull {SUGGESTED_MODEL}"),
                format!("Instala un modelo con: ollama pull {SUGGESTED_MODEL}"),
            ],
            Self::ModelNotFound { available, .. } => vec![
                format!("Available models: {}", format_available(available)),
                format!("Modelos disponibles: {}", format_available(available)),
                format!("Install a model with: ollama pull {SUGGESTED_MODEL}"),
                format!("Instala un modelo con: ollama pull {SUGGESTED_MODEL}"),
            ],
        }
    }
}
