//! Agent events — progress notifications from a running request.
//!
//! The agent reports what it is doing to an optional observer instead of
//! printing, so the caller decides how (or whether) to show progress.

use crate::model::ModelId;
use std::sync::Arc;

/// Everything the agent reports while it works.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentEvent {
    /// A model was chosen at construction
    ModelSelected { model: ModelId, auto_detected: bool },

    /// A web search is about to run
    SearchStarted { query: String },

    /// The web search returned
    SearchCompleted { results: usize },

    /// The web search failed; research continues without results
    SearchFailed { error: String },

    /// The prompt is being sent to the model
    GenerationStarted { model: ModelId },

    /// Generation failed; the failure becomes the response text
    GenerationFailed { error: String },
}

/// Callback receiving [`AgentEvent`]s, invoked synchronously in order.
pub type EventObserver = Arc<dyn Fn(&AgentEvent) + Send + Sync>;
