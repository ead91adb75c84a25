//! The research agent — the one component of quickseek with any logic.
//!
//! The agent follows a **Search → Prompt → Generate** sequence:
//!
//! 1. **Search** the web for the question (at most `max_results` hits)
//! 2. **Assemble** a fixed prompt from the question and the results
//! 3. **Generate** an answer with the local model, exactly once
//!
//! Failures during a request never escape as errors: a failed search becomes
//! a placeholder and a failed generation becomes the response text. Only
//! construction can fail.

pub mod prompt;
pub mod research;
pub mod response;

pub use prompt::NO_RESULTS_PLACEHOLDER;
pub use research::{AgentSettings, ResearchAgent};
pub use response::Response;

#[cfg(test)]
pub(crate) mod test_helpers;
