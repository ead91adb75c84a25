//! # quickseek core
//!
//! Domain types, traits, and error definitions for the quickseek research
//! assistant. This crate has no I/O of its own: it defines the model that the
//! adapter crates implement against and the agent crate orchestrates.
//!
//! ## Seams
//!
//! Both external collaborators are traits here:
//! - [`ModelRuntime`] — the local text-generation engine
//! - [`SearchProvider`] — the web search backend
//!
//! Implementations live in `quickseek-providers` and `quickseek-search`, and
//! tests substitute scripted mocks.

pub mod error;
pub mod event;
pub mod model;
pub mod runtime;
pub mod search;

// Re-export key types at crate root for ergonomics
pub use error::{AgentError, RuntimeError, SearchError};
pub use event::{AgentEvent, EventObserver};
pub use model::{ModelId, SearchResult};
pub use runtime::ModelRuntime;
pub use search::SearchProvider;
