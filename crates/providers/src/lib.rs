//! Model runtime implementations for quickseek.
//!
//! All runtimes implement the `quickseek_core::ModelRuntime` trait. The only
//! backend is the local `ollama` executable, driven as a subprocess.

pub mod ollama;

pub use ollama::OllamaCli;
