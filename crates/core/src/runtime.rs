//! ModelRuntime trait — the abstraction over the local generation engine.
//!
//! The runtime is an out-of-process engine invoked once per request. There
//! is no connection or session: every call starts from scratch and is bounded
//! by the implementation's own deadline.

use async_trait::async_trait;
use crate::error::RuntimeError;
use crate::model::ModelId;

/// The core ModelRuntime trait.
///
/// The agent calls `list_models()` once at construction and `generate()` once
/// per request, without knowing how the engine is reached.
#[async_trait]
pub trait ModelRuntime: Send + Sync {
    /// A human-readable name for this runtime (e.g., "ollama").
    fn name(&self) -> &str;

    /// List locally installed models, in the order the runtime reports them.
    ///
    /// An empty list and [`RuntimeError::NotInstalled`] are distinct outcomes.
    async fn list_models(&self) -> Result<Vec<ModelId>, RuntimeError>;

    /// Generate text for `prompt` with `model`. The output has no guaranteed
    /// structure and may be empty.
    async fn generate(&self, model: &ModelId, prompt: &str) -> Result<String, RuntimeError>;

    /// Version string of the runtime, for diagnostics.
    async fn version(&self) -> Result<String, RuntimeError> {
        Err(RuntimeError::Failed {
            operation: "version".into(),
            reason: format!("Runtime '{}' does not report a version", self.name()),
        })
    }
}
