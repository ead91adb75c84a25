//! Ollama runtime — drives the `ollama` executable as a subprocess.
//!
//! Every call spawns a fresh process (`ollama list`, `ollama run <model>
//! <prompt>`, `ollama --version`), waits for it under a deadline and reads
//! its stdout. Nothing is kept between calls.
//!
//! # Example
//! ```bash
//! ollama list
//! ollama run llama3.2 "Why is the sky blue?"
//! ```

use async_trait::async_trait;
use quickseek_config::RuntimeConfig;
use quickseek_core::error::RuntimeError;
use quickseek_core::model::ModelId;
use quickseek_core::runtime::ModelRuntime;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// A [`ModelRuntime`] backed by the `ollama` command-line tool.
pub struct OllamaCli {
    program: String,
    list_timeout: Duration,
    generate_timeout: Duration,
}

impl OllamaCli {
    /// Create a runtime that invokes `program` with the default deadlines
    /// (5s for listing, 60s for generation).
    pub fn new(program: impl Into<String>) -> Self {
        let defaults = RuntimeConfig::default();
        Self {
            program: program.into(),
            list_timeout: defaults.list_timeout(),
            generate_timeout: defaults.generate_timeout(),
        }
    }

    /// Build from the `[runtime]` config section.
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            program: config.program.clone(),
            list_timeout: config.list_timeout(),
            generate_timeout: config.generate_timeout(),
        }
    }

    /// Override both deadlines.
    pub fn with_timeouts(mut self, list: Duration, generate: Duration) -> Self {
        self.list_timeout = list;
        self.generate_timeout = generate;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the executable with `args` and return its output if it exited
    /// successfully. The child is killed if the deadline passes.
    async fn invoke(&self, args: &[&str], timeout: Duration) -> Result<Output, RuntimeError> {
        let operation = format!("{} {}", self.program, args.first().copied().unwrap_or_default());
        debug!(operation = %operation, timeout_ms = timeout.as_millis() as u64, "Invoking model runtime");

        let child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(timeout, child).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RuntimeError::NotInstalled {
                    program: self.program.clone(),
                });
            }
            Ok(Err(e)) => return Err(RuntimeError::Io(e.to_string())),
            Err(_) => {
                warn!(operation = %operation, "Model runtime timed out");
                return Err(RuntimeError::Timeout { operation, timeout });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let reason = if stderr.is_empty() {
                format!("exit status {}", output.status.code().unwrap_or(-1))
            } else {
                stderr
            };
            warn!(operation = %operation, reason = %reason, "Model runtime failed");
            return Err(RuntimeError::Failed { operation, reason });
        }

        Ok(output)
    }
}

impl Default for OllamaCli {
    fn default() -> Self {
        Self::from_config(&RuntimeConfig::default())
    }
}

#[async_trait]
impl ModelRuntime for OllamaCli {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn list_models(&self) -> Result<Vec<ModelId>, RuntimeError> {
        let output = self.invoke(&["list"], self.list_timeout).await?;
        let models = parse_model_list(&String::from_utf8_lossy(&output.stdout));
        debug!(count = models.len(), "Listed installed models");
        Ok(models)
    }

    async fn generate(&self, model: &ModelId, prompt: &str) -> Result<String, RuntimeError> {
        let output = self
            .invoke(&["run", model.as_str(), prompt], self.generate_timeout)
            .await?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn version(&self) -> Result<String, RuntimeError> {
        let output = self.invoke(&["--version"], self.list_timeout).await?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Parse the table printed by `ollama list`.
///
/// The first line is a header (`NAME ID SIZE MODIFIED`); every following
/// non-blank line starts with the model name.
pub fn parse_model_list(stdout: &str) -> Vec<ModelId> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .skip(1)
        .filter_map(|line| line.split_whitespace().next())
        .map(ModelId::from)
        .collect()
}
