//! Configuration loading and validation for quickseek.
//!
//! Loads configuration from `~/.quickseek/config.toml`. Every field has a
//! default, so a missing file or a partial file is fine. Validates all
//! settings at startup.

use quickseek_core::ModelId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The root configuration structure.
///
/// Maps directly to `~/.quickseek/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model runtime settings
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Web search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Agent behaviour
    #[serde(default)]
    pub agent: AgentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Executable name or path of the model runtime
    #[serde(default = "default_program")]
    pub program: String,

    /// Deadline for listing models and reading the version
    #[serde(default = "default_list_timeout")]
    pub list_timeout_secs: u64,

    /// Deadline for a single generation
    #[serde(default = "default_generate_timeout")]
    pub generate_timeout_secs: u64,
}

fn default_program() -> String {
    "ollama".into()
}
fn default_list_timeout() -> u64 {
    5
}
fn default_generate_timeout() -> u64 {
    60
}

impl RuntimeConfig {
    pub fn list_timeout(&self) -> Duration {
        Duration::from_secs(self.list_timeout_secs)
    }

    pub fn generate_timeout(&self) -> Duration {
        Duration::from_secs(self.generate_timeout_secs)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            list_timeout_secs: default_list_timeout(),
            generate_timeout_secs: default_generate_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// How many results to fold into a research prompt
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,

    /// Snippets longer than this many characters are cut in the prompt
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,

    /// DuckDuckGo region code (`wt-wt` = no region)
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_max_results() -> usize {
    3
}
fn default_search_timeout() -> u64 {
    60
}
fn default_snippet_chars() -> usize {
    200
}
fn default_region() -> String {
    "wt-wt".into()
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            timeout_secs: default_search_timeout(),
            snippet_chars: default_snippet_chars(),
            region: default_region(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Model to use. When unset, the first installed model is picked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Language the model is told to answer in
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "Spanish".into()
}

impl AgentConfig {
    pub fn model_id(&self) -> Option<ModelId> {
        self.model.as_deref().map(ModelId::from)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: None,
            language: default_language(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.quickseek/config.toml).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".quickseek")
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runtime.program.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "runtime.program must not be empty".into(),
            ));
        }

        if self.runtime.list_timeout_secs == 0 || self.runtime.generate_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "runtime timeouts must be greater than 0".into(),
            ));
        }

        if self.search.max_results == 0 {
            return Err(ConfigError::ValidationError(
                "search.max_results must be greater than 0".into(),
            ));
        }

        if self.search.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "search.timeout_secs must be greater than 0".into(),
            ));
        }

        if self.search.snippet_chars == 0 {
            return Err(ConfigError::ValidationError(
                "search.snippet_chars must be greater than 0".into(),
            ));
        }

        if self.agent.language.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "agent.language must not be empty".into(),
            ));
        }

        if matches!(self.agent.model.as_deref(), Some(m) if m.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "agent.model must not be empty when set".into(),
            ));
        }

        Ok(())
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
