//! Subcommand implementations and the wiring they share.

pub mod chat;
pub mod doctor;
pub mod models;
pub mod research;

use std::path::PathBuf;
use std::sync::Arc;
use quickseek_agent::{AgentSettings, ResearchAgent};
use quickseek_config::AppConfig;
use quickseek_core::event::{AgentEvent, EventObserver};
use quickseek_core::model::ModelId;
use quickseek_providers::OllamaCli;
use quickseek_search::DuckDuckGoSearch;
use tracing::debug;

pub const RULE: &str = "============================================================";

/// Options accepted by every command.
pub struct GlobalOpts {
    pub model: Option<String>,
    pub config: Option<PathBuf>,
}

impl GlobalOpts {
    pub fn load_config(&self) -> Result<AppConfig, Box<dyn std::error::Error>> {
        let config = match &self.config {
            Some(path) => AppConfig::load_from(path)?,
            None => AppConfig::load()?,
        };
        Ok(config)
    }

    /// `--model` wins over `agent.model` from the config file.
    pub fn requested_model(&self, config: &AppConfig) -> Option<ModelId> {
        self.model
            .as_deref()
            .map(ModelId::from)
            .or_else(|| config.agent.model_id())
    }
}

/// Build the agent with the real runtime and search backends.
pub async fn build_agent(
    config: &AppConfig,
    requested: Option<ModelId>,
    observer: Option<EventObserver>,
) -> Result<ResearchAgent, Box<dyn std::error::Error>> {
    debug!(program = %config.runtime.program, requested = ?requested, "Building agent");
    let runtime = Arc::new(OllamaCli::from_config(&config.runtime));
    let search = Arc::new(DuckDuckGoSearch::new(&config.search)?);
    let agent = ResearchAgent::with_observer(
        runtime,
        search,
        requested,
        AgentSettings::from_config(config),
        observer,
    )
    .await?;
    Ok(agent)
}

/// Prints progress lines to stderr.
pub fn progress_printer() -> EventObserver {
    Arc::new(|event: &AgentEvent| match event {
        AgentEvent::ModelSelected {
            model,
            auto_detected: true,
        } => eprintln!("ℹ️  Using model: {model}"),
        AgentEvent::ModelSelected { .. } => {}
        AgentEvent::SearchStarted { query } => {
            eprintln!("🔍 Searching the web for: {query}")
        }
        AgentEvent::SearchCompleted { results } => eprintln!("   {results} result(s) found"),
        AgentEvent::SearchFailed { error } => {
            eprintln!("⚠️  Web search failed, answering without results: {error}")
        }
        AgentEvent::GenerationStarted { .. } => eprintln!("💭 Generating answer..."),
        AgentEvent::GenerationFailed { .. } => {}
    })
}

/// Join command-line words into one request, or explain how to call us.
pub fn join_words(words: &[String], usage: &str) -> Result<String, Box<dyn std::error::Error>> {
    let text = words.join(" ");
    if text.trim().is_empty() {
        eprintln!("❌ Error: you must provide a question");
        eprintln!();
        eprintln!("Usage:");
        eprintln!("   {usage}");
        eprintln!();
        eprintln!("Example:");
        eprintln!("   quickseek \"What is Rust?\"");
        return Err("no question given".into());
    }
    Ok(text)
}
