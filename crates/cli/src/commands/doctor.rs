//! `quickseek doctor` — verify the runtime, the models, search, and the agent.

use super::{GlobalOpts, RULE};
use quickseek_agent::{AgentSettings, ResearchAgent};
use quickseek_core::error::{RUNTIME_DOWNLOAD_URL, SUGGESTED_MODEL};
use quickseek_core::model::ModelId;
use quickseek_core::runtime::ModelRuntime;
use quickseek_core::search::SearchProvider;
use quickseek_providers::OllamaCli;
use quickseek_search::DuckDuckGoSearch;
use std::sync::Arc;

/// Outcome of one diagnostic.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
    pub hint: Option<String>,
}

impl CheckResult {
    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            passed: true,
            detail: detail.into(),
            hint: None,
        }
    }

    fn fail(name: &'static str, detail: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            name,
            passed: false,
            detail: detail.into(),
            hint,
        }
    }
}

pub async fn run(opts: &GlobalOpts) -> Result<(), Box<dyn std::error::Error>> {
    println!("{RULE}");
    println!("🩺 QUICKSEEK DOCTOR");
    println!("{RULE}");
    println!();

    let config = opts.load_config()?;
    println!("  ✅ Config loaded");

    let runtime: Arc<dyn ModelRuntime> = Arc::new(OllamaCli::from_config(&config.runtime));
    let search: Arc<dyn SearchProvider> = Arc::new(DuckDuckGoSearch::new(&config.search)?);

    let results = run_checks(
        runtime,
        search,
        opts.requested_model(&config),
        AgentSettings::from_config(&config),
    )
    .await;

    for check in &results {
        let mark = if check.passed { "✅" } else { "❌" };
        println!("  {mark} {}: {}", check.name, check.detail);
        if let Some(hint) = &check.hint {
            println!("     📥 {hint}");
        }
    }

    let passed = results.iter().filter(|c| c.passed).count();
    println!();
    println!("{RULE}");
    println!("📊 {passed}/{} checks passed", results.len());
    println!("{RULE}");

    if passed == results.len() {
        println!("🎉 All checks passed! Try: quickseek \"What is Rust?\"");
        Ok(())
    } else {
        Err(format!("{} check(s) failed", results.len() - passed).into())
    }
}

/// Run every diagnostic in order. Each check is independent, so a failure
/// early on does not hide the others.
pub async fn run_checks(
    runtime: Arc<dyn ModelRuntime>,
    search: Arc<dyn SearchProvider>,
    requested: Option<ModelId>,
    settings: AgentSettings,
) -> Vec<CheckResult> {
    let mut results = Vec::with_capacity(4);

    results.push(match runtime.version().await {
        Ok(version) => CheckResult::pass("Runtime", version),
        Err(e) => CheckResult::fail(
            "Runtime",
            e.to_string(),
            Some(format!("Download it from: {RUNTIME_DOWNLOAD_URL}")),
        ),
    });

    results.push(match runtime.list_models().await {
        Ok(models) if !models.is_empty() => {
            let names: Vec<String> = models.iter().map(ToString::to_string).collect();
            CheckResult::pass("Models", names.join(", "))
        }
        Ok(_) => CheckResult::fail(
            "Models",
            "no models installed",
            Some(format!("Install one with: ollama pull {SUGGESTED_MODEL}")),
        ),
        Err(e) => CheckResult::fail("Models", e.to_string(), None),
    });

    results.push(match search.search("test", 1).await {
        Ok(hits) if !hits.is_empty() => CheckResult::pass("Web search", "working"),
        Ok(_) => CheckResult::fail("Web search", "no results returned", None),
        Err(e) => CheckResult::fail("Web search", e.to_string(), None),
    });

    results.push(
        match ResearchAgent::new(runtime, search, requested, settings).await {
            Ok(agent) => {
                let response = agent.chat("Say only 'Hello'").await;
                let text = response.text();
                if response.is_failure() {
                    CheckResult::fail("Agent", text, None)
                } else if text.trim().is_empty() {
                    CheckResult::fail("Agent", "empty response", None)
                } else {
                    let preview: String = text.chars().take(50).collect();
                    CheckResult::pass("Agent", format!("{} replied: {preview}", agent.model()))
                }
            }
            Err(e) => CheckResult::fail("Agent", e.to_string(), None),
        },
    );

    results
}
