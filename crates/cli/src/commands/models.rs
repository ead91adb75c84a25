//! `quickseek models` — list locally installed models.

use super::GlobalOpts;
use quickseek_core::error::AgentError;
use quickseek_core::runtime::ModelRuntime;
use quickseek_providers::OllamaCli;

pub async fn run(opts: &GlobalOpts) -> Result<(), Box<dyn std::error::Error>> {
    let config = opts.load_config()?;
    let runtime = OllamaCli::from_config(&config.runtime);

    let models = runtime
        .list_models()
        .await
        .map_err(AgentError::from_listing)?;

    if models.is_empty() {
        return Err(AgentError::NoModelAvailable {
            reason: format!("'{}' lists no installed models", runtime.name()),
        }
        .into());
    }

    println!("✅ Available models:");
    for model in &models {
        println!("   • {model}");
    }

    Ok(())
}
