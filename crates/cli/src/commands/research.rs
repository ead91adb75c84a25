//! `quickseek <question>` — research a question with web search + local model.

use super::{GlobalOpts, RULE};

pub async fn run(words: &[String], opts: &GlobalOpts) -> Result<(), Box<dyn std::error::Error>> {
    let question = super::join_words(words, "quickseek \"your question here\"")?;
    let config = opts.load_config()?;

    println!("{RULE}");
    println!("🤖 QUICKSEEK RESEARCH AGENT");
    println!("{RULE}");
    println!();
    println!("❓ Question: {question}");
    println!();

    let agent = super::build_agent(
        &config,
        opts.requested_model(&config),
        Some(super::progress_printer()),
    )
    .await?;

    let response = agent.research(&question).await;

    println!();
    println!("{RULE}");
    println!("📝 ANSWER");
    println!("{RULE}");
    println!();
    println!("{response}");
    println!();
    println!("{RULE}");

    Ok(())
}
