//! `quickseek chat <message>` — talk to the model directly, no web search.

use super::{GlobalOpts, RULE};

pub async fn run(words: &[String], opts: &GlobalOpts) -> Result<(), Box<dyn std::error::Error>> {
    let message = super::join_words(words, "quickseek chat \"your message here\"")?;
    let config = opts.load_config()?;

    println!("{RULE}");
    println!("💬 QUICKSEEK CHAT");
    println!("{RULE}");
    println!();
    println!("👤 You: {message}");
    println!();

    let agent = super::build_agent(
        &config,
        opts.requested_model(&config),
        Some(super::progress_printer()),
    )
    .await?;

    let response = agent.chat(&message).await;

    println!();
    println!("🤖 {response}");
    println!();
    println!("{RULE}");

    Ok(())
}
