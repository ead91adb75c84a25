//! quickseek CLI — the main entry point.
//!
//! Usage:
//! - `quickseek <question...>` — research a question (web search + local model)
//! - `quickseek chat <message...>` — talk to the model without searching
//! - `quickseek models` — list locally installed models
//! - `quickseek doctor` — verify the installation

use clap::{Parser, Subcommand};
use quickseek_core::AgentError;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

#[derive(Parser)]
#[command(
    name = "quickseek",
    about = "quickseek — answer questions with a local model and web search",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// The question to research (all words are joined with spaces).
    /// A subcommand name is only recognised as the first word.
    question: Vec<String>,

    /// Model to use instead of the first installed one
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Path to a config file (default: ~/.quickseek/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a message straight to the model, without web search
    Chat {
        /// The message (all words are joined with spaces)
        message: Vec<String>,
    },

    /// List locally installed models
    Models,

    /// Diagnose the installation
    Doctor,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the answer
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let opts = commands::GlobalOpts {
        model: cli.model,
        config: cli.config,
    };

    let result = match cli.command {
        Some(Commands::Chat { message }) => commands::chat::run(&message, &opts).await,
        Some(Commands::Models) => commands::models::run(&opts).await,
        Some(Commands::Doctor) => commands::doctor::run(&opts).await,
        None => commands::research::run(&cli.question, &opts).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(e.as_ref());
            ExitCode::FAILURE
        }
    }
}

/// Print a fatal error, with remediation steps when we have them.
fn report_error(err: &(dyn std::error::Error + 'static)) {
    eprintln!();
    eprintln!("❌ {err}");

    if let Some(agent_err) = err.downcast_ref::<AgentError>() {
        eprintln!();
        for line in agent_err.remediation() {
            eprintln!("   {line}");
        }
        eprintln!();
        eprintln!("💡 Run `quickseek doctor` to verify the installation.");
        eprintln!("   Ejecuta `quickseek doctor` para verificar la instalación.");
    }
}
