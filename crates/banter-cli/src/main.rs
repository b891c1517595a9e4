//! Banter CLI — entry point.
//!
//! # Commands
//!
//! - `banter` — interactive chat with the configured model
//! - `banter chat -m MESSAGE` — single-shot chat
//! - `banter onboard` — create the default config file
//! - `banter status` — show configuration and responder routing

mod helpers;
mod onboard;
mod repl;
mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use banter_core::config::load_config;
use banter_providers::select_responder;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// 💬 Banter — console chatbot for OpenAI, Anthropic, Gemini, and Ollama
#[derive(Parser)]
#[command(name = "banter", version, about, long_about = None)]
struct Cli {
    /// Defaults to `chat` when omitted.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the configured model (single-shot or interactive)
    Chat {
        /// Single message (non-interactive). Omit for the interactive loop.
        #[arg(short, long)]
        message: Option<String>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Create the default configuration file
    Onboard,

    /// Show configuration and responder routing
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Chat {
        message: None,
        logs: false,
    });

    match command {
        Commands::Chat { message, logs } => {
            init_logging(logs);
            run_chat(message, logs).await
        }
        Commands::Onboard => onboard::run(),
        Commands::Status => status::run(),
    }
}

// ─────────────────────────────────────────────
// Chat command
// ─────────────────────────────────────────────

async fn run_chat(message: Option<String>, show_logs: bool) -> Result<()> {
    let config = load_config(None);
    let responder = select_responder(&config);

    match message {
        Some(text) => {
            // Single-shot mode
            info!(responder = responder.name(), "processing single message");
            let reply = responder.respond(&text).await;
            helpers::print_reply(&reply);
        }
        None => {
            // Interactive loop; the spinner would garble log output
            repl::run(responder, !show_logs).await?;
        }
    }

    Ok(())
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("banter=debug,banter_core=debug,banter_providers=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
