//! `banter status` — show configuration and responder routing.

use anyhow::Result;
use colored::Colorize;

use banter_core::config::{get_config_path, load_config};
use banter_providers::{classify, select_responder, FallbackPolicy, ProviderKind};

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "💬 Banter Status".cyan().bold());
    println!();

    // Config file
    let config_exists = config_path.exists();
    println!(
        "  {:<14} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_exists {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    // Model + parameters
    println!("  {:<14} {}", "Model:".bold(), config.chat.model);
    println!(
        "  {:<14} {}",
        "Parameters:".bold(),
        format!(
            "temp: {} | max_tokens: {}",
            config.chat.temperature, config.chat.max_tokens
        )
        .dimmed()
    );

    // Routing
    let fallback = FallbackPolicy::from_config_value(&config.provider.fallback);
    let kind = classify(&config.chat.model, fallback);
    println!("  {:<14} {}", "Provider:".bold(), kind.display_name());

    match kind {
        ProviderKind::Ollama => {
            println!(
                "  {:<14} {}",
                "Ollama URL:".bold(),
                config.provider.ollama_url
            );
        }
        ProviderKind::Custom => {
            let base = config
                .provider
                .base_url
                .as_deref()
                .unwrap_or("(OpenAI default)");
            println!("  {:<14} {}", "Base URL:".bold(), base);
        }
        _ => {}
    }

    // Credential
    let key_status = if kind.is_local() {
        "not required".dimmed().to_string()
    } else if config.provider.has_real_key() {
        format!("{} (key set)", "✓".green())
    } else if config.provider.api_key.trim().is_empty() {
        "· not set".yellow().to_string()
    } else {
        "· placeholder value".yellow().to_string()
    };
    println!("  {:<14} {}", "API key:".bold(), key_status);

    // The responder the chat command would pick right now
    let responder = select_responder(&config);
    println!("  {:<14} {}", "Responder:".bold(), responder.name());

    println!();

    Ok(())
}
