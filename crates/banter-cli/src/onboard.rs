//! `banter onboard` — create the default configuration file.

use anyhow::Result;
use colored::Colorize;

use banter_core::config::{get_config_path, load_config, save_config};
use banter_core::utils::get_data_path;

/// Run the onboard command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "💬 Banter — Setup".cyan().bold());
    println!();

    let config_path = get_config_path();

    // 1. Create config if it doesn't exist
    if config_path.exists() {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    } else {
        let config = load_config(None); // defaults
        save_config(&config, Some(&config_path))?;
        println!(
            "  {} created config at {}",
            "✓".green(),
            config_path.display()
        );
    }

    // 2. History directory for the interactive loop
    let history_dir = get_data_path().join("history");
    std::fs::create_dir_all(&history_dir)?;
    println!("  {} history dir at {}", "✓".green(), history_dir.display());

    println!();
    println!(
        "{}",
        "  Setup complete! Run `banter` to start chatting.".green()
    );
    println!(
        "{}",
        "  Add an API key to config.json (or set BANTER_PROVIDER__API_KEY) to go online."
            .dimmed()
    );
    println!();

    Ok(())
}
