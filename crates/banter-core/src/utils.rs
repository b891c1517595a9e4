//! Utility helpers — path resolution and time formatting.

use std::path::PathBuf;

/// Get the Banter data directory (e.g. `~/.banter/`).
pub fn get_data_path() -> PathBuf {
    let home = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".banter")
}

/// Get the REPL history file path (e.g. `~/.banter/history/cli_history`).
pub fn get_history_path() -> PathBuf {
    get_data_path().join("history").join("cli_history")
}

/// Current local wall-clock time as `YYYY-MM-DD HH:MM:SS`.
pub fn wall_clock() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
