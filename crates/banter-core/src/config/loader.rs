//! Config loader — reads `~/.banter/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.banter/config.json`
//! 3. Environment variables `BANTER_<SECTION>__<FIELD>` (override JSON)
//!
//! A missing or broken config file is never fatal — the chatbot falls back
//! to defaults (and therefore, with no API key, to the offline responder).

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be
/// parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    apply_env_overrides(load_config_from_path(&config_path))
}

/// Load config from a specific file path. File contents only — env
/// overrides are layered on by `load_config`.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            Config::default()
        }
    }
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    // Ensure parent directory exists
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `BANTER_<SECTION>__<FIELD>` (double underscore as
/// delimiter).
///
/// Supported overrides:
/// - `BANTER_CHAT__MODEL` → `chat.model`
/// - `BANTER_CHAT__MAX_TOKENS` → `chat.max_tokens`
/// - `BANTER_CHAT__TEMPERATURE` → `chat.temperature`
/// - `BANTER_PROVIDER__API_KEY` → `provider.api_key`
/// - `BANTER_PROVIDER__BASE_URL` → `provider.base_url`
/// - `BANTER_PROVIDER__OLLAMA_URL` → `provider.ollama_url`
/// - `BANTER_PROVIDER__FALLBACK` → `provider.fallback`
fn apply_env_overrides(mut config: Config) -> Config {
    // Chat defaults
    if let Ok(val) = std::env::var("BANTER_CHAT__MODEL") {
        config.chat.model = val;
    }
    if let Ok(val) = std::env::var("BANTER_CHAT__MAX_TOKENS") {
        if let Ok(n) = val.parse::<u32>() {
            config.chat.max_tokens = n;
        }
    }
    if let Ok(val) = std::env::var("BANTER_CHAT__TEMPERATURE") {
        if let Ok(t) = val.parse::<f64>() {
            config.chat.temperature = t;
        }
    }

    // Provider
    if let Ok(val) = std::env::var("BANTER_PROVIDER__API_KEY") {
        config.provider.api_key = val;
    }
    if let Ok(val) = std::env::var("BANTER_PROVIDER__BASE_URL") {
        config.provider.base_url = Some(val);
    }
    if let Ok(val) = std::env::var("BANTER_PROVIDER__OLLAMA_URL") {
        config.provider.ollama_url = val;
    }
    if let Ok(val) = std::env::var("BANTER_PROVIDER__FALLBACK") {
        config.provider.fallback = val;
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_missing_file() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.json"));
        // Should return defaults
        assert_eq!(config.chat.model, "gpt-4");
        assert_eq!(config.chat.max_tokens, 150);
    }

    #[test]
    fn test_load_valid_json() {
        let file = write_temp_json(
            r#"{
            "chat": {
                "model": "llama3.1:8b",
                "maxTokens": 256
            }
        }"#,
        );

        let config = load_config_from_path(file.path());
        assert_eq!(config.chat.model, "llama3.1:8b");
        assert_eq!(config.chat.max_tokens, 256);
        // Default preserved
        assert_eq!(config.chat.temperature, 0.7);
    }

    #[test]
    fn test_load_invalid_json_returns_defaults() {
        let file = write_temp_json("not valid json {{{");
        let config = load_config_from_path(file.path());
        assert_eq!(config.chat.max_tokens, 150);
    }

    #[test]
    fn test_load_empty_json() {
        let file = write_temp_json("{}");
        let config = load_config_from_path(file.path());
        assert_eq!(config.chat.model, "gpt-4");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.chat.model = "gemini-1.5-flash".to_string();
        config.provider.api_key = "AIza-test".to_string();

        save_config(&config, Some(&path)).unwrap();

        let reloaded = load_config_from_path(&path);
        assert_eq!(reloaded.chat.model, "gemini-1.5-flash");
        assert_eq!(reloaded.provider.api_key, "AIza-test");
    }

    #[test]
    fn test_env_override_model() {
        std::env::set_var("BANTER_CHAT__MODEL", "mistral:7b");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.chat.model, "mistral:7b");
        std::env::remove_var("BANTER_CHAT__MODEL");
    }

    #[test]
    fn test_env_override_api_key() {
        std::env::set_var("BANTER_PROVIDER__API_KEY", "sk-env-key");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.provider.api_key, "sk-env-key");
        std::env::remove_var("BANTER_PROVIDER__API_KEY");
    }

    #[test]
    fn test_env_override_numeric_parsing() {
        std::env::set_var("BANTER_CHAT__MAX_TOKENS", "512");
        std::env::set_var("BANTER_CHAT__TEMPERATURE", "not-a-number");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.chat.max_tokens, 512);
        // Unparseable value leaves the default in place
        assert_eq!(config.chat.temperature, 0.7);
        std::env::remove_var("BANTER_CHAT__MAX_TOKENS");
        std::env::remove_var("BANTER_CHAT__TEMPERATURE");
    }

    #[test]
    fn test_saved_json_uses_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        save_config(&Config::default(), Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert!(raw["chat"].get("maxTokens").is_some());
        assert!(raw["chat"].get("max_tokens").is_none());
        assert!(raw["provider"].get("ollamaUrl").is_some());
    }

    #[test]
    fn test_full_config_file() {
        let file = write_temp_json(
            r#"{
            "chat": {
                "model": "foo-bar",
                "maxTokens": 200,
                "temperature": 0.9
            },
            "provider": {
                "apiKey": "sk-123",
                "baseUrl": "https://llm.internal/v1",
                "fallback": "openai"
            }
        }"#,
        );

        let config = load_config_from_path(file.path());
        assert_eq!(config.chat.model, "foo-bar");
        assert_eq!(config.chat.temperature, 0.9);
        assert_eq!(config.provider.base_url.as_deref(), Some("https://llm.internal/v1"));
        assert_eq!(config.provider.fallback, "openai");
        // Ollama URL default preserved
        assert_eq!(config.provider.ollama_url, "http://localhost:11434/");
    }
}
