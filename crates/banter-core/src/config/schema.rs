//! Configuration schema — typed model of `~/.banter/config.json`.
//!
//! Hierarchy: `Config` → `ChatDefaults`, `ProviderConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};

/// API-key values that count as "not configured".
///
/// These show up when someone copies a config template without filling in a
/// real key; treating them as real would select the live provider and then
/// fail every call.
const KEY_PLACEHOLDERS: &[&str] = &[
    "your-api-key-here",
    "your_api_key_here",
    "<api-key>",
    "changeme",
];

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.banter/config.json` + env vars.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub chat: ChatDefaults,
    pub provider: ProviderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chat: ChatDefaults::default(),
            provider: ProviderConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────
// Chat defaults
// ─────────────────────────────────────────────

/// Default chat settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatDefaults {
    /// LLM model identifier. Only ever used to pick a provider.
    pub model: String,
    /// Maximum tokens to generate per reply.
    pub max_tokens: u32,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
}

impl Default for ChatDefaults {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            max_tokens: 150,
            temperature: 0.7,
        }
    }
}

// ─────────────────────────────────────────────
// Provider
// ─────────────────────────────────────────────

/// Connection settings for the upstream LLM service (API key, endpoints).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// API key for authentication. May be empty or a template placeholder.
    #[serde(default)]
    pub api_key: String,
    /// Custom OpenAI-compatible base URL, used for unrecognized models.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Base URL of the local Ollama server.
    pub ollama_url: String,
    /// What to do with a model name no classification rule matches:
    /// `"custom"` routes it to `base_url`, `"openai"` to OpenAI proper.
    pub fallback: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            ollama_url: "http://localhost:11434/".to_string(),
            fallback: "custom".to_string(),
        }
    }
}

impl ProviderConfig {
    /// Whether the API key is usable — non-empty and not a template
    /// placeholder.
    pub fn has_real_key(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && !KEY_PLACEHOLDERS.contains(&key.to_lowercase().as_str())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
