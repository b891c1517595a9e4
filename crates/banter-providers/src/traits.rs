//! Responder trait — the seam between the conversation loop and whatever
//! produces replies.
//!
//! Two implementations exist: `ProviderAdapter` (real LLM HTTP APIs) and
//! `MockResponder` (offline canned replies). The loop only ever sees this
//! trait.

use async_trait::async_trait;

use banter_core::Config;

/// Trait both responder implementations share.
///
/// A responder turns one line of user text into one reply string. It never
/// fails: implementations fold their own errors into the reply text, so the
/// conversation loop has nothing to recover from.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Produce a reply for a single turn.
    ///
    /// Each call is independent — no conversation memory is kept anywhere.
    async fn respond(&self, text: &str) -> String;

    /// Display name for logging and status output.
    fn name(&self) -> &str;
}

/// Request parameters shared by every provider call.
///
/// Loaded once at startup from configuration and immutable for the process
/// lifetime.
#[derive(Clone)]
pub struct RequestParams {
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f64,
    /// API key. May be empty — the startup selector gates on it.
    pub api_key: String,
    /// Optional custom OpenAI-compatible endpoint.
    pub base_url: Option<String>,
    /// Local Ollama server URL.
    pub ollama_url: String,
}

impl Default for RequestParams {
    fn default() -> Self {
        Self {
            max_tokens: 150,
            temperature: 0.7,
            api_key: String::new(),
            base_url: None,
            ollama_url: "http://localhost:11434/".to_string(),
        }
    }
}

impl RequestParams {
    /// Build request parameters from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_tokens: config.chat.max_tokens,
            temperature: config.chat.temperature,
            api_key: config.provider.api_key.clone(),
            base_url: config.provider.base_url.clone(),
            ollama_url: config.provider.ollama_url.clone(),
        }
    }
}

// Keep the API key out of debug output and logs.
impl std::fmt::Debug for RequestParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestParams")
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("has_api_key", &!self.api_key.is_empty())
            .field("base_url", &self.base_url)
            .field("ollama_url", &self.ollama_url)
            .finish()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
