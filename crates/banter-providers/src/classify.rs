//! Model-name → provider classification.
//!
//! The model identifier is the only routing input: a short list of
//! case-insensitive prefix/substring rules decides which provider a call
//! goes to. The mapping is total — names no rule matches fall through to a
//! configurable fallback policy.
//!
//! Kept free of HTTP and config concerns so the rules stay trivially
//! testable.

use std::fmt;

// ─────────────────────────────────────────────
// ProviderKind
// ─────────────────────────────────────────────

/// The five routing targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Gemini,
    Ollama,
    /// OpenAI-compatible endpoint at a user-configured base URL.
    Custom,
}

impl ProviderKind {
    /// Display name for logging and status output.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Anthropic => "Anthropic",
            ProviderKind::Gemini => "Gemini",
            ProviderKind::Ollama => "Ollama",
            ProviderKind::Custom => "Custom",
        }
    }

    /// Whether this provider runs on the local machine and needs no key.
    pub fn is_local(&self) -> bool {
        matches!(self, ProviderKind::Ollama)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ─────────────────────────────────────────────
// FallbackPolicy
// ─────────────────────────────────────────────

/// What to do with a model name no rule matches.
///
/// Both behaviors exist in the wild, so the choice is an explicit policy
/// instead of a hard-coded default: route to the configured custom endpoint,
/// or assume plain OpenAI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Unmatched names go to the custom OpenAI-compatible endpoint.
    CustomEndpoint,
    /// Unmatched names are treated as OpenAI models.
    OpenAi,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        FallbackPolicy::CustomEndpoint
    }
}

impl FallbackPolicy {
    /// Parse the `provider.fallback` config value.
    ///
    /// `"openai"` selects [`FallbackPolicy::OpenAi`]; anything else keeps
    /// the default.
    pub fn from_config_value(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "openai" => FallbackPolicy::OpenAi,
            _ => FallbackPolicy::CustomEndpoint,
        }
    }
}

// ─────────────────────────────────────────────
// Classification
// ─────────────────────────────────────────────

/// Model families served locally through Ollama.
const OLLAMA_FAMILIES: &[&str] = &[
    "llama",
    "mistral",
    "deepseek",
    "qwen",
    "stable-code",
    "gpt-oss",
];

/// Classify a model identifier into a [`ProviderKind`].
///
/// Rules are checked in priority order, case-insensitively:
///
/// 1. `gpt-` or `o1-` prefix → OpenAI (except `gpt-oss`, which rule 4
///    claims as a local family)
/// 2. `claude-` prefix → Anthropic
/// 3. `gemini-` prefix → Gemini
/// 4. a local family prefix (`llama`, `mistral`, `deepseek`, `qwen`,
///    `stable-code`, `gpt-oss`), or `local` / `:` anywhere in the name
///    → Ollama
/// 5. anything else → the fallback policy
///
/// Pure and total: every string maps to exactly one kind, the same one on
/// every call.
pub fn classify(model: &str, fallback: FallbackPolicy) -> ProviderKind {
    let lower = model.to_lowercase();

    if (lower.starts_with("gpt-") && !lower.starts_with("gpt-oss")) || lower.starts_with("o1-") {
        return ProviderKind::OpenAi;
    }
    if lower.starts_with("claude-") {
        return ProviderKind::Anthropic;
    }
    if lower.starts_with("gemini-") {
        return ProviderKind::Gemini;
    }
    if OLLAMA_FAMILIES.iter().any(|family| lower.starts_with(family))
        || lower.contains("local")
        || lower.contains(':')
    {
        return ProviderKind::Ollama;
    }

    match fallback {
        FallbackPolicy::CustomEndpoint => ProviderKind::Custom,
        FallbackPolicy::OpenAi => ProviderKind::OpenAi,
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
