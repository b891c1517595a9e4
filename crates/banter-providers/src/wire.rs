//! Wire-format types for each upstream provider.
//!
//! Field names are the protocol contract: OpenAI-compatible and Ollama
//! bodies use snake_case, Gemini uses camelCase. Response structs default
//! every field so an unexpected-but-valid JSON shape degrades to "no reply
//! text" instead of a parse failure.

use serde::{Deserialize, Serialize};

use crate::traits::RequestParams;

// ─────────────────────────────────────────────
// Shared chat message (OpenAI-compatible + Ollama)
// ─────────────────────────────────────────────

/// One `{role, content}` chat message.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

// ─────────────────────────────────────────────
// OpenAI-compatible (OpenAI + custom endpoints)
// ─────────────────────────────────────────────

/// Request body for `POST {base}/chat/completions`.
#[derive(Debug, Serialize)]
pub struct OpenAiRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl OpenAiRequest {
    pub fn new(model: &str, system: &str, user: &str, params: &RequestParams) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OpenAiResponse {
    #[serde(default)]
    pub choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OpenAiChoice {
    #[serde(default)]
    pub message: ChatMessage,
}

impl OpenAiResponse {
    /// `choices[0].message.content`, if present and non-blank.
    pub fn reply_text(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|choice| non_blank(&choice.message.content))
    }
}

// ─────────────────────────────────────────────
// Anthropic
// ─────────────────────────────────────────────

/// Request body for `POST {base}/messages`.
///
/// Anthropic takes the user turn only — there is no system message in this
/// shape.
#[derive(Debug, Serialize)]
pub struct AnthropicRequest {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub messages: Vec<ChatMessage>,
}

impl AnthropicRequest {
    pub fn new(model: &str, user: &str, params: &RequestParams) -> Self {
        Self {
            model: model.to_string(),
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            messages: vec![ChatMessage::user(user)],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AnthropicResponse {
    #[serde(default)]
    pub content: Vec<AnthropicContent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnthropicContent {
    #[serde(default)]
    pub text: String,
}

impl AnthropicResponse {
    /// `content[0].text`, if present and non-blank.
    pub fn reply_text(&self) -> Option<String> {
        self.content.first().and_then(|block| non_blank(&block.text))
    }
}

// ─────────────────────────────────────────────
// Gemini
// ─────────────────────────────────────────────

/// Request body for `POST {base}/models/{model}:generateContent?key=…`.
///
/// This shape has no system role, so the system prompt is folded into the
/// single user part. All generation fields are camelCase on the wire.
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub top_p: f64,
    pub top_k: u32,
}

impl GeminiRequest {
    pub fn new(system: &str, user: &str, params: &RequestParams) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: format!("{}\n\n{}", system, user),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: params.temperature,
                max_output_tokens: params.max_tokens,
                top_p: 0.8,
                top_k: 10,
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: GeminiContent,
}

impl GeminiResponse {
    /// `candidates[0].content.parts[0].text`, if present and non-blank.
    pub fn reply_text(&self) -> Option<String> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .and_then(|part| non_blank(&part.text))
    }
}

// ─────────────────────────────────────────────
// Ollama
// ─────────────────────────────────────────────

/// Request body for `POST {ollama_url}api/chat`.
#[derive(Debug, Serialize)]
pub struct OllamaRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    pub options: OllamaOptions,
}

#[derive(Debug, Serialize)]
pub struct OllamaOptions {
    pub temperature: f64,
    pub num_predict: u32,
}

impl OllamaRequest {
    pub fn new(model: &str, system: &str, user: &str, params: &RequestParams) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            stream: false,
            options: OllamaOptions {
                temperature: params.temperature,
                num_predict: params.max_tokens,
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OllamaResponse {
    #[serde(default)]
    pub message: ChatMessage,
}

impl OllamaResponse {
    /// `message.content`, if non-blank.
    pub fn reply_text(&self) -> Option<String> {
        non_blank(&self.message.content)
    }
}

/// Trimmed reply text, or `None` when nothing usable came back.
fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
