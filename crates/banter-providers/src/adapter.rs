//! Provider adapter — one HTTP round trip per turn.
//!
//! Routing is driven entirely by the model name: `classify` picks the
//! provider, and a per-provider endpoint, header set, and body shape are
//! applied around one shared send/extract path. Failures never escape
//! `respond` — each failure class folds into a fixed user-facing sentence.

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::classify::{classify, FallbackPolicy, ProviderKind};
use crate::traits::{RequestParams, Responder};
use crate::wire::{
    AnthropicRequest, AnthropicResponse, GeminiRequest, GeminiResponse, OllamaRequest,
    OllamaResponse, OpenAiRequest, OpenAiResponse,
};

// ─────────────────────────────────────────────
// Fixed endpoints and reply sentences
// ─────────────────────────────────────────────

const OPENAI_BASE: &str = "https://api.openai.com/v1";
const ANTHROPIC_BASE: &str = "https://api.anthropic.com/v1";
const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// System prompt sent with every request.
const SYSTEM_PROMPT: &str =
    "You are a friendly assistant chatting in a terminal. Keep replies short and conversational.";

/// Reply shown when the provider cannot be reached or answers with an
/// error status.
pub const CONNECTIVITY_REPLY: &str =
    "I'm having trouble connecting to my AI service right now. Please try again in a moment.";

/// Reply shown when the provider answered but no reply text was found in
/// the response.
pub const REPHRASE_REPLY: &str = "I didn't understand that, could you rephrase?";

/// Reply shown for any other failure in the call path.
pub const GENERIC_FAILURE_REPLY: &str = "Something went wrong, please try again.";

// ─────────────────────────────────────────────
// Error taxonomy
// ─────────────────────────────────────────────

/// What went wrong during one adapter call.
///
/// Never escapes [`ProviderAdapter::respond`] — each variant folds into one
/// of the fixed reply sentences.
#[derive(Debug, Error)]
enum AdapterError {
    /// The request never completed (connection refused, DNS, timeout).
    #[error("request failed: {0}")]
    Send(reqwest::Error),
    /// The provider answered with a non-success status.
    #[error("provider returned status {0}")]
    Status(StatusCode),
    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(reqwest::Error),
    /// The response body was not the documented JSON shape.
    #[error("failed to parse response: {0}")]
    Parse(serde_json::Error),
    /// Valid JSON, but no usable reply text inside.
    #[error("response carried no reply text")]
    MissingReply,
}

impl AdapterError {
    /// The fixed sentence shown to the user for this failure class.
    fn user_reply(&self) -> &'static str {
        match self {
            AdapterError::Send(_) | AdapterError::Status(_) => CONNECTIVITY_REPLY,
            AdapterError::Body(_) | AdapterError::Parse(_) => GENERIC_FAILURE_REPLY,
            AdapterError::MissingReply => REPHRASE_REPLY,
        }
    }
}

// ─────────────────────────────────────────────
// ProviderAdapter
// ─────────────────────────────────────────────

/// Responder that forwards each turn to an LLM HTTP API.
///
/// The model name decides the provider; endpoint, auth, and body shape
/// follow from it. One instance serves one configured model — pointing the
/// process at a different provider means constructing a new adapter.
pub struct ProviderAdapter {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// Model identifier this process was configured with.
    model: String,
    /// Immutable request parameters.
    params: RequestParams,
    /// Policy for model names no routing rule matches.
    fallback: FallbackPolicy,
}

impl std::fmt::Debug for ProviderAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderAdapter")
            .field("model", &self.model)
            .field("provider", &self.kind().display_name())
            .finish()
    }
}

impl ProviderAdapter {
    /// Create an adapter for the configured model.
    pub fn new(model: &str, params: RequestParams, fallback: FallbackPolicy) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            model: model.to_string(),
            params,
            fallback,
        }
    }

    /// The provider this adapter routes to.
    ///
    /// Derived from the model name on every call rather than cached; the
    /// model is immutable, so the answer never changes.
    pub fn kind(&self) -> ProviderKind {
        classify(&self.model, self.fallback)
    }

    /// Resolve the endpoint URL for one call.
    fn endpoint(&self, kind: ProviderKind) -> String {
        match kind {
            ProviderKind::OpenAi => format!("{}/chat/completions", OPENAI_BASE),
            ProviderKind::Anthropic => format!("{}/messages", ANTHROPIC_BASE),
            ProviderKind::Gemini => format!(
                "{}/models/{}:generateContent?key={}",
                GEMINI_BASE, self.model, self.params.api_key
            ),
            ProviderKind::Ollama => {
                let base = self.params.ollama_url.trim_end_matches('/');
                format!("{}/api/chat", base)
            }
            ProviderKind::Custom => {
                let base = self
                    .params
                    .base_url
                    .as_deref()
                    .unwrap_or(OPENAI_BASE)
                    .trim_end_matches('/');
                format!("{}/chat/completions", base)
            }
        }
    }

    /// Header set for one call. Gemini authenticates in the query string
    /// and Ollama not at all, so both send no headers.
    fn headers(&self, kind: ProviderKind) -> Vec<(&'static str, String)> {
        match kind {
            ProviderKind::OpenAi => vec![(
                "Authorization",
                format!("Bearer {}", self.params.api_key),
            )],
            ProviderKind::Anthropic => vec![
                ("x-api-key", self.params.api_key.clone()),
                ("anthropic-version", ANTHROPIC_VERSION.to_string()),
            ],
            ProviderKind::Gemini | ProviderKind::Ollama => vec![],
            ProviderKind::Custom => {
                if self.params.api_key.is_empty() {
                    vec![]
                } else {
                    vec![(
                        "Authorization",
                        format!("Bearer {}", self.params.api_key),
                    )]
                }
            }
        }
    }

    /// Perform the single HTTP round trip for one turn.
    async fn call(&self, kind: ProviderKind, text: &str) -> Result<String, AdapterError> {
        let url = self.endpoint(kind);

        let mut request = self.client.post(&url);
        for (name, value) in self.headers(kind) {
            request = request.header(name, value);
        }

        let request = match kind {
            ProviderKind::OpenAi | ProviderKind::Custom => request.json(&OpenAiRequest::new(
                &self.model,
                SYSTEM_PROMPT,
                text,
                &self.params,
            )),
            ProviderKind::Anthropic => {
                request.json(&AnthropicRequest::new(&self.model, text, &self.params))
            }
            ProviderKind::Gemini => {
                request.json(&GeminiRequest::new(SYSTEM_PROMPT, text, &self.params))
            }
            ProviderKind::Ollama => request.json(&OllamaRequest::new(
                &self.model,
                SYSTEM_PROMPT,
                text,
                &self.params,
            )),
        };

        let response = request.send().await.map_err(AdapterError::Send)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdapterError::Status(status));
        }

        let body = response.text().await.map_err(AdapterError::Body)?;
        extract_reply(kind, &body)
    }
}

/// Pull the reply text out of a provider-specific response body.
fn extract_reply(kind: ProviderKind, body: &str) -> Result<String, AdapterError> {
    let reply = match kind {
        ProviderKind::OpenAi | ProviderKind::Custom => serde_json::from_str::<OpenAiResponse>(body)
            .map_err(AdapterError::Parse)?
            .reply_text(),
        ProviderKind::Anthropic => serde_json::from_str::<AnthropicResponse>(body)
            .map_err(AdapterError::Parse)?
            .reply_text(),
        ProviderKind::Gemini => serde_json::from_str::<GeminiResponse>(body)
            .map_err(AdapterError::Parse)?
            .reply_text(),
        ProviderKind::Ollama => serde_json::from_str::<OllamaResponse>(body)
            .map_err(AdapterError::Parse)?
            .reply_text(),
    };

    reply.ok_or(AdapterError::MissingReply)
}

#[async_trait]
impl Responder for ProviderAdapter {
    async fn respond(&self, text: &str) -> String {
        let kind = self.kind();

        debug!(
            provider = %kind,
            model = %self.model,
            max_tokens = self.params.max_tokens,
            "Sending chat request"
        );

        match self.call(kind, text).await {
            Ok(reply) => reply,
            Err(err) => {
                match &err {
                    AdapterError::Send(source) => {
                        warn!(provider = %kind, error = %source, "HTTP request failed")
                    }
                    AdapterError::Status(status) => {
                        warn!(provider = %kind, status = %status, "Provider returned error status")
                    }
                    AdapterError::Body(source) => {
                        error!(provider = %kind, error = %source, "Failed to read provider response")
                    }
                    AdapterError::Parse(source) => {
                        error!(provider = %kind, error = %source, "Failed to parse provider response")
                    }
                    // Benign shape mismatch, not worth a warning.
                    AdapterError::MissingReply => {
                        debug!(provider = %kind, "Response carried no reply text")
                    }
                }
                err.user_reply().to_string()
            }
        }
    }

    fn name(&self) -> &str {
        self.kind().display_name()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter(model: &str, params: RequestParams) -> ProviderAdapter {
        ProviderAdapter::new(model, params, FallbackPolicy::default())
    }

    fn custom_params(api_key: &str, base_url: &str) -> RequestParams {
        RequestParams {
            api_key: api_key.to_string(),
            base_url: Some(base_url.to_string()),
            ..RequestParams::default()
        }
    }

    fn ollama_params(url: &str) -> RequestParams {
        RequestParams {
            ollama_url: url.to_string(),
            ..RequestParams::default()
        }
    }

    // ── Routing (no network) ──

    #[test]
    fn test_endpoint_openai() {
        let adapter = adapter("gpt-4", RequestParams::default());
        assert_eq!(
            adapter.endpoint(ProviderKind::OpenAi),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_endpoint_anthropic() {
        let adapter = adapter("claude-3-opus", RequestParams::default());
        assert_eq!(
            adapter.endpoint(ProviderKind::Anthropic),
            "https://api.anthropic.com/v1/messages"
        );
    }

    #[test]
    fn test_endpoint_gemini_puts_key_in_query() {
        let params = RequestParams {
            api_key: "g-key".to_string(),
            ..RequestParams::default()
        };
        let adapter = adapter("gemini-1.5-flash", params);
        assert_eq!(
            adapter.endpoint(ProviderKind::Gemini),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent?key=g-key"
        );
    }

    #[test]
    fn test_endpoint_ollama_handles_trailing_slash() {
        let adapter = adapter("llama3.1:8b", ollama_params("http://localhost:11434/"));
        assert_eq!(
            adapter.endpoint(ProviderKind::Ollama),
            "http://localhost:11434/api/chat"
        );
    }

    #[test]
    fn test_endpoint_custom_uses_configured_base() {
        let adapter = adapter("foo-bar", custom_params("k", "https://llm.internal/v1"));
        assert_eq!(
            adapter.endpoint(ProviderKind::Custom),
            "https://llm.internal/v1/chat/completions"
        );
    }

    #[test]
    fn test_endpoint_custom_defaults_to_openai_base() {
        let adapter = adapter("foo-bar", RequestParams::default());
        assert_eq!(
            adapter.endpoint(ProviderKind::Custom),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_headers_openai_bearer() {
        let params = RequestParams {
            api_key: "sk-123".to_string(),
            ..RequestParams::default()
        };
        let adapter = adapter("gpt-4", params);
        let headers = adapter.headers(ProviderKind::OpenAi);
        assert_eq!(headers, vec![("Authorization", "Bearer sk-123".to_string())]);
    }

    #[test]
    fn test_headers_anthropic_native() {
        let params = RequestParams {
            api_key: "sk-ant-123".to_string(),
            ..RequestParams::default()
        };
        let adapter = adapter("claude-3-opus", params);
        let headers = adapter.headers(ProviderKind::Anthropic);
        assert_eq!(
            headers,
            vec![
                ("x-api-key", "sk-ant-123".to_string()),
                ("anthropic-version", "2023-06-01".to_string()),
            ]
        );
    }

    #[test]
    fn test_headers_gemini_and_ollama_are_empty() {
        let adapter = adapter("gemini-1.5-flash", RequestParams::default());
        assert!(adapter.headers(ProviderKind::Gemini).is_empty());
        assert!(adapter.headers(ProviderKind::Ollama).is_empty());
    }

    #[test]
    fn test_headers_custom_bearer_only_with_key() {
        let with_key = adapter("foo-bar", custom_params("k", "https://llm.internal"));
        assert_eq!(
            with_key.headers(ProviderKind::Custom),
            vec![("Authorization", "Bearer k".to_string())]
        );

        let without_key = adapter("foo-bar", RequestParams::default());
        assert!(without_key.headers(ProviderKind::Custom).is_empty());
    }

    #[test]
    fn test_extract_reply_per_provider() {
        let openai = r#"{"choices":[{"message":{"content":"a"}}]}"#;
        let anthropic = r#"{"content":[{"text":"b"}]}"#;
        let gemini = r#"{"candidates":[{"content":{"parts":[{"text":"c"}]}}]}"#;
        let ollama = r#"{"message":{"content":"d"}}"#;

        assert_eq!(extract_reply(ProviderKind::OpenAi, openai).unwrap(), "a");
        assert_eq!(extract_reply(ProviderKind::Custom, openai).unwrap(), "a");
        assert_eq!(
            extract_reply(ProviderKind::Anthropic, anthropic).unwrap(),
            "b"
        );
        assert_eq!(extract_reply(ProviderKind::Gemini, gemini).unwrap(), "c");
        assert_eq!(extract_reply(ProviderKind::Ollama, ollama).unwrap(), "d");
    }

    #[test]
    fn test_extract_reply_rejects_invalid_json() {
        let result = extract_reply(ProviderKind::OpenAi, "<html>oops</html>");
        assert!(matches!(result, Err(AdapterError::Parse(_))));
    }

    #[test]
    fn test_extract_reply_missing_field() {
        let result = extract_reply(ProviderKind::OpenAi, r#"{"choices":[]}"#);
        assert!(matches!(result, Err(AdapterError::MissingReply)));
    }

    // ── Integration tests with mock server ──

    #[tokio::test]
    async fn test_ollama_round_trip() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(|request: &wiremock::Request| !request.headers.contains_key("authorization"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama3.1:8b",
                "stream": false,
                "options": { "num_predict": 150 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": { "role": "assistant", "content": "Hello from the llama." }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let adapter = adapter("llama3.1:8b", ollama_params(&mock_server.uri()));
        let reply = adapter.respond("Hello").await;

        assert_eq!(reply, "Hello from the llama.");
    }

    #[tokio::test]
    async fn test_custom_round_trip_with_bearer() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-key-123"))
            .and(body_partial_json(serde_json::json!({
                "model": "foo-bar",
                "max_tokens": 150
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "role": "assistant", "content": "Custom says hi." } }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let adapter = adapter("foo-bar", custom_params("test-key-123", &mock_server.uri()));
        let reply = adapter.respond("Hi").await;

        assert_eq!(reply, "Custom says hi.");
    }

    #[tokio::test]
    async fn test_custom_without_key_sends_no_auth_header() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(|request: &wiremock::Request| !request.headers.contains_key("authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "content": "ok" } }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let params = RequestParams {
            base_url: Some(mock_server.uri()),
            ..RequestParams::default()
        };
        let adapter = adapter("foo-bar", params);

        assert_eq!(adapter.respond("Hi").await, "ok");
    }

    #[tokio::test]
    async fn test_one_request_per_turn() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": { "content": "ok" }
            })))
            .expect(2)
            .mount(&mock_server)
            .await;

        let adapter = adapter("llama3.1:8b", ollama_params(&mock_server.uri()));
        adapter.respond("first").await;
        adapter.respond("second").await;
    }

    #[tokio::test]
    async fn test_http_500_maps_to_connectivity_reply() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let adapter = adapter("foo-bar", custom_params("k", &mock_server.uri()));
        assert_eq!(adapter.respond("Hi").await, CONNECTIVITY_REPLY);
    }

    #[tokio::test]
    async fn test_empty_choices_maps_to_rephrase_reply() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&mock_server)
            .await;

        let adapter = adapter("foo-bar", custom_params("k", &mock_server.uri()));
        assert_eq!(adapter.respond("Hi").await, REPHRASE_REPLY);
    }

    #[tokio::test]
    async fn test_blank_reply_maps_to_rephrase_reply() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": { "content": "   " }
            })))
            .mount(&mock_server)
            .await;

        let adapter = adapter("llama3.1:8b", ollama_params(&mock_server.uri()));
        assert_eq!(adapter.respond("Hi").await, REPHRASE_REPLY);
    }

    #[tokio::test]
    async fn test_non_json_body_maps_to_generic_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let adapter = adapter("foo-bar", custom_params("k", &mock_server.uri()));
        assert_eq!(adapter.respond("Hi").await, GENERIC_FAILURE_REPLY);
    }

    #[tokio::test]
    async fn test_connection_refused_maps_to_connectivity_reply() {
        // Point to a port that's not listening.
        let adapter = adapter("llama3.1:8b", ollama_params("http://127.0.0.1:1"));
        assert_eq!(adapter.respond("Hi").await, CONNECTIVITY_REPLY);
    }

    #[test]
    fn test_name_reports_provider() {
        assert_eq!(adapter("gpt-4", RequestParams::default()).name(), "OpenAI");
        assert_eq!(
            adapter("llama3.1:8b", RequestParams::default()).name(),
            "Ollama"
        );
    }

    #[test]
    fn test_debug_omits_api_key() {
        let params = RequestParams {
            api_key: "sk-very-secret".to_string(),
            ..RequestParams::default()
        };
        let rendered = format!("{:?}", adapter("gpt-4", params));
        assert!(!rendered.contains("sk-very-secret"));
    }
}
