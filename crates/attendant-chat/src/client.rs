//! Remote completion client.
//!
//! Serializes a conversation snapshot into one chat-completions request and
//! maps every transport and HTTP outcome into the stable [`ErrorKind`]
//! taxonomy. The client issues exactly one call per invocation and never
//! retries; retry policy, if any, belongs to the caller.

use std::time::Duration;

use async_trait::async_trait;
use attendant_core::{ErrorKind, Message, RemoteConfig};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::{ChatError, CompletionError};

// =============================================================================
// Backend seam
// =============================================================================

/// Anything that can resolve a conversation snapshot into a reply.
///
/// The chat session talks to the remote service only through this trait, so
/// sessions can be exercised without the network.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, messages: &[Message]) -> Result<String, CompletionError>;
}

// =============================================================================
// Wire shapes
// =============================================================================

/// Request body. The four required fields (`model`, `messages`, `max_tokens`,
/// `temperature`) plus the explicit `stream: false` marker.
#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
    temperature: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// =============================================================================
// Outcome mapping
// =============================================================================

/// Map a non-success HTTP status (plus its body) to a classified failure.
fn classify_failure(status: u16, body: &str) -> CompletionError {
    match status {
        402 => CompletionError::of_kind(ErrorKind::NoCredits),
        401 => CompletionError::of_kind(ErrorKind::InvalidKey),
        429 => CompletionError::of_kind(ErrorKind::RateLimited),
        400 if body.contains("not a valid model ID") => CompletionError {
            kind: ErrorKind::BadConfiguration,
            message: "Invalid model configuration. Please check the configured model ID."
                .to_string(),
        },
        400 => CompletionError::of_kind(ErrorKind::BadConfiguration),
        _ => CompletionError::of_kind(ErrorKind::Unknown),
    }
}

/// Extract the first choice's message content from a success body.
///
/// A structurally malformed body, and an empty reply, are both failures;
/// this never turns a broken response into a silent empty string.
fn parse_reply(body: &str) -> Result<String, CompletionError> {
    let parsed: CompletionResponse = serde_json::from_str(body).map_err(|e| CompletionError {
        kind: ErrorKind::Unknown,
        message: format!("malformed completion response: {}", e),
    })?;

    match parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
    {
        Some(content) if !content.is_empty() => Ok(content),
        _ => Err(CompletionError {
            kind: ErrorKind::Unknown,
            message: "completion response is missing a message body".to_string(),
        }),
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

// =============================================================================
// OpenRouterClient
// =============================================================================

/// HTTP client for an OpenRouter-compatible chat-completions endpoint.
pub struct OpenRouterClient {
    http: reqwest::Client,
    config: RemoteConfig,
}

impl OpenRouterClient {
    /// Build a client. The whole-request timeout comes from the
    /// configuration; expiry surfaces as [`ErrorKind::NetworkError`].
    pub fn new(config: RemoteConfig) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ChatError::Http(e.to_string()))?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl CompletionBackend for OpenRouterClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, CompletionError> {
        let body = CompletionRequest {
            model: &self.config.model,
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            stream: false,
        };

        info!(
            model = %self.config.model,
            context_len = messages.len(),
            "Dispatching completion request"
        );

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.app_title)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("Completion request failed to reach the endpoint: {}", e);
                CompletionError {
                    kind: ErrorKind::NetworkError,
                    message: format!("HTTP request failed: {}", e),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            error!(
                status = status.as_u16(),
                "Completion endpoint error: {}",
                truncate(&body_text, 200)
            );
            return Err(classify_failure(status.as_u16(), &body_text));
        }

        let body_text = response.text().await.map_err(|e| CompletionError {
            kind: ErrorKind::NetworkError,
            message: format!("failed to read response body: {}", e),
        })?;
        parse_reply(&body_text)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use attendant_core::Role;

    // ---- Status mapping ----

    #[test]
    fn test_402_maps_to_no_credits() {
        assert_eq!(classify_failure(402, "").kind, ErrorKind::NoCredits);
    }

    #[test]
    fn test_401_maps_to_invalid_key() {
        assert_eq!(classify_failure(401, "").kind, ErrorKind::InvalidKey);
    }

    #[test]
    fn test_429_maps_to_rate_limited() {
        assert_eq!(classify_failure(429, "").kind, ErrorKind::RateLimited);
    }

    #[test]
    fn test_400_with_model_error_body() {
        let err = classify_failure(400, r#"{"error": "foo is not a valid model ID"}"#);
        assert_eq!(err.kind, ErrorKind::BadConfiguration);
        assert!(err.message.contains("model ID"));
    }

    #[test]
    fn test_400_generic() {
        let err = classify_failure(400, r#"{"error": "missing messages"}"#);
        assert_eq!(err.kind, ErrorKind::BadConfiguration);
        assert_eq!(err.message, ErrorKind::BadConfiguration.user_message());
    }

    #[test]
    fn test_other_statuses_map_to_unknown() {
        for status in [403, 404, 500, 502, 503] {
            assert_eq!(classify_failure(status, "").kind, ErrorKind::Unknown);
        }
    }

    #[test]
    fn test_mapping_is_pure() {
        for _ in 0..5 {
            assert_eq!(classify_failure(429, "").kind, ErrorKind::RateLimited);
        }
    }

    // ---- Success-body parsing ----

    #[test]
    fn test_parse_well_formed_reply() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Hello!"}}]}"#;
        assert_eq!(parse_reply(body).unwrap(), "Hello!");
    }

    #[test]
    fn test_parse_picks_first_choice() {
        let body = r#"{"choices":[
            {"message":{"content":"first"}},
            {"message":{"content":"second"}}
        ]}"#;
        assert_eq!(parse_reply(body).unwrap(), "first");
    }

    #[test]
    fn test_parse_invalid_json_is_unknown() {
        let err = parse_reply("not json").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unknown);
    }

    #[test]
    fn test_parse_missing_choices_is_unknown() {
        let err = parse_reply(r#"{"id":"gen-123"}"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unknown);
    }

    #[test]
    fn test_parse_empty_choices_is_unknown() {
        let err = parse_reply(r#"{"choices":[]}"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unknown);
    }

    #[test]
    fn test_parse_null_content_is_unknown() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert_eq!(parse_reply(body).unwrap_err().kind, ErrorKind::Unknown);
    }

    #[test]
    fn test_parse_empty_content_is_unknown() {
        let body = r#"{"choices":[{"message":{"content":""}}]}"#;
        assert_eq!(parse_reply(body).unwrap_err().kind, ErrorKind::Unknown);
    }

    // ---- Request body shape ----

    #[test]
    fn test_request_body_has_required_fields() {
        let messages = vec![
            Message::new(Role::System, "be helpful"),
            Message::new(Role::User, "hello"),
        ];
        let request = CompletionRequest {
            model: "meta-llama/llama-3.1-8b-instruct",
            messages: &messages,
            max_tokens: 150,
            temperature: 0.5,
            stream: false,
        };

        let v = serde_json::to_value(&request).unwrap();
        assert_eq!(v["model"], "meta-llama/llama-3.1-8b-instruct");
        assert_eq!(v["max_tokens"], 150);
        assert_eq!(v["stream"], false);
        assert_eq!(v["messages"][0]["role"], "system");
        assert_eq!(v["messages"][1]["role"], "user");
        assert_eq!(v["messages"][1]["content"], "hello");
    }

    // ---- Helpers ----

    #[test]
    fn test_truncate_multibyte_safe() {
        assert_eq!(truncate("你好世界", 2), "你好");
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[test]
    fn test_client_construction() {
        assert!(OpenRouterClient::new(RemoteConfig::default()).is_ok());
    }
}
