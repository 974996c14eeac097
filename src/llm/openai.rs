// ABOUTME: OpenAI chat completion client speaking the standard completions wire format
// ABOUTME: Single-attempt requests with bounded timeouts and uniform error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # `OpenAI` Provider
//!
//! Client for the `OpenAI` chat completions API (or any endpoint that
//! speaks the same wire format, selected via `OPENAI_BASE_URL`).
//!
//! The handler's contract with the upstream service is narrow: send a
//! role-tagged message list with a model, temperature, and token limit;
//! read back the first choice's text and the model identifier that
//! actually served the request. Every deviation from that contract is
//! mapped to a single processing-failure error kind.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, TokenUsage};
use crate::errors::AppError;

/// Connection timeout for the upstream API
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Upstream service name used in error messages
const SERVICE_NAME: &str = "OpenAI";

// ============================================================================
// API Request/Response Types (OpenAI wire format)
// ============================================================================

/// Chat completions API request structure
#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Message structure for the chat completions API
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for OpenAiMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }
}

/// Chat completions API response structure
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    model: String,
}

/// Choice in response
#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

/// Message in response
#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

/// Usage statistics in response
#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// Error response structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration for the `OpenAI` provider
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Base URL for the API (e.g., <https://api.openai.com/v1>)
    pub base_url: String,
    /// API key
    pub api_key: String,
    /// Default model to request
    pub default_model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// `OpenAI` chat completion provider
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    /// Create a new provider with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    /// Convert internal messages to the wire format
    fn convert_messages(messages: &[ChatMessage]) -> Vec<OpenAiMessage> {
        messages.iter().map(OpenAiMessage::from).collect()
    }

    /// Parse an error response from the upstream API
    ///
    /// The caller-facing contract treats every upstream failure the same
    /// way, so this only shapes the message text, not the error kind.
    fn parse_error_response(status: reqwest::StatusCode, body: &str) -> AppError {
        if let Ok(error_response) = serde_json::from_str::<OpenAiErrorResponse>(body) {
            let error_type = error_response
                .error
                .error_type
                .unwrap_or_else(|| "unknown".to_owned());
            AppError::external_service(
                SERVICE_NAME,
                format!(
                    "API error ({status}): {error_type} - {}",
                    error_response.error.message
                ),
            )
        } else {
            AppError::external_service(
                SERVICE_NAME,
                format!(
                    "API error ({status}): {}",
                    body.chars().take(200).collect::<String>()
                ),
            )
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn display_name(&self) -> &'static str {
        "OpenAI"
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.config.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);

        let openai_request = OpenAiRequest {
            model: model.to_owned(),
            messages: Self::convert_messages(&request.messages),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!(
            "Sending chat completion request with {} messages",
            openai_request.messages.len()
        );

        let response = self
            .client
            .post(self.api_url("chat/completions"))
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to {SERVICE_NAME}: {e}");
                let error = if e.is_timeout() {
                    AppError::external_service(SERVICE_NAME, "Request timed out")
                } else if e.is_connect() {
                    AppError::external_service(
                        SERVICE_NAME,
                        format!("Cannot connect to {}", self.config.base_url),
                    )
                } else {
                    AppError::external_service(SERVICE_NAME, format!("Failed to connect: {e}"))
                };
                error.with_source(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read API response: {e}");
            AppError::external_service(SERVICE_NAME, format!("Failed to read response: {e}"))
                .with_source(e)
        })?;

        if !status.is_success() {
            return Err(Self::parse_error_response(status, &body));
        }

        let openai_response: OpenAiResponse = serde_json::from_str(&body).map_err(|e| {
            error!(
                "Failed to parse API response: {e} - body: {}",
                body.chars().take(500).collect::<String>()
            );
            AppError::external_service(SERVICE_NAME, format!("Failed to parse response: {e}"))
                .with_source(e)
        })?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service(SERVICE_NAME, "API returned no choices"))?;

        let content = choice.message.content.ok_or_else(|| {
            AppError::external_service(SERVICE_NAME, "API returned a choice without content")
        })?;

        debug!(
            "Received response from {SERVICE_NAME}: {} chars, finish_reason: {:?}",
            content.len(),
            choice.finish_reason
        );

        Ok(ChatResponse {
            content,
            model: openai_response.model,
            usage: openai_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.finish_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::llm::MessageRole;

    fn test_config() -> OpenAiConfig {
        OpenAiConfig {
            base_url: "https://api.openai.com/v1".to_owned(),
            api_key: "sk-test".to_owned(),
            default_model: "gpt-3.5-turbo".to_owned(),
            timeout_secs: 30,
        }
    }

    #[test]
    fn test_api_url_joins_without_double_slash() {
        let provider = OpenAiProvider::new(OpenAiConfig {
            base_url: "https://api.openai.com/v1/".to_owned(),
            ..test_config()
        })
        .unwrap();
        assert_eq!(
            provider.api_url("chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_convert_messages_preserves_roles_and_content() {
        let messages = vec![
            ChatMessage::system("coach prompt"),
            ChatMessage::user("How many calories?"),
        ];
        let converted = OpenAiProvider::convert_messages(&messages);
        assert_eq!(converted.len(), 2);
        assert_eq!(converted[0].role, MessageRole::System.as_str());
        assert_eq!(converted[0].content, "coach prompt");
        assert_eq!(converted[1].role, "user");
        assert_eq!(converted[1].content, "How many calories?");
    }

    #[test]
    fn test_parse_error_response_with_json_body() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        let error =
            OpenAiProvider::parse_error_response(reqwest::StatusCode::UNAUTHORIZED, body);
        assert!(error.message.contains("Incorrect API key provided"));
        assert!(error.message.contains("invalid_request_error"));
    }

    #[test]
    fn test_parse_error_response_with_plain_body() {
        let error = OpenAiProvider::parse_error_response(
            reqwest::StatusCode::BAD_GATEWAY,
            "upstream exploded",
        );
        assert!(error.message.contains("upstream exploded"));
    }

    #[test]
    fn test_request_serialization_omits_unset_fields() {
        let request = OpenAiRequest {
            model: "gpt-3.5-turbo".to_owned(),
            messages: vec![],
            temperature: None,
            max_tokens: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("temperature"));
        assert!(!json.contains("max_tokens"));
    }
}
