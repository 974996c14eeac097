// ABOUTME: Question-answering route handlers forwarding to the completion API
// ABOUTME: Composes the fixed coach prompt with the caller's question per request
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Question-answering routes
//!
//! `POST /ask` is the core of the service: validate the question, check
//! that a provider is configured, compose the two-turn prompt, make one
//! completion attempt, and shape the result. `GET /` serves a static
//! service descriptor.
//!
//! The outbound prompt is deterministic: the same question always
//! produces a byte-identical message sequence, because the system turn
//! is a compile-time constant and the user turn is the caller's exact
//! question string.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::config::{COMPLETION_TEMPERATURE, MAX_COMPLETION_TOKENS};
use crate::errors::AppError;
use crate::llm::{coach_system_prompt, ChatMessage, ChatRequest};
use crate::server::ServerResources;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for `POST /ask`
#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    /// The caller's free-text fitness question
    pub question: String,
}

/// Response body for `POST /ask`
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionResponse {
    /// Echo of the caller's question
    pub question: String,
    /// The model's free-text answer
    pub answer: String,
    /// Model identifier that actually served the request
    pub model_used: String,
}

// ============================================================================
// Prompt Composition
// ============================================================================

/// Build the outbound completion request for a question
///
/// Exactly two turns: the fixed coach system prompt, then the caller's
/// question verbatim. Sampling parameters are fixed for every request.
#[must_use]
pub fn build_chat_request(question: &str) -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system(coach_system_prompt()),
        ChatMessage::user(question),
    ])
    .with_temperature(COMPLETION_TEMPERATURE)
    .with_max_tokens(MAX_COMPLETION_TOKENS)
}

// ============================================================================
// Q&A Routes
// ============================================================================

/// Question-answering routes handler
pub struct QaRoutes;

impl QaRoutes {
    /// Create the descriptor and question-answering routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::describe))
            .route("/ask", post(Self::ask))
            .with_state(resources)
    }

    /// Static service descriptor
    async fn describe() -> Json<Value> {
        Json(json!({
            "message": "Fitness AI Q&A API",
            "description": "Send questions and get AI-powered answers",
            "endpoints": {
                "/ask": "POST - Send a fitness question",
                "/health": "GET - Check API health"
            }
        }))
    }

    /// Answer a fitness question via the completion API
    ///
    /// One attempt per request: no retry, no fallback model. Any failure
    /// after the configuration check surfaces as a processing error.
    async fn ask(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<QuestionRequest>,
    ) -> Result<Json<QuestionResponse>, AppError> {
        let provider = resources.provider.as_ref().ok_or_else(|| {
            AppError::config_missing(
                "OpenAI API key not configured. Please set the OPENAI_API_KEY environment variable.",
            )
        })?;

        if request.question.trim().is_empty() {
            return Err(AppError::invalid_input("question must not be empty"));
        }

        let chat_request =
            build_chat_request(&request.question).with_model(provider.default_model());

        let response = provider.complete(&chat_request).await.map_err(|e| {
            AppError::new(e.code, format!("Error processing question: {}", e.message))
        })?;

        info!(
            model = %response.model,
            answer_chars = response.content.len(),
            "answered fitness question"
        );

        Ok(Json(QuestionResponse {
            question: request.question,
            answer: response.content,
            model_used: response.model,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MessageRole;

    #[test]
    fn test_build_chat_request_has_exactly_two_turns() {
        let request = build_chat_request("How many calories do I burn on Monday?");

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, MessageRole::System);
        assert_eq!(request.messages[0].content, coach_system_prompt());
        assert_eq!(request.messages[1].role, MessageRole::User);
        assert_eq!(
            request.messages[1].content,
            "How many calories do I burn on Monday?"
        );
    }

    #[test]
    fn test_build_chat_request_fixed_sampling_parameters() {
        let request = build_chat_request("anything");
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.max_tokens, Some(500));
    }

    #[test]
    fn test_build_chat_request_is_deterministic() {
        let first = build_chat_request("same question");
        let second = build_chat_request("same question");
        assert_eq!(first, second);
    }
}
