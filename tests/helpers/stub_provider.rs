// ABOUTME: Stub LLM provider and server resource builders for integration tests
// ABOUTME: Records outbound requests and returns canned answers or failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use fitness_qa_server::config::ServerConfig;
use fitness_qa_server::errors::AppError;
use fitness_qa_server::llm::{ChatRequest, ChatResponse, LlmProvider};
use fitness_qa_server::server::ServerResources;

/// Stub chat completion provider for tests
///
/// Records every request it receives so tests can assert on the exact
/// outbound message sequence, and returns either a canned answer or a
/// canned failure.
pub struct StubProvider {
    /// Answer text returned on success
    pub answer: String,
    /// Model identifier reported back (the "actually served" model)
    pub model: String,
    /// When set, `complete` fails with this message
    pub fail_with: Option<String>,
    /// Requests received, in order
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl StubProvider {
    /// Stub that answers every question with `answer`, reporting `model`
    pub fn answering(answer: &str, model: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: answer.to_owned(),
            model: model.to_owned(),
            fail_with: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Stub that fails every completion with the given message
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            answer: String::new(),
            model: "stub-model".to_owned(),
            fail_with: Some(message.to_owned()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Requests recorded so far
    pub fn recorded_requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    fn display_name(&self) -> &'static str {
        "Stub Provider"
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(message) = &self.fail_with {
            return Err(AppError::external_service("Stub", message.clone()));
        }

        Ok(ChatResponse {
            content: self.answer.clone(),
            model: self.model.clone(),
            usage: None,
            finish_reason: Some("stop".to_owned()),
        })
    }
}

/// Configuration fixture that never reads the environment
pub fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 8000,
        openai_api_key: None,
        openai_base_url: "http://127.0.0.1:1/v1".to_owned(),
        openai_model: "gpt-3.5-turbo".to_owned(),
        openai_timeout_secs: 5,
    }
}

/// Resources with the given stub provider installed
pub fn configured_resources(provider: Arc<StubProvider>) -> Arc<ServerResources> {
    Arc::new(ServerResources::with_provider(
        test_config(),
        Some(provider),
    ))
}

/// Resources in degraded mode (no provider)
pub fn unconfigured_resources() -> Arc<ServerResources> {
    Arc::new(ServerResources::with_provider(test_config(), None))
}
