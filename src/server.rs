// ABOUTME: Shared server resources, router assembly, and the HTTP serve loop
// ABOUTME: Holds the configuration and the optional LLM provider behind Arc
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Server Resources and Router
//!
//! [`ServerResources`] is the dependency-injection context: built once
//! in the binary, shared read-only across handlers via `Arc`. The LLM
//! provider slot is `Option` because the service must start without a
//! credential (degraded mode); tests substitute a stub provider here
//! instead of mutating the environment.
//!
//! Nothing in the resources is mutable after startup, so concurrent
//! requests need no locking: each in-flight `/ask` suspends only on its
//! own upstream call.

use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::errors::AppError;
use crate::llm::{LlmProvider, OpenAiConfig, OpenAiProvider};
use crate::routes::{HealthRoutes, QaRoutes};

/// Shared resources passed to every route handler
pub struct ServerResources {
    /// Server configuration, read once at startup
    pub config: ServerConfig,
    /// Chat completion provider; `None` in degraded mode
    pub provider: Option<Arc<dyn LlmProvider>>,
}

impl ServerResources {
    /// Create resources from configuration, building the provider when
    /// the credential is present
    ///
    /// A missing credential logs a warning and leaves the provider slot
    /// empty; it never prevents startup.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider's HTTP client cannot be built.
    pub fn from_config(config: ServerConfig) -> Result<Self, AppError> {
        let provider: Option<Arc<dyn LlmProvider>> = match &config.openai_api_key {
            Some(api_key) => {
                let provider = OpenAiProvider::new(OpenAiConfig {
                    base_url: config.openai_base_url.clone(),
                    api_key: api_key.clone(),
                    default_model: config.openai_model.clone(),
                    timeout_secs: config.openai_timeout_secs,
                })?;
                info!(
                    "Initialized {} provider with model {}",
                    provider.display_name(),
                    provider.default_model()
                );
                Some(Arc::new(provider))
            }
            None => {
                warn!(
                    "OPENAI_API_KEY environment variable not set. \
                     Starting in degraded mode: /ask is disabled until the key is configured."
                );
                None
            }
        };

        Ok(Self { config, provider })
    }

    /// Create resources with an explicit provider (dependency injection
    /// for tests)
    #[must_use]
    pub fn with_provider(config: ServerConfig, provider: Option<Arc<dyn LlmProvider>>) -> Self {
        Self { config, provider }
    }

    /// Whether a provider is available for question answering
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }
}

/// Assemble the full application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(QaRoutes::routes(resources.clone()))
        .merge(HealthRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
}

/// Bind the listen socket and serve until terminated
///
/// Shuts down gracefully on ctrl-c; otherwise the process runs until
/// terminated externally.
///
/// # Errors
///
/// Returns an error if the socket cannot be bound or the server fails.
pub async fn serve(resources: Arc<ServerResources>) -> Result<()> {
    let port = resources.config.http_port;
    let app = router(resources);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;

    info!("HTTP server listening on port {port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Resolve when the process receives ctrl-c
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to install ctrl-c handler: {e}");
        // Fall back to running until externally terminated
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
