// ABOUTME: Health check route handlers for service monitoring
// ABOUTME: Reports liveness and whether the upstream credential is configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Health check routes for service monitoring
//!
//! The health endpoint always returns 200: a missing upstream credential
//! is degraded mode, not an outage. The `configured` flag reflects the
//! startup state and never changes during the process lifetime.

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::server::ServerResources;

/// Health endpoint response body
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process can serve requests
    pub status: String,
    /// Whether the upstream credential was present at startup
    pub configured: bool,
    /// Distinguishes normal operation from degraded mode
    pub message: String,
    /// Response timestamp
    pub timestamp: String,
}

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::health))
            .with_state(resources)
    }

    /// Report service health and configuration state
    async fn health(State(resources): State<Arc<ServerResources>>) -> Json<HealthResponse> {
        let configured = resources.is_configured();
        Json(HealthResponse {
            status: "healthy".to_owned(),
            configured,
            message: if configured {
                "API is running".to_owned()
            } else {
                "API is running but OpenAI key not configured".to_owned()
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }
}
