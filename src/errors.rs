// ABOUTME: Unified error handling with error codes and HTTP response formatting
// ABOUTME: Maps configuration and processing failures to the structured {detail} body
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Unified Error Handling
//!
//! This module provides the central error type for the service. Every
//! failure reaching a route handler boundary is an [`AppError`] carrying
//! an [`ErrorCode`], and is converted into a JSON `{detail: string}`
//! body with the status code the error code dictates.
//!
//! Two kinds of failure dominate this service:
//!
//! - [`ErrorCode::ConfigMissing`]: the upstream API credential was not
//!   set at startup. Surfaced as HTTP 400 with a remediation message so
//!   the operator knows which variable to set.
//! - [`ErrorCode::ExternalServiceError`]: anything that went wrong while
//!   composing the prompt or calling the completion API (network error,
//!   upstream rejection, malformed response, timeout). Surfaced as
//!   HTTP 500 with the underlying cause embedded in the body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// The provided input is invalid (e.g., empty question)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// Required configuration is missing (upstream API credential)
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing,
    /// The upstream completion API call failed
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError,
    /// An internal server error occurred
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    ///
    /// Missing configuration is a caller-fixable condition in this API's
    /// contract, so it maps to 400 rather than 5xx. Upstream failures of
    /// any shape map to 500.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidInput | Self::ConfigMissing => StatusCode::BAD_REQUEST,
            Self::ExternalServiceError | Self::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get a short description of this error code
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::InternalError => "An internal server error occurred",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code determining the HTTP status
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new error with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach a source error for chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Missing configuration
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// External service failure
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// HTTP error response body
///
/// Every handler-level failure produces this shape, regardless of the
/// status code.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable description of the failure
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        tracing::debug!(code = ?self.code, %status, "request failed: {}", self.message);
        let body = ErrorResponse {
            detail: self.message,
        };
        (status, Json(body)).into_response()
    }
}

/// Conversion from `anyhow::Error` for the binary boundary
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::new(ErrorCode::InternalError, error.to_string())
    }
}
