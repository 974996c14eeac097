// ABOUTME: HTTP route handler modules for the Q&A service surface
// ABOUTME: Groups the question-answering and health monitoring endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP route handlers
//!
//! The surface is three endpoints: `GET /` (service descriptor),
//! `GET /health` (health and configuration state), and `POST /ask`
//! (the question-answering operation).

/// Health check route handlers
pub mod health;

/// Question-answering route handlers
pub mod qa;

pub use health::HealthRoutes;
pub use qa::QaRoutes;
