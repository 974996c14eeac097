// ABOUTME: Main library entry point for the fitness coach Q&A service
// ABOUTME: Wires configuration, LLM provider access, and HTTP route handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Fitness QA Server
//!
//! A small HTTP service that answers free-text fitness questions by
//! forwarding them to an `OpenAI`-compatible chat completion API. Every
//! request carries a fixed coaching system prompt (user profile and
//! weekly workout schedule) followed by the caller's question.
//!
//! The service is stateless: there is no persistence, no session model,
//! and no conversation history. Each `POST /ask` is a single round trip
//! to the upstream completion API.
//!
//! ## Architecture
//!
//! - **Config**: Environment-driven configuration, read once at startup
//! - **LLM**: Provider trait plus the `OpenAI` chat completion client
//! - **Routes**: Axum handlers for `/`, `/health`, and `/ask`
//! - **Server**: Shared resources (dependency injection) and serve loop
//!
//! ## Degraded mode
//!
//! When `OPENAI_API_KEY` is absent the process still starts: the
//! informational endpoints keep working and `/ask` fails with a
//! configuration error until the operator sets the credential.

/// Environment-driven server configuration
pub mod config;

/// Unified error handling with HTTP status mapping
pub mod errors;

/// LLM provider abstraction and the `OpenAI` chat completion client
pub mod llm;

/// Logging configuration and tracing subscriber setup
pub mod logging;

/// HTTP route handlers
pub mod routes;

/// Shared server resources and router assembly
pub mod server;
