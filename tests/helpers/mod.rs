// ABOUTME: Shared test helpers for integration tests
// ABOUTME: Exports the Axum testing utilities and the stub LLM provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod axum_test;
pub mod stub_provider;
