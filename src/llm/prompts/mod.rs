// ABOUTME: System prompts for LLM interactions loaded at compile time
// ABOUTME: Provides the fixed AI fitness coach persona with profile and schedule
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # System Prompts
//!
//! Prompts are loaded at compile time from markdown files so the persona
//! content can change without touching handler logic. The coach prompt
//! is identical for every request and every caller: the body stats and
//! the 7-day workout schedule are fixed content, not per-user data.

/// AI fitness coach system prompt
///
/// Contains the assistant persona, the user's body stats (height,
/// weight, BMI), and the full weekly workout routine with per-exercise
/// calorie figures and daily totals.
pub const COACH_SYSTEM_PROMPT: &str = include_str!("coach_system.md");

/// Get the system prompt for the fitness coach
///
/// This is the system-role turn prepended to every outbound completion
/// request.
#[must_use]
pub const fn coach_system_prompt() -> &'static str {
    COACH_SYSTEM_PROMPT
}
