// ABOUTME: Environment-based server configuration loaded once at process start
// ABOUTME: Covers HTTP port, upstream completion API settings, and sampling parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Server Configuration
//!
//! All configuration comes from environment variables and is read once
//! at startup. The upstream API credential is optional: when absent the
//! service starts in degraded mode, where informational endpoints work
//! but question answering is disabled.
//!
//! | Variable | Default | Purpose |
//! |---|---|---|
//! | `PORT` | `8000` | HTTP listen port |
//! | `OPENAI_API_KEY` | unset | Upstream credential (degraded mode when absent) |
//! | `OPENAI_BASE_URL` | `https://api.openai.com/v1` | Upstream API base URL |
//! | `OPENAI_MODEL` | `gpt-3.5-turbo` | Model requested for completions |
//! | `OPENAI_TIMEOUT_SECS` | `30` | Upstream request timeout |

use std::env;

/// Default HTTP listen port
const DEFAULT_HTTP_PORT: u16 = 8000;

/// Default upstream completion API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model requested for completions
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default upstream request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum completion length in tokens, fixed for every request
pub const MAX_COMPLETION_TOKENS: u32 = 500;

/// Sampling temperature, fixed for every request
pub const COMPLETION_TEMPERATURE: f32 = 0.7;

/// Server configuration, read once from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Upstream API credential; `None` puts the service in degraded mode
    pub openai_api_key: Option<String>,
    /// Upstream completion API base URL
    pub openai_base_url: String,
    /// Model requested for completions
    pub openai_model: String,
    /// Upstream request timeout in seconds
    pub openai_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Never fails on a missing credential: degraded mode is a valid
    /// startup state.
    #[must_use]
    pub fn from_env() -> Self {
        let http_port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_HTTP_PORT);

        let openai_api_key = env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());

        let openai_base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());

        let openai_model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_owned());

        let openai_timeout_secs = env::var("OPENAI_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            http_port,
            openai_api_key,
            openai_base_url,
            openai_model,
            openai_timeout_secs,
        }
    }

    /// Whether the upstream credential was present at startup
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.openai_api_key.is_some()
    }

    /// Human-readable configuration summary for startup logging
    ///
    /// The credential is reported by presence only, never by value.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Fitness QA Server Configuration:\n\
             - HTTP Port: {}\n\
             - Upstream API: {}\n\
             - Model: {}\n\
             - Upstream Timeout: {}s\n\
             - Credential: {}",
            self.http_port,
            self.openai_base_url,
            self.openai_model,
            self.openai_timeout_secs,
            if self.is_configured() {
                "Configured"
            } else {
                "Missing (degraded mode)"
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_reflects_key_presence() {
        let config = ServerConfig {
            http_port: DEFAULT_HTTP_PORT,
            openai_api_key: None,
            openai_base_url: DEFAULT_BASE_URL.to_owned(),
            openai_model: DEFAULT_MODEL.to_owned(),
            openai_timeout_secs: DEFAULT_TIMEOUT_SECS,
        };
        assert!(!config.is_configured());
        assert!(config.summary().contains("degraded mode"));

        let config = ServerConfig {
            openai_api_key: Some("sk-test".to_owned()),
            ..config
        };
        assert!(config.is_configured());
    }

    #[test]
    fn test_summary_never_contains_credential() {
        let config = ServerConfig {
            http_port: DEFAULT_HTTP_PORT,
            openai_api_key: Some("sk-super-secret-value".to_owned()),
            openai_base_url: DEFAULT_BASE_URL.to_owned(),
            openai_model: DEFAULT_MODEL.to_owned(),
            openai_timeout_secs: DEFAULT_TIMEOUT_SECS,
        };
        assert!(!config.summary().contains("sk-super-secret-value"));
    }
}
