//! Environment configuration for the skill gateway.
//!
//! Two knobs: the upstream query endpoint and the per-request HTTP
//! timeout. Everything else about a turn is fixed by the dialogue design.

use cricket_core::clients::cricket_api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use std::env;
use std::time::Duration;

/// Configuration for the one upstream data client.
#[derive(Debug, Clone)]
pub struct SkillConfig {
    pub api_base_url: String,
    pub http_timeout: Duration,
}

impl SkillConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        let api_base_url =
            env::var("CRICKET_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let http_timeout = Duration::from_secs(
            env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        );

        Self {
            api_base_url,
            http_timeout,
        }
    }
}
