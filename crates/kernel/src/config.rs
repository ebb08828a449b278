//! Configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Default admin API location.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Admin API base URL (default: http://localhost:5000/api).
    pub api_url: String,

    /// Bearer token sent with every request, when set.
    pub admin_token: Option<String>,

    /// Per-request timeout (default: 30 seconds).
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            admin_token: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = lookup("SYLLABUS_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let admin_token = lookup("SYLLABUS_ADMIN_TOKEN")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let timeout_secs: u64 = lookup("SYLLABUS_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .context("SYLLABUS_REQUEST_TIMEOUT_SECS must be a valid u64")?;

        Ok(Self {
            api_url,
            admin_token,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
