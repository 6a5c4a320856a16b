use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::forwarder::lyzr::DEFAULT_LYZR_API_URL;

/// Application configuration loaded from environment variables.
/// Panics at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Agent platform inference endpoint.
    pub lyzr_api_url: String,
    /// Key sent to the agent platform as `x-api-key`.
    pub lyzr_api_key: String,
    /// Bearer token callers must present on `/functions/v1/*` routes.
    /// The dispatcher attaches the same token to its forwarded calls.
    pub service_auth_token: String,
    /// Base URL the dispatcher sends generation calls to. Defaults to this
    /// instance so a single process serves both halves.
    pub forwarder_base_url: String,
    /// Deadline for calls to the agent platform.
    pub upstream_timeout_secs: u64,
    /// Per-dispatch timeout. Unset means no deadline, matching the editor's
    /// behavior of waiting as long as the backend takes.
    pub dispatch_timeout_secs: Option<u64>,
    /// Overrides the client settings file location. Unset uses the platform
    /// config directory.
    pub settings_path: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        Ok(Config {
            lyzr_api_url: std::env::var("LYZR_API_URL")
                .unwrap_or_else(|_| DEFAULT_LYZR_API_URL.to_string()),
            lyzr_api_key: require_env("LYZR_API_KEY")?,
            service_auth_token: require_env("SERVICE_AUTH_TOKEN")?,
            forwarder_base_url: std::env::var("FORWARDER_BASE_URL")
                .unwrap_or_else(|_| format!("http://127.0.0.1:{port}")),
            upstream_timeout_secs: std::env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse::<u64>()
                .context("UPSTREAM_TIMEOUT_SECS must be a number of seconds")?,
            dispatch_timeout_secs: match std::env::var("DISPATCH_TIMEOUT_SECS") {
                Ok(raw) => Some(
                    raw.parse::<u64>()
                        .context("DISPATCH_TIMEOUT_SECS must be a number of seconds")?,
                ),
                Err(_) => None,
            },
            settings_path: std::env::var("SETTINGS_PATH").ok().map(PathBuf::from),
            port,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
