//! Agent platform client: the single point of entry for Lyzr inference calls.
//!
//! ARCHITECTURAL RULE: no other module may call the agent platform directly.
//! All inference traffic MUST go through `LyzrClient`, so the `x-api-key`
//! credential never leaks into another module.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_LYZR_API_URL: &str = "https://agent-dev.test.studio.lyzr.ai/v3/inference/chat/";

#[derive(Debug, Error)]
pub enum LyzrError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Agent platform error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Chat envelope the inference endpoint expects. One turn per call; the
/// platform keeps conversation state under `session_id`.
#[derive(Debug, Serialize)]
pub struct InferenceEnvelope<'a> {
    pub user_id: &'a str,
    pub agent_id: &'a str,
    pub session_id: &'a str,
    pub message: &'a str,
}

/// The single agent platform client used by the forwarder.
#[derive(Clone)]
pub struct LyzrClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl LyzrClient {
    pub fn new(api_url: String, api_key: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            api_url,
            api_key,
        }
    }

    /// Sends one chat turn and returns the platform reply untouched, so
    /// callers can relay the raw payload alongside the extracted text.
    pub async fn infer(&self, envelope: &InferenceEnvelope<'_>) -> Result<Value, LyzrError> {
        debug!(
            "Calling agent {} (session {})",
            envelope.agent_id, envelope.session_id
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(envelope)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Agent platform returned {status}: {body}");
            return Err(LyzrError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.json().await?)
    }
}

/// Reply text out of a raw platform payload: `response` takes precedence,
/// `message` is the legacy fallback some agents still use.
pub fn reply_text(raw: &Value) -> Option<&str> {
    raw.get("response")
        .and_then(Value::as_str)
        .or_else(|| raw.get("message").and_then(Value::as_str))
}
