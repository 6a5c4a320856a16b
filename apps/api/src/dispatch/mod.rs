//! Client-side dispatch to the generation function routes.
//!
//! One dispatch is one POST to one function route: no retries, no fallback
//! to another backend, and no deadline unless a timeout was explicitly
//! configured. Dropping the returned future abandons the call; its log
//! record then stays `Pending`.
//!
//! CRITICAL: instrumentation is additive and settles exactly once. The
//! pending record is registered before the request leaves, and the metrics
//! outcome is decided by the reply's `success` flag before anything is
//! counted, so a logical failure is one failure, never a success plus a
//! failure. Nothing a store does can change what the caller gets back.

pub mod handlers;

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

use crate::instrument::{ApiCallLog, CallStatus, CallUpdate, UsageMetrics};
use crate::models::{ActionKind, GenerationRequest, GenerationResponse, ModelKind};
use crate::providers::{provider_for, PLATFORM_USER_ID, PROVIDERS};

/// How much of an upstream error body survives into the error message.
const ERROR_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// Rejected before anything left the process.
    #[error("{0}")]
    Validation(String),

    /// The function route answered with a non-success status.
    #[error("AI service error: {status} {excerpt}")]
    Transport { status: u16, excerpt: String },

    /// The route answered 200 but flagged the generation as failed.
    #[error("{0}")]
    Failure(String),

    /// The call never produced a usable response object.
    #[error("Request to AI service failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// Sends generation requests to the function routes and feeds the
/// instrumentation stores. Handlers share one dispatcher behind an `Arc`.
#[derive(Clone)]
pub struct Dispatcher {
    http: Client,
    auth_token: String,
    endpoints: [String; 3],
    call_log: Arc<ApiCallLog>,
    metrics: Arc<UsageMetrics>,
    timeout: Option<Duration>,
}

impl Dispatcher {
    pub fn new(
        forwarder_base_url: &str,
        auth_token: String,
        call_log: Arc<ApiCallLog>,
        metrics: Arc<UsageMetrics>,
    ) -> Self {
        let base = forwarder_base_url.trim_end_matches('/');
        Self {
            http: Client::new(),
            auth_token,
            endpoints: PROVIDERS.map(|p| format!("{base}/functions/v1/{}", p.slug)),
            call_log,
            metrics,
            timeout: None,
        }
    }

    /// Opts into a per-dispatch deadline. Without this, a dispatch waits as
    /// long as the backend takes.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self, model: ModelKind) -> &str {
        &self.endpoints[model.index()]
    }

    /// Runs one generation request against the backend named by
    /// `request.model` and returns the generated content.
    pub async fn dispatch(&self, request: &GenerationRequest) -> Result<String, DispatchError> {
        if request.job_title.trim().is_empty() {
            return Err(DispatchError::Validation(
                "Job title is required to generate content".to_string(),
            ));
        }

        let model = request.model;
        let endpoint = self.endpoint(model);

        let mut payload = request.clone();
        payload.user_id = Some(PLATFORM_USER_ID.to_string());
        payload.agent_id = Some(provider_for(model).agent_id.to_string());
        payload.session_id = Some(provider_for(model).session_id().to_string());

        let call_id = self
            .call_log
            .append(endpoint, serde_json::to_value(&payload).unwrap_or_default());
        debug!(
            "Dispatching {} request for section {} to {endpoint}",
            request.action.as_str(),
            request.section
        );

        let started = Instant::now();
        let mut outbound = self
            .http
            .post(endpoint)
            .bearer_auth(&self.auth_token)
            .header("content-type", "application/json")
            .json(&payload);
        if let Some(timeout) = self.timeout {
            outbound = outbound.timeout(timeout);
        }

        let response = match outbound.send().await {
            Ok(response) => response,
            Err(e) => {
                let duration_ms = elapsed_ms(started);
                warn!("Dispatch to {endpoint} failed: {e}");
                self.call_log.update(
                    call_id,
                    CallUpdate {
                        error: Some(json!({ "message": e.to_string() })),
                        duration_ms: Some(duration_ms),
                        status: Some(CallStatus::Error),
                        ..Default::default()
                    },
                );
                self.record_outcome(request, duration_ms, false);
                return Err(DispatchError::Network(e));
            }
        };

        let duration_ms = elapsed_ms(started);
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Function route {endpoint} returned {status}");
            self.call_log.update(
                call_id,
                CallUpdate {
                    error: Some(json!({ "status": status.as_u16(), "body": body })),
                    duration_ms: Some(duration_ms),
                    status: Some(CallStatus::Error),
                    ..Default::default()
                },
            );
            self.record_outcome(request, duration_ms, false);
            return Err(DispatchError::Transport {
                status: status.as_u16(),
                excerpt: error_excerpt(&body),
            });
        }

        let reply: GenerationResponse = match response.json().await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Function route {endpoint} sent an unreadable reply: {e}");
                self.call_log.update(
                    call_id,
                    CallUpdate {
                        error: Some(json!({ "message": e.to_string() })),
                        duration_ms: Some(duration_ms),
                        status: Some(CallStatus::Error),
                        ..Default::default()
                    },
                );
                self.record_outcome(request, duration_ms, false);
                return Err(DispatchError::Network(e));
            }
        };

        if !reply.success {
            let message = if reply.content.is_empty() {
                "Unknown error from AI service".to_string()
            } else {
                reply.content
            };
            self.call_log.update(
                call_id,
                CallUpdate {
                    error: Some(json!({ "message": message })),
                    duration_ms: Some(duration_ms),
                    status: Some(CallStatus::Error),
                    ..Default::default()
                },
            );
            self.record_outcome(request, duration_ms, false);
            return Err(DispatchError::Failure(message));
        }

        self.call_log.update(
            call_id,
            CallUpdate {
                response: Some(serde_json::to_value(&reply).unwrap_or_default()),
                duration_ms: Some(duration_ms),
                status: Some(CallStatus::Success),
                ..Default::default()
            },
        );
        self.record_outcome(request, duration_ms, true);

        Ok(reply.content)
    }

    /// Re-runs a section with the current content attached for improvement.
    pub async fn enhance(
        &self,
        request: &GenerationRequest,
        current_content: &str,
    ) -> Result<String, DispatchError> {
        let mut request = request.clone();
        request.current_content = current_content.to_string();
        request.action = ActionKind::Enhance;
        self.dispatch(&request).await
    }

    /// Re-runs a section asking for a rewrite of the current content.
    pub async fn rewrite(
        &self,
        request: &GenerationRequest,
        current_content: &str,
    ) -> Result<String, DispatchError> {
        let mut request = request.clone();
        request.current_content = current_content.to_string();
        request.action = ActionKind::Rewrite;
        self.dispatch(&request).await
    }

    /// Checks whether a function route answers at all, without spending a
    /// generation. Never touches the call log or metrics.
    pub async fn probe(&self, model: ModelKind) -> ProbeResult {
        let endpoint = self.endpoint(model).to_string();
        let started = Instant::now();

        let mut outbound = self
            .http
            .request(Method::OPTIONS, &endpoint)
            .bearer_auth(&self.auth_token);
        if let Some(timeout) = self.timeout {
            outbound = outbound.timeout(timeout);
        }

        match outbound.send().await {
            Ok(response) => {
                let status = response.status();
                let reachable = status.is_success();
                ProbeResult {
                    model,
                    endpoint,
                    reachable,
                    status: Some(status.as_u16()),
                    response_time_ms: elapsed_ms(started),
                    error: if reachable {
                        None
                    } else {
                        Some(format!("Endpoint answered {status}"))
                    },
                }
            }
            Err(e) => ProbeResult {
                model,
                endpoint,
                reachable: false,
                status: None,
                response_time_ms: elapsed_ms(started),
                error: Some(e.to_string()),
            },
        }
    }

    fn record_outcome(&self, request: &GenerationRequest, duration_ms: u64, success: bool) {
        self.metrics.record_usage(
            request.model,
            request.action,
            request.section,
            duration_ms,
            success,
        );
    }
}

/// Outcome of one reachability probe, as the diagnostics panel renders it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    pub model: ModelKind,
    pub endpoint: String,
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

/// First 200 chars of an upstream error body, with a marker when trimmed.
fn error_excerpt(body: &str) -> String {
    let mut chars = body.chars();
    let mut excerpt: String = chars.by_ref().take(ERROR_EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        excerpt.push_str("...");
    }
    excerpt
}
