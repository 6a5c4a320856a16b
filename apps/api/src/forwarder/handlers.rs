//! Handlers for the `/functions/v1/*` generation routes.
//!
//! One generic relay serves every backend; the slug picks the provider
//! entry, and everything per-model (agent id, prompt style) comes from the
//! registry. The deployed platform ran one copy-pasted function per model,
//! which is exactly the drift this layout exists to prevent.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::forwarder::lyzr::{reply_text, InferenceEnvelope, LyzrError};
use crate::models::{GenerationRequest, GenerationResponse};
use crate::prompt::build_prompt;
use crate::providers::{provider_by_slug, ProviderConfig, PLATFORM_USER_ID};
use crate::state::AppState;

fn lookup_provider(slug: &str) -> Result<&'static ProviderConfig, AppError> {
    provider_by_slug(slug)
        .ok_or_else(|| AppError::NotFound(format!("No generator function named '{slug}'")))
}

/// POST /functions/v1/:slug
///
/// Relays one generation request to the backend the slug names. Identity
/// fields in the body win over the per-backend defaults, so a caller can
/// pin its own session; everyone else gets the platform identity.
pub async fn handle_forward(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerationResponse>, AppError> {
    let provider = lookup_provider(&slug)?;

    if request.job_title.trim().is_empty() {
        return Err(AppError::Validation("Job title is required".to_string()));
    }

    // Prompt style follows the backend this route lands on, not whatever
    // `model` the payload claims.
    let prompt = build_prompt(provider.model, &request);

    let user_id = request.user_id.as_deref().unwrap_or(PLATFORM_USER_ID);
    let agent_id = request.agent_id.as_deref().unwrap_or(provider.agent_id);
    let session_id = request.session_id.as_deref().unwrap_or(agent_id);

    debug!(
        "Forwarding {} request for section {} to {}",
        request.action.as_str(),
        request.section,
        provider.display_name
    );

    let raw = state
        .lyzr
        .infer(&InferenceEnvelope {
            user_id,
            agent_id,
            session_id,
            message: &prompt,
        })
        .await
        .map_err(|e| match e {
            LyzrError::Api { status, message } => AppError::Upstream {
                status,
                message: format!("Error from {} service: {message}", provider.display_name),
            },
            LyzrError::Http(e) => AppError::Internal(
                anyhow::Error::new(e).context("Agent platform call failed"),
            ),
        })?;

    let content = reply_text(&raw)
        .map(str::to_string)
        .ok_or_else(|| AppError::Upstream {
            status: 502,
            message: format!("{} reply carried no response text", provider.display_name),
        })?;

    info!(
        "{} generated {} chars for section {}",
        provider.display_name,
        content.len(),
        request.section
    );

    Ok(Json(GenerationResponse {
        success: true,
        content,
        raw,
    }))
}

/// OPTIONS /functions/v1/:slug
///
/// Reachability probe used by the diagnostics panel. Answers 204 without
/// touching the agent platform, like the deployed functions' preflight.
pub async fn handle_forward_probe(Path(slug): Path<String>) -> Result<StatusCode, AppError> {
    lookup_provider(&slug)?;
    Ok(StatusCode::NO_CONTENT)
}
