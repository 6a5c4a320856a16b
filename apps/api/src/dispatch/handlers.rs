//! Handlers for the editor-facing generation endpoints.
//!
//! These sit on the dispatch side of the wire: they go through the shared
//! `Dispatcher`, so every call made here shows up in DevTools and in the
//! usage metrics exactly like a call made by the editor itself.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::{GenerationRequest, ModelKind};
use crate::state::AppState;

use super::ProbeResult;

#[derive(Debug, Serialize)]
pub struct GenerateReply {
    pub model: ModelKind,
    pub content: String,
}

/// POST /api/v1/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerateReply>, AppError> {
    let content = state.dispatcher.dispatch(&request).await?;
    Ok(Json(GenerateReply {
        model: request.model,
        content,
    }))
}

/// POST /api/v1/enhance
///
/// Same body as generate; the route pins the action so the editor cannot
/// accidentally enhance with a stale `action` field.
pub async fn handle_enhance(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerateReply>, AppError> {
    let content = state
        .dispatcher
        .enhance(&request, &request.current_content)
        .await?;
    Ok(Json(GenerateReply {
        model: request.model,
        content,
    }))
}

/// POST /api/v1/rewrite
pub async fn handle_rewrite(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerateReply>, AppError> {
    let content = state
        .dispatcher
        .rewrite(&request, &request.current_content)
        .await?;
    Ok(Json(GenerateReply {
        model: request.model,
        content,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelOutcome {
    pub model: ModelKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct CompareReply {
    pub results: Vec<ModelOutcome>,
}

/// POST /api/v1/compare
///
/// Runs the same request against all three backends concurrently. Each arm
/// settles on its own; one backend failing leaves the other two results
/// intact, and every arm is instrumented like a normal dispatch.
pub async fn handle_compare(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<CompareReply>, AppError> {
    if request.job_title.trim().is_empty() {
        return Err(AppError::Validation(
            "Job title is required to generate content".to_string(),
        ));
    }

    let (claude, gpt4o, llama) = tokio::join!(
        run_arm(&state, &request, ModelKind::Claude),
        run_arm(&state, &request, ModelKind::Gpt4o),
        run_arm(&state, &request, ModelKind::Llama),
    );

    info!(
        "Comparison for '{}' finished: {} of 3 backends succeeded",
        request.job_title,
        [&claude, &gpt4o, &llama]
            .iter()
            .filter(|o| o.content.is_some())
            .count()
    );

    Ok(Json(CompareReply {
        results: vec![claude, gpt4o, llama],
    }))
}

async fn run_arm(state: &AppState, request: &GenerationRequest, model: ModelKind) -> ModelOutcome {
    let mut request = request.clone();
    request.model = model;

    let started = Instant::now();
    match state.dispatcher.dispatch(&request).await {
        Ok(content) => ModelOutcome {
            model,
            content: Some(content),
            error: None,
            duration_ms: started.elapsed().as_millis() as u64,
        },
        Err(e) => ModelOutcome {
            model,
            content: None,
            error: Some(e.to_string()),
            duration_ms: started.elapsed().as_millis() as u64,
        },
    }
}

#[derive(Debug, Serialize)]
pub struct DiagnosticsReply {
    pub endpoints: Vec<ProbeResult>,
}

/// GET /api/v1/diagnostics
///
/// Probes every function route without spending a generation.
pub async fn handle_diagnostics(State(state): State<AppState>) -> Json<DiagnosticsReply> {
    let (claude, gpt4o, llama) = tokio::join!(
        state.dispatcher.probe(ModelKind::Claude),
        state.dispatcher.probe(ModelKind::Gpt4o),
        state.dispatcher.probe(ModelKind::Llama),
    );
    Json(DiagnosticsReply {
        endpoints: vec![claude, gpt4o, llama],
    })
}
