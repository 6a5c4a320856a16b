//! Handlers for the analytics dashboard and the DevTools panel.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::instrument::metrics::ComparisonWin;
use crate::instrument::{ApiCallRecord, CALL_LOG_CAPACITY};
use crate::models::{ModelKind, SectionKind};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelUsageStat {
    pub model: ModelKind,
    pub count: u64,
    pub share: f64,
    pub average_latency_ms: f64,
    pub success_rate: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    pub models: Vec<ModelUsageStat>,
    pub total_calls: u64,
    pub most_popular_model: ModelKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_preferred_model: Option<ModelKind>,
    pub comparison_total: usize,
    pub recent_comparisons: Vec<ComparisonWin>,
}

/// GET /api/v1/metrics/usage
pub async fn handle_usage_report(State(state): State<AppState>) -> Json<UsageReport> {
    let metrics = &state.metrics;
    let counts = metrics.usage_counts();
    let shares = metrics.usage_distribution();

    let models = ModelKind::ALL
        .iter()
        .map(|&model| ModelUsageStat {
            model,
            count: counts[model.index()].1,
            share: shares[model.index()].1,
            average_latency_ms: metrics.average_latency_ms(model),
            success_rate: metrics.success_rate(model),
        })
        .collect();

    Json(UsageReport {
        models,
        total_calls: counts.iter().map(|(_, n)| n).sum(),
        most_popular_model: metrics.most_popular_model(),
        most_preferred_model: metrics.most_preferred_model(),
        comparison_total: metrics.comparison_total(),
        recent_comparisons: metrics.recent_comparisons(20),
    })
}

/// DELETE /api/v1/metrics
pub async fn handle_clear_metrics(State(state): State<AppState>) -> StatusCode {
    state.metrics.clear();
    StatusCode::NO_CONTENT
}

#[derive(Debug, Serialize)]
pub struct CallLogReply {
    pub capacity: usize,
    pub calls: Vec<ApiCallRecord>,
}

/// GET /api/v1/devtools/calls
///
/// Newest first, never more than the log capacity.
pub async fn handle_list_calls(State(state): State<AppState>) -> Json<CallLogReply> {
    Json(CallLogReply {
        capacity: CALL_LOG_CAPACITY,
        calls: state.call_log.snapshot(),
    })
}

/// DELETE /api/v1/devtools/calls
pub async fn handle_clear_calls(State(state): State<AppState>) -> StatusCode {
    state.call_log.clear();
    StatusCode::NO_CONTENT
}

#[derive(Debug, Deserialize)]
pub struct ComparisonWinnerRequest {
    pub winner: ModelKind,
    pub section: SectionKind,
}

/// POST /api/v1/compare/winner
///
/// Records which backend the author picked after a side-by-side run.
pub async fn handle_comparison_winner(
    State(state): State<AppState>,
    Json(body): Json<ComparisonWinnerRequest>,
) -> StatusCode {
    state.metrics.record_comparison(body.winner, body.section);
    StatusCode::NO_CONTENT
}
