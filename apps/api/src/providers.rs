//! Static registry of the generation backends.
//!
//! ARCHITECTURAL RULE: all per-model wiring lives here. Forwarder and
//! dispatcher never hardcode a slug or agent id; they look the provider up
//! by `ModelKind` or by route slug. Adding a backend means adding one
//! `ProviderConfig` entry, nothing else.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::models::ModelKind;
use crate::state::AppState;

/// Identity attached to every agent platform call.
/// Intentionally a single shared account: sessions are keyed per agent,
/// not per end user.
pub const PLATFORM_USER_ID: &str = "hirewrite@app.com";

/// Everything the gateway needs to know about one backend.
#[derive(Debug, Clone, Copy)]
pub struct ProviderConfig {
    pub model: ModelKind,
    /// Route segment under `/functions/v1/` this backend answers on.
    pub slug: &'static str,
    /// Agent platform id for this backend.
    pub agent_id: &'static str,
    pub display_name: &'static str,
    pub vendor: &'static str,
    pub description: &'static str,
    pub strengths: &'static str,
}

impl ProviderConfig {
    /// Session id for calls to this backend.
    /// Sessions are pinned to the agent: one long-lived conversation per model.
    pub fn session_id(&self) -> &'static str {
        self.agent_id
    }
}

pub const PROVIDERS: [ProviderConfig; 3] = [
    ProviderConfig {
        model: ModelKind::Claude,
        slug: "claude-sonnet-jd-generator",
        agent_id: "67df369d8f451bb9b9b6cbe2",
        display_name: "Claude 3.5 Sonnet",
        vendor: "Anthropic",
        description: "Human-like writing, excels at structure, clear prose",
        strengths: "Strong on professional tone",
    },
    ProviderConfig {
        model: ModelKind::Gpt4o,
        slug: "gpt-4o-jd-generator",
        agent_id: "67df490b8f451bb9b9b6cc8b",
        display_name: "GPT-4o",
        vendor: "OpenAI",
        description: "Very smart, great at nuance, works well with role-based prompts",
        strengths: "More creative & polished",
    },
    ProviderConfig {
        model: ModelKind::Llama,
        slug: "grok-llama-jd-generator",
        agent_id: "67df490b8f451bb9b9b6cc8c",
        display_name: "LLaMA 3.3 70B",
        vendor: "Groq",
        description: "Fast, solid output, lower cost",
        strengths: "Great for fast iterations",
    },
];

pub fn provider_for(model: ModelKind) -> &'static ProviderConfig {
    &PROVIDERS[model.index()]
}

pub fn provider_by_slug(slug: &str) -> Option<&'static ProviderConfig> {
    PROVIDERS.iter().find(|p| p.slug == slug)
}

// ────────────────────────────────────────────────────────────────────────────
// Catalog endpoint
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub id: ModelKind,
    pub name: &'static str,
    pub provider: &'static str,
    pub description: &'static str,
    pub strengths: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ModelCatalog {
    pub models: Vec<ModelInfo>,
}

/// GET /api/v1/models
///
/// The model picker in the editor renders straight from this list.
pub async fn handle_list_models(State(_state): State<AppState>) -> Json<ModelCatalog> {
    let models = PROVIDERS
        .iter()
        .map(|p| ModelInfo {
            id: p.model,
            name: p.display_name,
            provider: p.vendor,
            description: p.description,
            strengths: p.strengths,
        })
        .collect();
    Json(ModelCatalog { models })
}
