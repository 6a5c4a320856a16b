//! Wire types for JD content generation.
//!
//! Field names on the wire are camelCase to match the HireWrite editor
//! payloads. The enums here are closed: a request naming a model, section,
//! tone, or action outside these sets fails deserialization up front, so
//! downstream code never branches on an unknown variant.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The three generation backends the platform exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Claude,
    Gpt4o,
    Llama,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [ModelKind::Claude, ModelKind::Gpt4o, ModelKind::Llama];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Claude => "claude",
            ModelKind::Gpt4o => "gpt4o",
            ModelKind::Llama => "llama",
        }
    }

    pub fn from_str(s: &str) -> Option<ModelKind> {
        match s {
            "claude" => Some(ModelKind::Claude),
            "gpt4o" => Some(ModelKind::Gpt4o),
            "llama" => Some(ModelKind::Llama),
            _ => None,
        }
    }

    /// Stable position of this model in per-model stat arrays.
    pub fn index(&self) -> usize {
        match self {
            ModelKind::Claude => 0,
            ModelKind::Gpt4o => 1,
            ModelKind::Llama => 2,
        }
    }
}

impl Default for ModelKind {
    fn default() -> Self {
        ModelKind::Claude
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six JD sections the editor can generate content for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Summary,
    Responsibilities,
    RequiredQualifications,
    PreferredQualifications,
    Benefits,
    CompanyBlurb,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Summary,
        SectionKind::Responsibilities,
        SectionKind::RequiredQualifications,
        SectionKind::PreferredQualifications,
        SectionKind::Benefits,
        SectionKind::CompanyBlurb,
    ];

    /// Human-readable name used inside prompts ("Role Summary", not "summary").
    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Summary => "Role Summary",
            SectionKind::Responsibilities => "Key Responsibilities",
            SectionKind::RequiredQualifications => "Required Qualifications",
            SectionKind::PreferredQualifications => "Preferred Qualifications",
            SectionKind::Benefits => "Benefits & Perks",
            SectionKind::CompanyBlurb => "Company Description",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tone presets a JD author can pick. Serialized capitalized, as the
/// editor stores them ("Professional", not "professional").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToneKind {
    Professional,
    Friendly,
    Inclusive,
    Enthusiastic,
    Formal,
}

impl ToneKind {
    pub const ALL: [ToneKind; 5] = [
        ToneKind::Professional,
        ToneKind::Friendly,
        ToneKind::Inclusive,
        ToneKind::Enthusiastic,
        ToneKind::Formal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToneKind::Professional => "Professional",
            ToneKind::Friendly => "Friendly",
            ToneKind::Inclusive => "Inclusive",
            ToneKind::Enthusiastic => "Enthusiastic",
            ToneKind::Formal => "Formal",
        }
    }

    /// Lowercased form used mid-sentence in prompts ("a professional tone").
    pub fn lowercase(&self) -> &'static str {
        match self {
            ToneKind::Professional => "professional",
            ToneKind::Friendly => "friendly",
            ToneKind::Inclusive => "inclusive",
            ToneKind::Enthusiastic => "enthusiastic",
            ToneKind::Formal => "formal",
        }
    }
}

impl Default for ToneKind {
    fn default() -> Self {
        ToneKind::Professional
    }
}

/// What the caller wants done with the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Generate,
    Enhance,
    Rewrite,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Generate => "generate",
            ActionKind::Enhance => "enhance",
            ActionKind::Rewrite => "rewrite",
        }
    }
}

impl Default for ActionKind {
    fn default() -> Self {
        ActionKind::Generate
    }
}

/// One section-generation request as the editor submits it.
///
/// `user_id` / `agent_id` / `session_id` are platform identity fields: the
/// dispatcher fills them before forwarding, and the forwarder falls back to
/// its own per-model defaults when a direct caller leaves them out. They
/// stay snake_case on the wire, unlike the editor fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub job_title: String,
    pub seniority: String,
    pub employment_type: String,
    pub remote_option: String,
    pub section: SectionKind,
    pub tone: ToneKind,
    #[serde(default)]
    pub team_size: String,
    #[serde(default)]
    pub reporting_to: String,
    #[serde(default)]
    pub tools: String,
    #[serde(default)]
    pub model: ModelKind,
    #[serde(default)]
    pub current_content: String,
    #[serde(default)]
    pub action: ActionKind,
    #[serde(default)]
    pub additional_context: String,
    #[serde(default, rename = "user_id", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, rename = "agent_id", skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(default, rename = "session_id", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// What the forwarder hands back for a successful generation.
///
/// `raw` carries the untouched agent platform reply so DevTools can show
/// exactly what came off the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub success: bool,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub raw: Value,
}
