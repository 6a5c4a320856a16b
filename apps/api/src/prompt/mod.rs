//! Prompt assembly for the generation backends.
//!
//! One builder serves all three backends and all three actions. The shape is
//! fixed: an action preamble, a context block describing the role, the
//! current section content for enhance/rewrite, backend guidance, and any
//! caller-supplied extra instructions. Only the styled fragments differ per
//! backend, and those live in [`styles`].

pub mod styles;

use crate::models::{ActionKind, GenerationRequest, ModelKind};
use styles::style_for;

/// Returned instead of a prompt when the request has no job title.
/// Callers validate before dispatching; this guards direct use.
pub const MISSING_TITLE_PROMPT: &str = "Please provide a job title to generate content.";

/// Builds the full prompt for `model`.
///
/// `model` is passed separately from `request.model`: the forwarder styles
/// prompts by the backend a request actually landed on, which for direct
/// calls is chosen by route, not by the payload.
pub fn build_prompt(model: ModelKind, request: &GenerationRequest) -> String {
    if request.job_title.trim().is_empty() {
        return MISSING_TITLE_PROMPT.to_string();
    }

    let style = style_for(model);
    let context = context_block(request);
    let section = request.section.label();
    let tone = request.tone.lowercase();
    let guidance = style.guidance(request.section);

    let mut prompt = match request.action {
        ActionKind::Generate => {
            let mut p = format!(
                "Please write a {} {section} section for a job description with the following details:\n\n{context}\n\nThe content should have a {tone} tone.",
                style.generate_lead
            );
            if !style.generate_note.is_empty() {
                p.push(' ');
                p.push_str(style.generate_note);
            }
            p.push(' ');
            p
        }
        ActionKind::Enhance => format!(
            "Please enhance the following {section} section to make it {} while keeping a {tone} tone. {}:\n\n{context}\n\nCurrent content:\n{}\n\n",
            style.enhance_goal, style.enhance_note, request.current_content
        ),
        ActionKind::Rewrite => format!(
            "Please rewrite the following {section} section with a {tone} tone, maintaining the same information but {}. {}:\n\n{context}\n\nCurrent content:\n{}\n\n",
            style.rewrite_goal, style.rewrite_note, request.current_content
        ),
    };

    prompt.push_str(guidance);
    if !request.additional_context.trim().is_empty() {
        prompt.push_str("\n\nAdditional instructions: ");
        prompt.push_str(&request.additional_context);
    }
    prompt
}

/// The "Job Title: ... / Seniority: ..." block shared by every action.
/// Optional fields only appear when the editor filled them in.
fn context_block(request: &GenerationRequest) -> String {
    let mut parts = vec![
        format!("Job Title: {}", request.job_title),
        format!("Seniority: {}", request.seniority),
        format!("Employment Type: {}", request.employment_type),
        format!("Work Location: {}", request.remote_option),
    ];
    if !request.team_size.is_empty() {
        parts.push(format!("Team Size: {}", request.team_size));
    }
    if !request.reporting_to.is_empty() {
        parts.push(format!("Reports To: {}", request.reporting_to));
    }
    if !request.tools.is_empty() {
        parts.push(format!("Tools & Technologies: {}", request.tools));
    }
    parts.join("\n")
}
