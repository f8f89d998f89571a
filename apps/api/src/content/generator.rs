//! Request orchestrator: drives one content request through prompt
//! construction, generation, normalization, validation and rendering.
//!
//! The edited-content path skips the model entirely: when the caller
//! re-submits a variable mapping they already reviewed, it is rendered as-is
//! over the standard defaults.

use serde_json::json;
use tracing::info;

use crate::content::content_type::ContentType;
use crate::content::models::{value_display, ContentRequest, RenderVars};
use crate::content::normalizer::{build_match_stats, default_vars, normalize, today};
use crate::content::prompt_builder::build_prompt;
use crate::content::validator::validate;
use crate::errors::AppError;
use crate::llm_client::ContentGenerator;
use crate::render::TemplateRenderer;

/// Result of a successful pipeline run.
#[derive(Debug)]
pub struct GenerateOutcome {
    pub preview_html: String,
    pub render_vars: RenderVars,
    pub template_used: &'static str,
}

pub async fn generate_content(
    generator: &dyn ContentGenerator,
    renderer: &dyn TemplateRenderer,
    request: ContentRequest,
) -> Result<GenerateOutcome, AppError> {
    let content_type = request.content_type();
    let template = content_type.template_name();

    let mut vars = match &request.edited_content {
        Some(edited) => {
            info!("Re-rendering edited content for {}", template);
            let mut vars = default_vars();
            vars.extend(edited.clone());
            vars
        }
        None => {
            check_request_fields(&request)?;

            let prompt = build_prompt(&request, content_type);
            let raw = generator
                .generate(prompt.system, &prompt.user, content_type.generation_params())
                .await?;
            normalize(&raw, content_type, &request)?
        }
    };

    finalize_vars(&mut vars, content_type, &request)?;

    let preview_html = renderer.render(template, &vars)?;

    Ok(GenerateOutcome {
        preview_html,
        render_vars: vars,
        template_used: template,
    })
}

/// Fills type-specific gaps and enforces the template's required-field
/// contract. Defaults are applied before validation, so a request can only
/// fail validation on fields no default covers.
pub fn finalize_vars(
    vars: &mut RenderVars,
    content_type: ContentType,
    request: &ContentRequest,
) -> Result<(), AppError> {
    if content_type == ContentType::ScoutingReport {
        apply_scout_defaults(vars, request);
    }

    if content_type.is_match_report() {
        let has_stats = vars
            .get("match_stats")
            .and_then(|v| v.as_object())
            .is_some_and(|stats| !stats.is_empty());
        if !has_stats {
            vars.insert("match_stats".into(), build_match_stats(request)?);
        }
    }

    if let Err(missing) = validate(vars, content_type) {
        return Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    Ok(())
}

/// Every non-match key the scouting template dereferences gets a fallback
/// here so the edited path and a thin model reply both render. Player
/// identity falls back to the raw request fields before the "Unknown"
/// placeholders.
fn apply_scout_defaults(vars: &mut RenderVars, request: &ContentRequest) {
    let age = value_display(&request.player_age);
    let defaults = [
        ("headline", json!("Player Scout Report")),
        ("summary", json!("No summary provided.")),
        ("article_content", json!("<p>No content available.</p>")),
        (
            "meta_description",
            json!("A comprehensive scout report on the player."),
        ),
        ("keywords", json!("Football, Scout Report")),
        (
            "featured_image_url",
            json!("/static/images/default-featured-image.jpg"),
        ),
        ("featured_image_alt", json!("Default featured image")),
        ("publish_date", json!(today())),
        (
            "player_name",
            json!(request.player_name.as_deref().unwrap_or("Unknown Player")),
        ),
        (
            "player_position",
            json!(request.player_position.as_deref().unwrap_or("Unknown Position")),
        ),
        (
            "player_age",
            json!(if age.is_empty() { "Unknown Age" } else { &age }),
        ),
        (
            "player_nationality",
            json!(request
                .player_nationality
                .as_deref()
                .unwrap_or("Unknown Nationality")),
        ),
        (
            "favored_foot",
            json!(request.favored_foot.as_deref().unwrap_or("Unknown")),
        ),
        (
            "scout_stats",
            request
                .scout_stats
                .clone()
                .unwrap_or(json!("No stats available.")),
        ),
        ("form_summary", json!({})),
        ("recent_matches", json!([])),
    ];

    for (key, value) in defaults {
        vars.entry(key).or_insert(value);
    }
}

/// The generation path needs the four brief fields; their absence is the
/// caller's error, reported by name.
fn check_request_fields(request: &ContentRequest) -> Result<(), AppError> {
    let mut missing = Vec::new();
    let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

    if !present(&request.topic) {
        missing.push("topic");
    }
    if !present(&request.keywords) {
        missing.push("keywords");
    }
    if !present(&request.context) {
        missing.push("context");
    }
    if !present(&request.supporting_data) {
        missing.push("supporting_data");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}
