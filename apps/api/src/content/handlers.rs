use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::auth::AuthedUser;
use crate::content::content_type::ContentType;
use crate::content::generator::{finalize_vars, generate_content};
use crate::content::models::{value_display, ContentRequest, RenderVars};
use crate::content::normalizer::default_vars;
use crate::errors::AppError;
use crate::render::DOWNLOAD_TEMPLATE;
use crate::state::AppState;
use crate::subscriptions;

/// POST /api/generate
///
/// Quota is checked before the model is called and spent only after the
/// whole pipeline succeeds, so a failed generation costs nothing.
pub async fn generate_handler(
    State(state): State<AppState>,
    user: AuthedUser,
    Json(request): Json<ContentRequest>,
) -> Result<Json<Value>, AppError> {
    let subscription = subscriptions::get_active(&state.db, user.id).await?;
    if !subscription.has_quota() {
        return Err(AppError::QuotaExceeded);
    }

    let template = request.content_type().template_name();
    info!("Generating {} for user {}", template, user.id);

    let outcome =
        generate_content(state.generator.as_ref(), state.renderer.as_ref(), request).await?;

    subscriptions::consume_article(&state.db, user.id).await?;

    Ok(Json(json!({
        "preview_html": outcome.preview_html,
        "raw_content": outcome.render_vars,
        "template_used": outcome.template_used,
    })))
}

/// The download payload: the shared request shape plus top-level
/// pass-through variables the caller edited in place.
#[derive(Debug, Default, Deserialize)]
pub struct DownloadRequest {
    #[serde(flatten)]
    pub request: ContentRequest,

    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub article_content: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    /// String or list, matching the per-template keyword contracts.
    #[serde(default)]
    pub keywords: Option<Value>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub article_category: Option<String>,
}

/// POST /api/download_article
///
/// Rebuilds the variable set from the posted fields (nested
/// `edited_content` first, top-level fields on top), renders the request's
/// own template, and returns the HTML as an attachment. Generic articles
/// get the print-oriented download markup.
pub async fn download_handler(
    State(state): State<AppState>,
    user: AuthedUser,
    Json(download): Json<DownloadRequest>,
) -> Result<Response, AppError> {
    let content_type = download.request.content_type();

    let mut vars = default_vars();
    if let Some(edited) = &download.request.edited_content {
        vars.extend(edited.clone());
    }
    merge_download_fields(&mut vars, &download);
    finalize_vars(&mut vars, content_type, &download.request)?;

    let html = state
        .renderer
        .render(download_template_for(content_type), &vars)?;

    let filename = download_filename(vars.get("headline").and_then(Value::as_str));
    info!("Serving download {filename} for user {}", user.id);

    let headers = [
        (
            header::CONTENT_TYPE,
            "text/html; charset=utf-8".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];

    Ok((headers, html).into_response())
}

/// Typed content downloads in their own markup; the generic article uses
/// the print-oriented download template.
fn download_template_for(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::GenericArticle => DOWNLOAD_TEMPLATE,
        typed => typed.template_name(),
    }
}

/// Overlays the top-level pass-through fields onto the variable set.
/// Absent fields leave whatever the edited mapping or defaults supplied.
fn merge_download_fields(vars: &mut RenderVars, download: &DownloadRequest) {
    let text_fields = [
        ("headline", &download.headline),
        ("article_content", &download.article_content),
        ("meta_description", &download.meta_description),
        ("author", &download.author),
        ("summary", &download.summary),
        ("publish_date", &download.publish_date),
        ("article_category", &download.article_category),
    ];
    for (key, value) in text_fields {
        if let Some(value) = value {
            vars.insert(key.into(), json!(value));
        }
    }
    if let Some(keywords) = &download.keywords {
        vars.insert("keywords".into(), keywords.clone());
    }

    let request = &download.request;
    if request.home_team.is_some() || request.away_team.is_some() {
        vars.insert(
            "home_team".into(),
            json!(request.home_team.as_deref().unwrap_or("")),
        );
        vars.insert(
            "away_team".into(),
            json!(request.away_team.as_deref().unwrap_or("")),
        );
        // Scores ride along with the team names so the scoreboard block
        // never dereferences a missing variable.
        vars.insert("home_score".into(), json!(value_display(&request.home_score)));
        vars.insert("away_score".into(), json!(value_display(&request.away_score)));
    }
    if request.home_lineup.is_some() || request.away_lineup.is_some() {
        vars.insert(
            "home_lineup".into(),
            json!(request.home_lineup.as_deref().unwrap_or("")),
        );
        vars.insert(
            "away_lineup".into(),
            json!(request.away_lineup.as_deref().unwrap_or("")),
        );
    }
    let match_fields = [
        ("competition", &request.competition),
        ("venue", &request.venue),
        ("match_date", &request.match_date),
    ];
    for (key, value) in match_fields {
        if let Some(value) = value {
            vars.insert(key.into(), json!(value));
        }
    }
}

/// Builds a safe attachment filename from the headline. Whitespace becomes
/// hyphens; anything outside alphanumerics and hyphens is dropped.
fn download_filename(headline: Option<&str>) -> String {
    let slug: String = headline
        .unwrap_or("")
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect();

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "article.html".to_string()
    } else {
        format!("{slug}.html")
    }
}
