//! Response Normalizer — maps the model's semi-structured JSON reply plus
//! ancillary request fields into the flat variable mapping each template
//! consumes.
//!
//! Each content type has a different required variable set and a different
//! markup wrapper because the downstream templates have incompatible CSS
//! contracts. All of that mapping lives here, in one place, keyed off
//! `ContentType`. Normalization takes the request as an explicit parameter;
//! it never reads ambient state.

use chrono::Local;
use serde_json::{json, Value};
use thiserror::Error;

use crate::content::content_type::{ContentType, SectionMarkup};
use crate::content::form_parser::{parse_recent_form, FormParseError};
use crate::content::models::{value_display, ContentRequest, GeneratedContent, RenderVars, Section};

pub const DEFAULT_IMAGE_URL: &str = "/static/images/default-match-image.jpg";
pub const DEFAULT_IMAGE_ALT: &str = "Football match report";
const DEFAULT_THEME: &str = "classic";
const DEFAULT_IMAGE_POSITION: &str = "center";

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("model response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model response missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` is not numeric")]
    NonNumeric(&'static str),

    #[error(transparent)]
    RecentForm(#[from] FormParseError),
}

/// Today's date in the `publish_date` wire format.
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Content-type-agnostic starting point. Every generation ends up with at
/// least these keys, so templates can rely on them unconditionally.
pub fn default_vars() -> RenderVars {
    let mut vars = RenderVars::new();
    vars.insert("headline".into(), json!("Default Headline"));
    vars.insert("article_content".into(), json!("<p>No content available.</p>"));
    vars.insert("meta_description".into(), json!("Default meta description."));
    vars.insert("keywords".into(), json!(["default", "keywords"]));
    vars.insert("publish_date".into(), json!(today()));
    vars.insert("featured_image_url".into(), json!(DEFAULT_IMAGE_URL));
    vars.insert("featured_image_alt".into(), json!("Default image alt text."));
    vars.insert("article_category".into(), json!("Default Category"));
    vars.insert("theme".into(), json!(DEFAULT_THEME));
    vars.insert("image_position".into(), json!(DEFAULT_IMAGE_POSITION));
    vars
}

/// Parses the raw model reply and produces the render variables for the
/// given content type. Fields documented as having fallbacks never fail;
/// schema-guaranteed fields that are absent fail with a named error.
pub fn normalize(
    raw: &str,
    content_type: ContentType,
    request: &ContentRequest,
) -> Result<RenderVars, NormalizeError> {
    let content: GeneratedContent = serde_json::from_str(raw)?;

    let mut vars = default_vars();
    merge_ambient(&mut vars, request);

    match content_type {
        ContentType::GenericArticle => normalize_article(&mut vars, &content)?,
        ContentType::MatchReport | ContentType::SsMatchReport => {
            normalize_match(&mut vars, &content, request, content_type)?
        }
        ContentType::ScoutingReport => normalize_scout(&mut vars, &content, request)?,
    }

    Ok(vars)
}

/// Builds the paired home/away statistics block from the raw request
/// counters. Possession defaults to 50/50, counts to 0, xG to 0.0. Exposed
/// for the orchestrator, which synthesizes this block for edited content
/// that arrives without one.
pub fn build_match_stats(request: &ContentRequest) -> Result<Value, NormalizeError> {
    Ok(json!({
        "possession": {
            "home": request.home_possession.unwrap_or(50),
            "away": request.away_possession.unwrap_or(50),
        },
        "shots": {
            "home": request.home_shots.unwrap_or(0),
            "away": request.away_shots.unwrap_or(0),
        },
        "shots_on_target": {
            "home": request.home_shots_on_target.unwrap_or(0),
            "away": request.away_shots_on_target.unwrap_or(0),
        },
        "corners": {
            "home": request.home_corners.unwrap_or(0),
            "away": request.away_corners.unwrap_or(0),
        },
        "fouls": {
            "home": request.home_fouls.unwrap_or(0),
            "away": request.away_fouls.unwrap_or(0),
        },
        "yellow_cards": {
            "home": request.home_yellow_cards.unwrap_or(0),
            "away": request.away_yellow_cards.unwrap_or(0),
        },
        "red_cards": {
            "home": request.home_red_cards.unwrap_or(0),
            "away": request.away_red_cards.unwrap_or(0),
        },
        "offsides": {
            "home": request.home_offsides.unwrap_or(0),
            "away": request.away_offsides.unwrap_or(0),
        },
        "xg": {
            "home": coerce_xg(&request.home_xg, "home_xg")?,
            "away": coerce_xg(&request.away_xg, "away_xg")?,
        },
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Per-variant mapping
// ────────────────────────────────────────────────────────────────────────────

fn normalize_article(
    vars: &mut RenderVars,
    content: &GeneratedContent,
) -> Result<(), NormalizeError> {
    let headline = template_str(content, "headline")
        .ok_or(NormalizeError::MissingField("template_data.headline"))?
        .to_string();
    let sections = content
        .body_sections(ContentType::GenericArticle)
        .ok_or(NormalizeError::MissingField("article_content"))?;

    let html = render_sections(
        sections,
        ContentType::GenericArticle.section_markup(),
        Some(&headline),
        true,
    );

    vars.insert("headline".into(), json!(headline));
    vars.insert("article_content".into(), json!(html));

    if let Some(alt) = nonempty(template_str(content, "featured_image_alt")) {
        vars.insert("featured_image_alt".into(), json!(alt));
    }
    if let Some(category) = nonempty(template_str(content, "article_category")) {
        vars.insert("article_category".into(), json!(category));
    }
    if let Some(description) = meta_str(content, "meta_description") {
        vars.insert("meta_description".into(), json!(description));
    }
    if let Some(keywords) = content.meta_data.get("keywords") {
        vars.insert("keywords".into(), keywords.clone());
    }
    vars.insert(
        "author".into(),
        json!(meta_str(content, "author").unwrap_or_default()),
    );
    for key in ["og_title", "og_description", "twitter_title", "twitter_description"] {
        vars.insert(
            key.into(),
            json!(meta_str(content, key).unwrap_or_default()),
        );
    }

    Ok(())
}

fn normalize_match(
    vars: &mut RenderVars,
    content: &GeneratedContent,
    request: &ContentRequest,
    content_type: ContentType,
) -> Result<(), NormalizeError> {
    let headline = template_str(content, "headline")
        .ok_or(NormalizeError::MissingField("template_data.headline"))?
        .to_string();
    let sections = content
        .body_sections(content_type)
        .ok_or(NormalizeError::MissingField("match_report"))?;
    let meta_description = meta_str(content, "meta_description")
        .ok_or(NormalizeError::MissingField("meta_data.meta_description"))?;

    let html = render_sections(sections, content_type.section_markup(), None, false);

    // Alt text falls back to a synthesized "<home> vs <away> match report"
    // string when the model's suggestion is blank.
    let home = request.home_team.as_deref().unwrap_or("");
    let away = request.away_team.as_deref().unwrap_or("");
    let image_alt = nonempty(template_str(content, "featured_image_alt"))
        .map(str::to_string)
        .unwrap_or_else(|| format!("{home} vs {away} match report"));

    vars.insert("headline".into(), json!(headline));
    vars.insert(
        "match_summary".into(),
        json!(template_str(content, "match_summary").unwrap_or_default()),
    );
    vars.insert("article_content".into(), json!(html));
    vars.insert("meta_description".into(), json!(meta_description));
    vars.insert(
        "keywords".into(),
        content.meta_data.get("keywords").cloned().unwrap_or(json!([])),
    );
    vars.insert("featured_image_alt".into(), json!(image_alt));
    vars.insert("article_category".into(), json!("Sports"));
    vars.insert("schema_type".into(), json!("SportsEvent"));
    vars.insert(
        "author".into(),
        json!(meta_str(content, "author").unwrap_or("Sports Reporter".into())),
    );
    for key in ["og_title", "og_description", "twitter_title", "twitter_description"] {
        vars.insert(
            key.into(),
            json!(meta_str(content, key).unwrap_or_default()),
        );
    }

    vars.insert("home_team".into(), json!(home));
    vars.insert("away_team".into(), json!(away));
    vars.insert("home_score".into(), json!(value_display(&request.home_score)));
    vars.insert("away_score".into(), json!(value_display(&request.away_score)));
    vars.insert(
        "competition".into(),
        json!(request.competition.as_deref().unwrap_or("")),
    );
    vars.insert(
        "match_date".into(),
        json!(request.match_date.as_deref().unwrap_or("")),
    );
    vars.insert("venue".into(), json!(request.venue.as_deref().unwrap_or("")));
    vars.insert(
        "home_lineup".into(),
        json!(request.home_lineup.as_deref().unwrap_or("")),
    );
    vars.insert(
        "away_lineup".into(),
        json!(request.away_lineup.as_deref().unwrap_or("")),
    );
    vars.insert("match_stats".into(), build_match_stats(request)?);

    Ok(())
}

fn normalize_scout(
    vars: &mut RenderVars,
    content: &GeneratedContent,
    request: &ContentRequest,
) -> Result<(), NormalizeError> {
    // The scouting variant has fallbacks everywhere — the template's strict
    // contract is enforced by the orchestrator's defaults pass instead.
    let headline = nonempty(template_str(content, "headline"))
        .unwrap_or("Default Headline")
        .to_string();
    let meta_description = meta_str(content, "meta_description")
        .unwrap_or("Default meta description.".into());

    let sections = content
        .body_sections(ContentType::ScoutingReport)
        .unwrap_or(&[]);
    let html = render_sections(
        sections,
        ContentType::ScoutingReport.section_markup(),
        None,
        false,
    );

    let image_alt = nonempty(template_str(content, "featured_image_alt"))
        .unwrap_or(DEFAULT_IMAGE_ALT);

    vars.insert("headline".into(), json!(headline));
    vars.insert(
        "summary".into(),
        json!(template_str(content, "summary").unwrap_or("Default Summary")),
    );
    vars.insert("article_content".into(), json!(html));
    vars.insert("meta_description".into(), json!(meta_description));
    vars.insert("featured_image_alt".into(), json!(image_alt));

    vars.insert(
        "player_name".into(),
        json!(request.player_name.as_deref().unwrap_or("Unknown Player")),
    );
    vars.insert(
        "player_position".into(),
        json!(request.player_position.as_deref().unwrap_or("Unknown Position")),
    );
    let age = value_display(&request.player_age);
    vars.insert(
        "player_age".into(),
        json!(if age.is_empty() { "Unknown Age".to_string() } else { age }),
    );
    vars.insert(
        "player_nationality".into(),
        json!(request.player_nationality.as_deref().unwrap_or("Unknown Nationality")),
    );
    vars.insert(
        "favored_foot".into(),
        json!(request.favored_foot.as_deref().unwrap_or("Unknown")),
    );

    vars.insert("og_title".into(), json!(headline));
    vars.insert("og_description".into(), json!(meta_description));

    // This template expects keywords as a single delimited string, not a
    // list. Intentional per-template contract.
    let keywords = content
        .meta_data
        .get("keywords")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();
    vars.insert("keywords".into(), json!(keywords));

    vars.insert(
        "scout_stats".into(),
        request
            .scout_stats
            .clone()
            .unwrap_or(json!("No stats available.")),
    );

    let stats = request.scout_stats_map();
    let form_text = stats
        .get("Recent Form")
        .and_then(Value::as_str)
        .unwrap_or("");
    let (form_summary, recent_matches) = parse_recent_form(form_text)?;
    vars.insert(
        "form_summary".into(),
        form_summary
            .map(|s| serde_json::to_value(s).unwrap_or(json!({})))
            .unwrap_or(json!({})),
    );
    vars.insert(
        "recent_matches".into(),
        serde_json::to_value(recent_matches).unwrap_or(json!([])),
    );

    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

/// Merges pass-through request fields every variant carries: image URL,
/// publisher identity, display theme, and hero-image anchor position.
fn merge_ambient(vars: &mut RenderVars, request: &ContentRequest) {
    if let Some(url) = nonempty(request.image_url.as_deref()) {
        vars.insert("featured_image_url".into(), json!(url));
    }
    vars.insert(
        "publisher_name".into(),
        json!(request.publisher_name.as_deref().unwrap_or("")),
    );
    vars.insert(
        "publisher_url".into(),
        json!(request.publisher_url.as_deref().unwrap_or("")),
    );
    if let Some(theme) = nonempty(request.theme.as_deref()) {
        vars.insert("theme".into(), json!(theme));
    }
    if let Some(position) = nonempty(request.image_position.as_deref()) {
        vars.insert("image_position".into(), json!(position));
    }
}

/// Renders response sections into one HTML block.
///
/// `suppress_heading` drops a heading element that textually equals the main
/// headline (the paragraphs underneath are kept). `strip_paragraph_tags`
/// removes pre-existing `<p>` markup before re-wrapping, so normalizing
/// already-wrapped text never double-wraps.
fn render_sections(
    sections: &[Section],
    markup: SectionMarkup,
    suppress_heading: Option<&str>,
    strip_paragraph_tags: bool,
) -> String {
    let mut pieces: Vec<String> = Vec::new();

    for section in sections {
        if !markup.open.is_empty() {
            pieces.push(markup.open.to_string());
        }
        if let Some(heading) = &section.heading {
            let duplicate = suppress_heading.is_some_and(|h| h == heading);
            if !heading.is_empty() && !duplicate {
                pieces.push(format!(
                    "{}{}{}",
                    markup.heading_open, heading, markup.heading_close
                ));
            }
        }
        for paragraph in &section.content {
            let text = if strip_paragraph_tags {
                paragraph.replace("<p>", "").replace("</p>", "").trim().to_string()
            } else {
                paragraph.clone()
            };
            pieces.push(format!("{}{}{}", markup.para_open, text, markup.para_close));
        }
        if !markup.close.is_empty() {
            pieces.push(markup.close.to_string());
        }
    }

    pieces.join("\n")
}

fn coerce_xg(value: &Option<Value>, field: &'static str) -> Result<f64, NormalizeError> {
    match value {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n.as_f64().ok_or(NormalizeError::NonNumeric(field)),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| NormalizeError::NonNumeric(field)),
        Some(_) => Err(NormalizeError::NonNumeric(field)),
    }
}

fn template_str<'a>(content: &'a GeneratedContent, key: &str) -> Option<&'a str> {
    content.template_data.get(key).and_then(Value::as_str)
}

fn meta_str(content: &GeneratedContent, key: &str) -> Option<String> {
    content
        .meta_data
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn nonempty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn article_reply() -> String {
        json!({
            "template_data": {
                "headline": "Pressing Matters",
                "featured_image_alt": "A high press in action",
                "article_category": "Tactics"
            },
            "meta_data": {
                "meta_description": "How pressing shapes modern football.",
                "keywords": ["pressing", "tactics"],
                "author": "Jo Bloggs",
                "og_title": "Pressing Matters",
                "og_description": "How pressing shapes modern football."
            },
            "article_content": [
                {"heading": "Origins", "content": ["First paragraph.", "Second paragraph."]},
                {"heading": "Pressing Matters", "content": ["Duplicate-heading section."]},
                {"content": ["Headingless section."]}
            ]
        })
        .to_string()
    }

    fn match_reply() -> String {
        json!({
            "template_data": {
                "headline": "Late Drama at the Lane",
                "match_summary": "A frantic finish.",
                "featured_image_alt": ""
            },
            "meta_data": {
                "meta_description": "Match report.",
                "keywords": ["football"]
            },
            "match_report": [
                {"heading": "Match Overview", "content": ["The hosts started well."]},
                {"heading": "Match Analysis", "content": ["The xG told the story.", "Possession was even."]}
            ]
        })
        .to_string()
    }

    fn scout_reply() -> String {
        json!({
            "template_data": {
                "headline": "One To Watch",
                "summary": "A promising wide forward.",
                "featured_image_alt": "Player portrait"
            },
            "meta_data": {
                "meta_description": "Scout report.",
                "keywords": ["scouting", "wingers"]
            },
            "scout_report": [
                {"heading": "Profile", "content": ["Direct and quick."]}
            ]
        })
        .to_string()
    }

    #[test]
    fn test_malformed_json_is_a_normalization_failure() {
        let err = normalize("{not json", ContentType::GenericArticle, &ContentRequest::default())
            .unwrap_err();
        assert!(matches!(err, NormalizeError::Json(_)));
    }

    #[test]
    fn test_article_missing_headline_fails_with_named_field() {
        let raw = json!({
            "template_data": {},
            "meta_data": {},
            "article_content": []
        })
        .to_string();
        let err = normalize(&raw, ContentType::GenericArticle, &ContentRequest::default())
            .unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::MissingField("template_data.headline")
        ));
    }

    #[test]
    fn test_article_sections_and_paragraph_counts() {
        let vars = normalize(
            &article_reply(),
            ContentType::GenericArticle,
            &ContentRequest::default(),
        )
        .unwrap();

        let html = vars["article_content"].as_str().unwrap();
        // Three sections, one heading equal to the headline is suppressed,
        // one section has no heading: exactly one <h2> survives.
        assert_eq!(html.matches("<h2>").count(), 1);
        assert!(html.contains("<h2>Origins</h2>"));
        // All four paragraphs survive, including the suppressed section's.
        assert_eq!(html.matches("<p>").count(), 4);
        assert!(html.contains("<p>Duplicate-heading section.</p>"));
    }

    #[test]
    fn test_article_paragraph_rewrap_is_idempotent() {
        let raw = json!({
            "template_data": {"headline": "H"},
            "meta_data": {},
            "article_content": [
                {"content": ["<p>Already wrapped.</p>", "Plain text."]}
            ]
        })
        .to_string();
        let vars = normalize(&raw, ContentType::GenericArticle, &ContentRequest::default())
            .unwrap();
        let html = vars["article_content"].as_str().unwrap();
        assert_eq!(html.matches("<p>Already wrapped.</p>").count(), 1);
        assert!(!html.contains("<p><p>"));
    }

    #[test]
    fn test_article_merges_meta_and_ambient_fields() {
        let request = ContentRequest {
            image_url: Some("https://cdn.example.com/press.jpg".to_string()),
            publisher_name: Some("The Gazette".to_string()),
            theme: Some("modern".to_string()),
            ..Default::default()
        };
        let vars = normalize(&article_reply(), ContentType::GenericArticle, &request).unwrap();
        assert_eq!(vars["author"], json!("Jo Bloggs"));
        assert_eq!(vars["keywords"], json!(["pressing", "tactics"]));
        assert_eq!(vars["featured_image_url"], json!("https://cdn.example.com/press.jpg"));
        assert_eq!(vars["publisher_name"], json!("The Gazette"));
        assert_eq!(vars["theme"], json!("modern"));
        assert_eq!(vars["image_position"], json!("center"));
    }

    #[test]
    fn test_article_category_mapped_from_reply_with_default_fallback() {
        let vars = normalize(
            &article_reply(),
            ContentType::GenericArticle,
            &ContentRequest::default(),
        )
        .unwrap();
        assert_eq!(vars["article_category"], json!("Tactics"));

        let raw = json!({
            "template_data": {"headline": "H"},
            "meta_data": {},
            "article_content": []
        })
        .to_string();
        let vars = normalize(&raw, ContentType::GenericArticle, &ContentRequest::default())
            .unwrap();
        assert_eq!(vars["article_category"], json!("Default Category"));
    }

    #[test]
    fn test_article_blank_image_url_falls_back_to_default() {
        let request = ContentRequest {
            image_url: Some("   ".to_string()),
            ..Default::default()
        };
        let vars = normalize(&article_reply(), ContentType::GenericArticle, &request).unwrap();
        assert_eq!(vars["featured_image_url"], json!(DEFAULT_IMAGE_URL));
    }

    #[test]
    fn test_match_stats_always_complete_even_with_empty_request() {
        let vars = normalize(
            &match_reply(),
            ContentType::MatchReport,
            &ContentRequest::default(),
        )
        .unwrap();

        let stats = vars["match_stats"].as_object().unwrap();
        for category in [
            "possession",
            "shots",
            "shots_on_target",
            "corners",
            "fouls",
            "yellow_cards",
            "red_cards",
            "offsides",
            "xg",
        ] {
            assert!(stats.contains_key(category), "missing {category}");
        }
        assert_eq!(stats["possession"]["home"], json!(50));
        assert_eq!(stats["possession"]["away"], json!(50));
        assert_eq!(stats["shots"]["home"], json!(0));
        assert_eq!(stats["xg"]["home"], json!(0.0));
    }

    #[test]
    fn test_match_alt_text_synthesized_when_model_suggestion_blank() {
        let request = ContentRequest {
            home_team: Some("Arsenal".to_string()),
            away_team: Some("Chelsea".to_string()),
            ..Default::default()
        };
        let vars = normalize(&match_reply(), ContentType::MatchReport, &request).unwrap();
        assert_eq!(
            vars["featured_image_alt"],
            json!("Arsenal vs Chelsea match report")
        );
    }

    #[test]
    fn test_match_wrapper_classes_differ_between_sibling_variants() {
        let plain = normalize(
            &match_reply(),
            ContentType::MatchReport,
            &ContentRequest::default(),
        )
        .unwrap();
        let ss = normalize(
            &match_reply(),
            ContentType::SsMatchReport,
            &ContentRequest::default(),
        )
        .unwrap();
        assert!(plain["article_content"]
            .as_str()
            .unwrap()
            .contains("class=\"match-section\""));
        assert!(ss["article_content"]
            .as_str()
            .unwrap()
            .contains("class=\"ss-match-section\""));
        assert!(ss["article_content"]
            .as_str()
            .unwrap()
            .contains("class=\"ss-content-paragraph\""));
    }

    #[test]
    fn test_match_xg_string_is_coerced_to_float() {
        let request = ContentRequest {
            home_xg: Some(json!("1.42")),
            away_xg: Some(json!(0.7)),
            ..Default::default()
        };
        let vars = normalize(&match_reply(), ContentType::MatchReport, &request).unwrap();
        assert_eq!(vars["match_stats"]["xg"]["home"], json!(1.42));
        assert_eq!(vars["match_stats"]["xg"]["away"], json!(0.7));
    }

    #[test]
    fn test_match_non_numeric_xg_is_a_failure() {
        let request = ContentRequest {
            home_xg: Some(json!("plenty")),
            ..Default::default()
        };
        let err = normalize(&match_reply(), ContentType::MatchReport, &request).unwrap_err();
        assert!(matches!(err, NormalizeError::NonNumeric("home_xg")));
    }

    #[test]
    fn test_match_missing_report_sections_fails() {
        let raw = json!({
            "template_data": {"headline": "H"},
            "meta_data": {"meta_description": "D"}
        })
        .to_string();
        let err = normalize(&raw, ContentType::MatchReport, &ContentRequest::default())
            .unwrap_err();
        assert!(matches!(err, NormalizeError::MissingField("match_report")));
    }

    #[test]
    fn test_scout_keywords_become_a_joined_string() {
        let vars = normalize(
            &scout_reply(),
            ContentType::ScoutingReport,
            &ContentRequest::default(),
        )
        .unwrap();
        assert_eq!(vars["keywords"], json!("scouting, wingers"));
    }

    #[test]
    fn test_scout_identity_fields_default_to_unknowns() {
        let vars = normalize(
            &scout_reply(),
            ContentType::ScoutingReport,
            &ContentRequest::default(),
        )
        .unwrap();
        assert_eq!(vars["player_name"], json!("Unknown Player"));
        assert_eq!(vars["player_position"], json!("Unknown Position"));
        assert_eq!(vars["player_age"], json!("Unknown Age"));
        assert_eq!(vars["player_nationality"], json!("Unknown Nationality"));
        assert_eq!(vars["favored_foot"], json!("Unknown"));
        assert_eq!(vars["scout_stats"], json!("No stats available."));
    }

    #[test]
    fn test_scout_recent_form_is_parsed_and_merged() {
        let form = "Recent Form\n\
Total: 3 goals from 10 shots (8 on target, 1.11 xG)\n\
\n\
- vs Nottm Forest (H): 0 goals from 1 shots (1 on target, 0.03 xG)\n\
- vs Arsenal (A): 1 goals from 3 shots (2 on target, 0.40 xG)";
        let request = ContentRequest {
            scout_stats: Some(json!({"Recent Form": form})),
            ..Default::default()
        };
        let vars = normalize(&scout_reply(), ContentType::ScoutingReport, &request).unwrap();

        assert_eq!(vars["form_summary"]["goals"], json!(3));
        assert_eq!(vars["form_summary"]["xg"], json!(1.11));
        let matches = vars["recent_matches"].as_array().unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0]["opponent"], json!("Nottm Forest"));
        assert_eq!(matches[0]["venue"], json!("Home"));
    }

    #[test]
    fn test_scout_without_form_text_yields_empty_summary() {
        let vars = normalize(
            &scout_reply(),
            ContentType::ScoutingReport,
            &ContentRequest::default(),
        )
        .unwrap();
        assert_eq!(vars["form_summary"], json!({}));
        assert_eq!(vars["recent_matches"], json!([]));
    }

    #[test]
    fn test_scout_og_fields_mirror_headline_and_description() {
        let vars = normalize(
            &scout_reply(),
            ContentType::ScoutingReport,
            &ContentRequest::default(),
        )
        .unwrap();
        assert_eq!(vars["og_title"], json!("One To Watch"));
        assert_eq!(vars["og_description"], json!("Scout report."));
    }

    #[test]
    fn test_scout_tolerates_missing_body_and_meta() {
        // Scouting has fallbacks everywhere — a bare reply still normalizes.
        let raw = json!({"template_data": {}, "meta_data": {}}).to_string();
        let vars = normalize(&raw, ContentType::ScoutingReport, &ContentRequest::default())
            .unwrap();
        assert_eq!(vars["headline"], json!("Default Headline"));
        assert_eq!(vars["summary"], json!("Default Summary"));
        assert_eq!(vars["article_content"], json!(""));
        assert_eq!(vars["keywords"], json!(""));
    }

    #[test]
    fn test_default_vars_carries_every_agnostic_key() {
        let vars = default_vars();
        for key in [
            "headline",
            "article_content",
            "meta_description",
            "keywords",
            "publish_date",
            "featured_image_url",
            "featured_image_alt",
            "article_category",
            "theme",
            "image_position",
        ] {
            assert!(vars.contains_key(key), "missing {key}");
        }
    }
}
