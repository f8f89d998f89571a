//! Request and response shapes for the content pipeline.
//!
//! `ContentRequest` is the caller-supplied form input; every field is
//! optional at the wire level because the three content types share one
//! endpoint and one request shape. `GeneratedContent` is the model's
//! structured reply; `RenderVars` is the flat mapping handed to the
//! rendering engine.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::content::content_type::ContentType;

/// The flat variable mapping handed to the rendering engine. Every key a
/// template dereferences must be present — the renderer runs with strict
/// undefined semantics.
pub type RenderVars = Map<String, Value>;

/// Caller-supplied form input for one generation request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentRequest {
    #[serde(default)]
    pub template_name: Option<String>,
    /// When present, the caller is re-submitting edited variables and the
    /// prompt/generate/normalize stages are skipped entirely.
    #[serde(default)]
    pub edited_content: Option<RenderVars>,

    // Shared fields
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub supporting_data: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub publisher_name: Option<String>,
    #[serde(default)]
    pub publisher_url: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub image_position: Option<String>,

    // Match report fields
    #[serde(default)]
    pub home_team: Option<String>,
    #[serde(default)]
    pub away_team: Option<String>,
    #[serde(default)]
    pub home_score: Option<Value>,
    #[serde(default)]
    pub away_score: Option<Value>,
    #[serde(default)]
    pub competition: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub match_date: Option<String>,
    #[serde(default)]
    pub home_scorers: Option<String>,
    #[serde(default)]
    pub away_scorers: Option<String>,
    #[serde(default)]
    pub key_events: Option<String>,
    #[serde(default)]
    pub home_lineup: Option<String>,
    #[serde(default)]
    pub away_lineup: Option<String>,
    #[serde(default)]
    pub home_possession: Option<i64>,
    #[serde(default)]
    pub away_possession: Option<i64>,
    #[serde(default)]
    pub home_shots: Option<i64>,
    #[serde(default)]
    pub away_shots: Option<i64>,
    #[serde(default)]
    pub home_shots_on_target: Option<i64>,
    #[serde(default)]
    pub away_shots_on_target: Option<i64>,
    #[serde(default)]
    pub home_corners: Option<i64>,
    #[serde(default)]
    pub away_corners: Option<i64>,
    #[serde(default)]
    pub home_fouls: Option<i64>,
    #[serde(default)]
    pub away_fouls: Option<i64>,
    #[serde(default)]
    pub home_yellow_cards: Option<i64>,
    #[serde(default)]
    pub away_yellow_cards: Option<i64>,
    #[serde(default)]
    pub home_red_cards: Option<i64>,
    #[serde(default)]
    pub away_red_cards: Option<i64>,
    #[serde(default)]
    pub home_offsides: Option<i64>,
    #[serde(default)]
    pub away_offsides: Option<i64>,
    /// Expected goals arrive as whatever the form sent (number or string);
    /// coercion to float happens during normalization so a bad value is a
    /// normalization failure, not a deserialization failure.
    #[serde(default)]
    pub home_xg: Option<Value>,
    #[serde(default)]
    pub away_xg: Option<Value>,

    // Scouting report fields
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub player_position: Option<String>,
    #[serde(default)]
    pub player_age: Option<Value>,
    #[serde(default)]
    pub player_nationality: Option<String>,
    #[serde(default)]
    pub favored_foot: Option<String>,
    /// Either a structured mapping or a serialized JSON string of one.
    #[serde(default)]
    pub scout_stats: Option<Value>,
}

impl ContentRequest {
    pub fn content_type(&self) -> ContentType {
        ContentType::from_template_name(self.template_name.as_deref().unwrap_or(""))
    }

    /// Decodes `scout_stats` into a structured mapping. A serialized string
    /// that fails to decode degrades to an empty mapping — never an error.
    pub fn scout_stats_map(&self) -> Map<String, Value> {
        match &self.scout_stats {
            Some(Value::Object(map)) => map.clone(),
            Some(Value::String(raw)) => serde_json::from_str::<Map<String, Value>>(raw)
                .unwrap_or_default(),
            _ => Map::new(),
        }
    }
}

/// One body section of the model's reply: an optional heading and an
/// ordered list of paragraph strings.
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub content: Vec<String>,
}

/// The model's structured reply. The body key differs per content type, so
/// all three appear here and the normalizer picks the one it needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratedContent {
    #[serde(default)]
    pub template_data: Map<String, Value>,
    #[serde(default)]
    pub meta_data: Map<String, Value>,
    #[serde(default)]
    pub article_content: Option<Vec<Section>>,
    #[serde(default)]
    pub match_report: Option<Vec<Section>>,
    #[serde(default)]
    pub scout_report: Option<Vec<Section>>,
}

impl GeneratedContent {
    /// Body sections for the given content type, if the model supplied them.
    pub fn body_sections(&self, content_type: ContentType) -> Option<&[Section]> {
        let sections = match content_type {
            ContentType::GenericArticle => &self.article_content,
            ContentType::MatchReport | ContentType::SsMatchReport => &self.match_report,
            ContentType::ScoutingReport => &self.scout_report,
        };
        sections.as_deref()
    }
}

/// Renders a loosely-typed request value for prompt interpolation:
/// strings verbatim, numbers via display, anything else empty.
pub fn value_display(value: &Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
