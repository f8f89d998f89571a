//! Prompt Builder — turns a `ContentRequest` into the system/user string
//! pair sent to the model.
//!
//! Missing optional fields degrade to literal placeholder text rather than
//! being omitted, so the prompt shape is stable and auditable regardless of
//! how sparse the form input was. This function never fails.

use crate::content::content_type::ContentType;
use crate::content::models::{value_display, ContentRequest};

/// The two strings handed to the content generator.
#[derive(Debug, Clone)]
pub struct PromptParts {
    pub system: &'static str,
    pub user: String,
}

/// Builds the prompt pair for the request's content type. Unrecognized
/// template names have already degraded to the generic article by the time
/// this runs.
pub fn build_prompt(request: &ContentRequest, content_type: ContentType) -> PromptParts {
    let user = match content_type {
        ContentType::GenericArticle => article_brief(request),
        ContentType::MatchReport | ContentType::SsMatchReport => match_brief(request),
        ContentType::ScoutingReport => scout_brief(request),
    };

    PromptParts {
        system: content_type.system_prompt(),
        user,
    }
}

fn article_brief(request: &ContentRequest) -> String {
    format!(
        r#"Write a structured article about {topic}.

### Required Structure:
1. **Title**: A concise, engaging title for the article.
2. **Headline**: A one-sentence summary of the article.
3. **Meta Information**:
   - Meta Description: A brief SEO-friendly description (up to 150 characters)
   - Keywords: Use these terms: {keywords}
   - Article Category: The primary category for this content
   - Featured Image Alt Text: A descriptive text for the featured image

4. **Article Content**: Create a well-structured article with appropriate sections.
Each section should be properly formatted with HTML paragraph tags (<p>).

Use the following context and data for reference:
Context:
{context}

Supporting Data:
{supporting_data}

### Writing Style:
- Use professional UK English
- Maintain a sophisticated, analytical tone
- Balance narrative flow with data insights
- Incorporate the provided supporting data naturally within the content"#,
        topic = request.topic.as_deref().unwrap_or("the provided topic"),
        keywords = request.keywords.as_deref().unwrap_or(""),
        context = request.context.as_deref().unwrap_or("No context provided."),
        supporting_data = request
            .supporting_data
            .as_deref()
            .unwrap_or("No supporting data provided."),
    )
}

fn match_brief(request: &ContentRequest) -> String {
    let home = request.home_team.as_deref().unwrap_or("");
    let away = request.away_team.as_deref().unwrap_or("");

    format!(
        r#"Write a professional match report for {home} vs {away} using ONLY the provided information.

### Data Provided
**Score**: {home} {home_score} - {away_score} {away}
**Competition**: {competition}
**Venue**: {venue}
**Date**: {match_date}

**Goals**:
- {home}: {home_scorers}
- {away}: {away_scorers}

**Key Events (if provided)**:
{key_events}

**Supporting Data**:
{supporting_data}

**Match Context**:
{context}

**Match Statistics**:
- Expected Goals (xG): {home} {home_xg} vs {away_xg} {away}
- Possession: {home_possession}% vs {away_possession}%
- Shots: {home_shots} ({home_sot} on target) vs {away_shots} ({away_sot} on target)
- Cards: {home} {home_yellow}Y/{home_red}R vs {away} {away_yellow}Y/{away_red}R

### Writing Instructions
1. **Structure**:
   - Always include:
     - **Match Overview** (introduction/context + final result)
     - **Match Analysis** (using statistics to describe the performance)
   - Include **Key Moments** ONLY IF there are specific notable events (e.g., goals, cards, missed penalties) mentioned in 'Key Events' or 'Supporting Data'.

2. **Content Rules**:
   - Use the match statistics in the "Match Analysis" section to support your observations.
   - Reference any notable events (like a missed penalty or key goals) ONLY if they are explicitly provided.
   - Do NOT invent or assume new events beyond the data.

3. **Style**:
   - Write in concise, professional UK English.
   - Avoid repetitive statements and speculative phrases.
   - Keep the narrative strictly to the facts provided.

Now, write the match report based on this data and structure."#,
        home = home,
        away = away,
        home_score = value_display(&request.home_score),
        away_score = value_display(&request.away_score),
        competition = request.competition.as_deref().unwrap_or(""),
        venue = request.venue.as_deref().unwrap_or(""),
        match_date = request.match_date.as_deref().unwrap_or(""),
        home_scorers = request.home_scorers.as_deref().unwrap_or("None"),
        away_scorers = request.away_scorers.as_deref().unwrap_or("None"),
        key_events = request
            .key_events
            .as_deref()
            .unwrap_or("No explicit key events mentioned."),
        supporting_data = request.supporting_data.as_deref().unwrap_or("None"),
        context = request
            .context
            .as_deref()
            .unwrap_or("No additional context provided."),
        // Display-only defaults: counts to 0, xG to 0.0. Not a data
        // correction — the normalizer applies its own defaults later.
        home_xg = xg_display(&request.home_xg),
        away_xg = xg_display(&request.away_xg),
        home_possession = request.home_possession.unwrap_or(0),
        away_possession = request.away_possession.unwrap_or(0),
        home_shots = request.home_shots.unwrap_or(0),
        away_shots = request.away_shots.unwrap_or(0),
        home_sot = request.home_shots_on_target.unwrap_or(0),
        away_sot = request.away_shots_on_target.unwrap_or(0),
        home_yellow = request.home_yellow_cards.unwrap_or(0),
        away_yellow = request.away_yellow_cards.unwrap_or(0),
        home_red = request.home_red_cards.unwrap_or(0),
        away_red = request.away_red_cards.unwrap_or(0),
    )
}

fn scout_brief(request: &ContentRequest) -> String {
    // Serialized scout_stats are decoded before interpolation; a decode
    // failure degrades to an empty mapping.
    let stats = request.scout_stats_map();
    let stats_json =
        serde_json::to_string_pretty(&stats).unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"Write a professional scout report about {player_name}.

### Provided Data:
- Position: {position}
- Age: {age}
- Nationality: {nationality}
- Favoured Foot: {foot}
- Stats: {stats}

### Additional Context:
{context}

Supporting Data:
{supporting_data}

### Requirements:
- Write the scout report as a cohesive narrative rather than multiple separate sections.
- Combine related points into flowing, well-structured paragraphs.
- Avoid excessive section breaks unless there is a major topic shift.
- Ensure that stats and context are naturally woven into the narrative.
- Produce a single, engaging piece of writing that reads naturally and is enjoyable for readers.
- Create an engaging headline and meta description for SEO, plus a short summary."#,
        player_name = request.player_name.as_deref().unwrap_or("Unknown Player"),
        position = request.player_position.as_deref().unwrap_or(""),
        age = value_display(&request.player_age),
        nationality = request.player_nationality.as_deref().unwrap_or(""),
        foot = request.favored_foot.as_deref().unwrap_or(""),
        stats = stats_json,
        context = request.context.as_deref().unwrap_or(""),
        supporting_data = request.supporting_data.as_deref().unwrap_or(""),
    )
}

fn xg_display(value: &Option<serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => "0.0".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_article_brief_substitutes_placeholders_for_missing_fields() {
        let request = ContentRequest::default();
        let parts = build_prompt(&request, ContentType::GenericArticle);
        assert!(parts.user.contains("No context provided."));
        assert!(parts.user.contains("No supporting data provided."));
    }

    #[test]
    fn test_match_brief_never_panics_on_empty_request() {
        let request = ContentRequest::default();
        let parts = build_prompt(&request, ContentType::MatchReport);
        assert!(parts.user.contains("No explicit key events mentioned."));
        assert!(parts.user.contains("No additional context provided."));
        // Numeric fields default to 0 / 0.0 for display
        assert!(parts.user.contains("0.0 vs 0.0"));
        assert!(parts.user.contains("0% vs 0%"));
    }

    #[test]
    fn test_match_brief_interpolates_supplied_stats_verbatim() {
        let request = ContentRequest {
            home_team: Some("Arsenal".to_string()),
            away_team: Some("Chelsea".to_string()),
            home_score: Some(json!(2)),
            away_score: Some(json!(1)),
            home_xg: Some(json!(1.87)),
            home_possession: Some(61),
            ..Default::default()
        };
        let parts = build_prompt(&request, ContentType::MatchReport);
        assert!(parts.user.contains("Arsenal 2 - 1 Chelsea"));
        assert!(parts.user.contains("Arsenal 1.87 vs"));
        assert!(parts.user.contains("61% vs"));
    }

    #[test]
    fn test_scout_brief_decodes_serialized_stats() {
        let request = ContentRequest {
            player_name: Some("Cole Palmer".to_string()),
            scout_stats: Some(json!("{\"Pace\": \"85\"}")),
            ..Default::default()
        };
        let parts = build_prompt(&request, ContentType::ScoutingReport);
        assert!(parts.user.contains("Cole Palmer"));
        assert!(parts.user.contains("\"Pace\": \"85\""));
    }

    #[test]
    fn test_scout_brief_bad_stats_degrade_to_empty_mapping() {
        let request = ContentRequest {
            scout_stats: Some(json!("{broken")),
            ..Default::default()
        };
        let parts = build_prompt(&request, ContentType::ScoutingReport);
        assert!(parts.user.contains("Stats: {}"));
    }

    #[test]
    fn test_each_content_type_selects_its_system_prompt() {
        let request = ContentRequest::default();
        let article = build_prompt(&request, ContentType::GenericArticle);
        let report = build_prompt(&request, ContentType::MatchReport);
        let scout = build_prompt(&request, ContentType::ScoutingReport);
        assert!(article.system.contains("SEO content writer"));
        assert!(report.system.contains("sports journalist"));
        assert!(scout.system.contains("scout reports"));
    }
}
