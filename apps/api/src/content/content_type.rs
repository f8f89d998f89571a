//! Content-type dispatch — the single closed enumeration behind prompt
//! selection, generation parameters, normalization, and validation.
//!
//! Every per-variant decision in the pipeline (system prompt, model
//! parameters, response body key, section markup, required template
//! variables) hangs off this enum so the variant list exists in exactly
//! one place.

use serde::{Deserialize, Serialize};

use crate::content::prompts::{ARTICLE_SYSTEM, MATCH_REPORT_SYSTEM, SCOUT_REPORT_SYSTEM};
use crate::llm_client::GenerationParams;

/// The four render variants the backend knows how to produce.
///
/// `MatchReport` and `SsMatchReport` are siblings: same prompt family and
/// normalization shape, different wrapper markup and required-field lists.
/// Anything unrecognized degrades to `GenericArticle` rather than failing —
/// deliberate policy so unknown future template names keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    GenericArticle,
    MatchReport,
    SsMatchReport,
    ScoutingReport,
}

/// Markup fragments used to wrap a normalized response section.
/// The three downstream template families have incompatible CSS contracts,
/// so each variant carries its own wrapper.
#[derive(Debug, Clone, Copy)]
pub struct SectionMarkup {
    pub open: &'static str,
    pub close: &'static str,
    pub heading_open: &'static str,
    pub heading_close: &'static str,
    pub para_open: &'static str,
    pub para_close: &'static str,
}

impl ContentType {
    /// Resolves an inbound `template_name` to a content type.
    /// Unknown names fall back to the generic article.
    pub fn from_template_name(name: &str) -> Self {
        match name {
            "match_report_template.html" => ContentType::MatchReport,
            "ss_match_report_template.html" => ContentType::SsMatchReport,
            "ss_player_scout_report_template.html" => ContentType::ScoutingReport,
            _ => ContentType::GenericArticle,
        }
    }

    /// The template identifier handed to the rendering engine.
    pub fn template_name(self) -> &'static str {
        match self {
            ContentType::GenericArticle => "article_template.html",
            ContentType::MatchReport => "match_report_template.html",
            ContentType::SsMatchReport => "ss_match_report_template.html",
            ContentType::ScoutingReport => "ss_player_scout_report_template.html",
        }
    }

    /// System instructions sent with every LLM call for this variant.
    pub fn system_prompt(self) -> &'static str {
        match self {
            ContentType::GenericArticle => ARTICLE_SYSTEM,
            ContentType::MatchReport | ContentType::SsMatchReport => MATCH_REPORT_SYSTEM,
            ContentType::ScoutingReport => SCOUT_REPORT_SYSTEM,
        }
    }

    /// Model parameters per variant. Match reports need tighter factual
    /// adherence than feature articles, so they run cooler.
    pub fn generation_params(self) -> GenerationParams {
        match self {
            ContentType::GenericArticle => GenerationParams {
                max_tokens: 8000,
                temperature: 0.7,
            },
            ContentType::MatchReport | ContentType::SsMatchReport => GenerationParams {
                max_tokens: 6000,
                temperature: 0.4,
            },
            ContentType::ScoutingReport => GenerationParams {
                max_tokens: 7000,
                temperature: 0.6,
            },
        }
    }

    /// Wrapper markup for one response section.
    pub fn section_markup(self) -> SectionMarkup {
        match self {
            ContentType::GenericArticle => SectionMarkup {
                open: "",
                close: "",
                heading_open: "<h2>",
                heading_close: "</h2>",
                para_open: "<p>",
                para_close: "</p>",
            },
            ContentType::MatchReport => SectionMarkup {
                open: "\n<section class=\"match-section\">\n",
                close: "</section>\n",
                heading_open: "<h2>",
                heading_close: "</h2>\n",
                para_open: "<p>",
                para_close: "</p>\n",
            },
            ContentType::SsMatchReport => SectionMarkup {
                open: "\n<div class=\"ss-match-section\">\n",
                close: "</div>\n",
                heading_open: "<h2 class=\"ss-section-heading\">",
                heading_close: "</h2>\n",
                para_open: "<p class=\"ss-content-paragraph\">",
                para_close: "</p>\n",
            },
            ContentType::ScoutingReport => SectionMarkup {
                open: "<section class=\"scout-report-section\">\n",
                close: "</section>\n",
                heading_open: "<h2>",
                heading_close: "</h2>\n",
                para_open: "<p>",
                para_close: "</p>\n",
            },
        }
    }

    /// Required template variables for strict post-normalization validation.
    /// The generic article is intentionally never validated — its template
    /// tolerates the content-agnostic defaults.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            ContentType::GenericArticle => &[],
            ContentType::MatchReport => &["headline", "article_content", "match_stats"],
            ContentType::SsMatchReport => &[
                "headline",
                "article_content",
                "match_stats",
                "meta_description",
                "keywords",
            ],
            ContentType::ScoutingReport => &[
                "headline",
                "article_content",
                "player_name",
                "player_position",
                "player_age",
                "player_nationality",
                "favored_foot",
            ],
        }
    }

    pub fn is_match_report(self) -> bool {
        matches!(self, ContentType::MatchReport | ContentType::SsMatchReport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_template_names_round_trip() {
        for ct in [
            ContentType::GenericArticle,
            ContentType::MatchReport,
            ContentType::SsMatchReport,
            ContentType::ScoutingReport,
        ] {
            assert_eq!(ContentType::from_template_name(ct.template_name()), ct);
        }
    }

    #[test]
    fn test_unknown_template_name_falls_back_to_generic() {
        assert_eq!(
            ContentType::from_template_name("newsletter_template.html"),
            ContentType::GenericArticle
        );
        assert_eq!(
            ContentType::from_template_name(""),
            ContentType::GenericArticle
        );
    }

    #[test]
    fn test_download_template_treated_as_generic() {
        // The download template shares the generic article contract.
        assert_eq!(
            ContentType::from_template_name("download_template.html"),
            ContentType::GenericArticle
        );
    }

    #[test]
    fn test_match_reports_run_cooler_than_articles() {
        let article = ContentType::GenericArticle.generation_params();
        let report = ContentType::MatchReport.generation_params();
        assert!(report.temperature < article.temperature);
    }

    #[test]
    fn test_sibling_match_variants_share_prompt_but_not_markup() {
        assert_eq!(
            ContentType::MatchReport.system_prompt(),
            ContentType::SsMatchReport.system_prompt()
        );
        assert_ne!(
            ContentType::MatchReport.section_markup().open,
            ContentType::SsMatchReport.section_markup().open
        );
    }

    #[test]
    fn test_generic_article_has_no_required_fields() {
        assert!(ContentType::GenericArticle.required_fields().is_empty());
    }

    #[test]
    fn test_ss_match_report_requires_meta_fields() {
        let fields = ContentType::SsMatchReport.required_fields();
        assert!(fields.contains(&"meta_description"));
        assert!(fields.contains(&"keywords"));
        assert!(fields.contains(&"match_stats"));
    }
}
