//! HTML template rendering. Templates are compiled into the binary and
//! rendered with strict undefined handling: a template that dereferences a
//! variable the pipeline did not supply is a rendering failure, not a blank.

use minijinja::{Environment, UndefinedBehavior};
use thiserror::Error;

use crate::content::content_type::ContentType;
use crate::content::models::RenderVars;

pub const DOWNLOAD_TEMPLATE: &str = "download_template.html";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    #[error(transparent)]
    Template(#[from] minijinja::Error),
}

/// Rendering seam. Handlers and the orchestrator depend on this trait so
/// tests can substitute a pass-through renderer.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template_name: &str, vars: &RenderVars) -> Result<String, RenderError>;
}

/// Production renderer over the embedded template set.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        let templates = [
            (
                ContentType::GenericArticle.template_name(),
                include_str!("../../templates/article_template.html"),
            ),
            (
                ContentType::MatchReport.template_name(),
                include_str!("../../templates/match_report_template.html"),
            ),
            (
                ContentType::SsMatchReport.template_name(),
                include_str!("../../templates/ss_match_report_template.html"),
            ),
            (
                ContentType::ScoutingReport.template_name(),
                include_str!("../../templates/ss_player_scout_report_template.html"),
            ),
            (
                DOWNLOAD_TEMPLATE,
                include_str!("../../templates/download_template.html"),
            ),
        ];

        for (name, source) in templates {
            env.add_template(name, source)
                .expect("embedded template is valid");
        }

        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template_name: &str, vars: &RenderVars) -> Result<String, RenderError> {
        let template = self
            .env
            .get_template(template_name)
            .map_err(|_| RenderError::UnknownTemplate(template_name.to_string()))?;
        Ok(template.render(vars)?)
    }
}
