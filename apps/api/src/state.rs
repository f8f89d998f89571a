use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::AuthClient;
use crate::config::Config;
use crate::llm_client::ContentGenerator;
use crate::render::TemplateRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub auth: AuthClient,
    /// Pluggable generation backend. Production wires `OpenAiClient`.
    pub generator: Arc<dyn ContentGenerator>,
    pub renderer: Arc<dyn TemplateRenderer>,
    /// Plain HTTP client for the billing provider.
    pub http: reqwest::Client,
    pub config: Config,
}
