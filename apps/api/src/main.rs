mod auth;
mod billing;
mod config;
mod content;
mod db;
mod errors;
mod llm_client;
mod render;
mod routes;
mod state;
mod subscriptions;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::AuthClient;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::OpenAiClient;
use crate::render::MiniJinjaRenderer;
use crate::routes::build_router;
use crate::state::AppState;

/// Fallback filter when RUST_LOG is unset. The directive must name the
/// crate (the bin target `api`), not the package: tracing targets in this
/// crate are `api::...`, so a package-named directive matches nothing.
fn fallback_env_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback_env_filter(&config.rust_log)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pressbox API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Shared HTTP client for auth and billing calls
    let http = reqwest::Client::new();

    let auth = AuthClient::new(
        http.clone(),
        config.auth_base_url.clone(),
        config.auth_api_key.clone(),
    );

    // Initialize LLM client
    let generator = Arc::new(OpenAiClient::new(config.openai_api_key.clone()));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Compile the embedded template set up front
    let renderer = Arc::new(MiniJinjaRenderer::new());
    info!("Template renderer initialized");

    // Build app state
    let state = AppState {
        db,
        auth,
        generator,
        renderer,
        http,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
