pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::billing;
use crate::content::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/generate", post(handlers::generate_handler))
        .route("/api/download_article", post(handlers::download_handler))
        .route(
            "/api/create-checkout-session",
            post(billing::create_checkout_handler),
        )
        .route("/api/webhook", post(billing::webhook_handler))
        .with_state(state)
}
