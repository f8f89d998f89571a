use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::content::normalizer::NormalizeError;
use crate::llm_client::LlmError;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("No articles remaining")]
    QuotaExceeded,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Generation error: {0}")]
    Generation(#[from] LlmError),

    #[error("Formatting error: {0}")]
    Formatting(#[from] NormalizeError),

    #[error("Rendering error: {0}")]
    Rendering(#[from] RenderError),

    #[error("Billing error: {0}")]
    Billing(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::QuotaExceeded => (
                StatusCode::FORBIDDEN,
                "QUOTA_EXCEEDED",
                "No articles remaining. Please upgrade to continue generating content."
                    .to_string(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Generation(e) => {
                tracing::error!("Generation error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_ERROR",
                    "Failed to generate content".to_string(),
                )
            }
            AppError::Formatting(e) => {
                tracing::error!("Formatting error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "FORMATTING_ERROR",
                    "Failed to format generated content".to_string(),
                )
            }
            AppError::Rendering(e) => {
                tracing::error!("Rendering error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    format!("Template rendering failed: {e}"),
                )
            }
            AppError::Billing(msg) => {
                tracing::error!("Billing error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "BILLING_ERROR",
                    "A payment provider error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
