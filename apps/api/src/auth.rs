//! Bearer-token authentication against the hosted auth service. Handlers
//! take an `AuthedUser` argument and never see raw tokens.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// The authenticated caller, resolved from the request's bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthedUser {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Client for the auth service's user-introspection endpoint.
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AuthClient {
    pub fn new(client: Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Resolves a bearer token to a user. Any failure, network or
    /// credential, reads as unauthorized to the caller.
    pub async fn verify_token(&self, token: &str) -> Result<AuthedUser, AppError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .bearer_auth(token)
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                warn!("Auth service unreachable: {e}");
                AppError::Unauthorized
            })?;

        if !response.status().is_success() {
            return Err(AppError::Unauthorized);
        }

        response.json::<AuthedUser>().await.map_err(|e| {
            warn!("Auth service returned an unreadable user object: {e}");
            AppError::Unauthorized
        })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .filter(|t| !t.is_empty())
            .ok_or(AppError::Unauthorized)?;

        state.auth.verify_token(token).await
    }
}
