use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Panics at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: String,
    pub auth_base_url: String,
    pub auth_api_key: String,
    pub stripe_secret_key: String,
    pub stripe_price_id: String,
    pub stripe_webhook_secret: String,
    pub frontend_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            auth_base_url: require_env("AUTH_BASE_URL")?,
            auth_api_key: require_env("AUTH_API_KEY")?,
            stripe_secret_key: require_env("STRIPE_SECRET_KEY")?,
            stripe_price_id: require_env("STRIPE_PRICE_ID")?,
            stripe_webhook_secret: require_env("STRIPE_WEBHOOK_SECRET")?,
            frontend_url: require_env("FRONTEND_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
