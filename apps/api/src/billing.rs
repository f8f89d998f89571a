//! Stripe billing glue: checkout session creation and the webhook that
//! upgrades a user after payment. The webhook body is verified against the
//! signing secret before anything is parsed out of it.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use reqwest::Client;
use ring::hmac;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthedUser;
use crate::config::Config;
use crate::errors::AppError;
use crate::state::AppState;
use crate::subscriptions;

const STRIPE_CHECKOUT_URL: &str = "https://api.stripe.com/v1/checkout/sessions";
/// Webhooks older than this are rejected even with a valid signature.
const SIGNATURE_TOLERANCE_SECS: i64 = 300;

#[derive(Debug, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct StripeEvent {
    #[serde(rename = "type")]
    event_type: String,
    data: StripeEventData,
}

#[derive(Debug, Deserialize)]
struct StripeEventData {
    object: StripeSessionObject,
}

#[derive(Debug, Deserialize)]
struct StripeSessionObject {
    #[serde(default)]
    client_reference_id: Option<String>,
    #[serde(default)]
    customer: Option<String>,
    #[serde(default)]
    subscription: Option<String>,
}

/// POST /api/create-checkout-session
pub async fn create_checkout_handler(
    State(state): State<AppState>,
    user: AuthedUser,
) -> Result<Json<Value>, AppError> {
    let session = create_checkout_session(&state.http, &state.config, user.id).await?;
    Ok(Json(json!({ "sessionId": session.id, "url": session.url })))
}

/// POST /api/webhook
///
/// Events without a user reference are acknowledged and ignored; Stripe's
/// test pings carry no `client_reference_id`.
pub async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Validation("Missing Stripe-Signature header".to_string()))?;

    verify_signature(&state.config.stripe_webhook_secret, signature, &body)?;

    let event: StripeEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("Unreadable webhook payload: {e}")))?;

    if event.event_type == "checkout.session.completed" {
        let object = event.data.object;
        let user_id = object
            .client_reference_id
            .as_deref()
            .and_then(|s| Uuid::parse_str(s).ok());

        match user_id {
            Some(user_id) => {
                subscriptions::activate_pro(
                    &state.db,
                    user_id,
                    object.customer.as_deref().unwrap_or(""),
                    object.subscription.as_deref().unwrap_or(""),
                )
                .await?;
            }
            None => {
                info!("Checkout event without a user reference, ignoring");
                return Ok(Json(
                    json!({ "status": "ignored", "message": "Test event ignored" }),
                ));
            }
        }
    }

    Ok(Json(json!({ "status": "success" })))
}

pub async fn create_checkout_session(
    http: &Client,
    config: &Config,
    user_id: Uuid,
) -> Result<CheckoutSession, AppError> {
    let user_ref = user_id.to_string();
    let success_url = format!(
        "{}/success?session_id={{CHECKOUT_SESSION_ID}}",
        config.frontend_url
    );
    let cancel_url = format!("{}/cancel", config.frontend_url);

    let params = [
        ("mode", "subscription"),
        ("line_items[0][price]", config.stripe_price_id.as_str()),
        ("line_items[0][quantity]", "1"),
        ("success_url", success_url.as_str()),
        ("cancel_url", cancel_url.as_str()),
        ("client_reference_id", user_ref.as_str()),
    ];

    let response = http
        .post(STRIPE_CHECKOUT_URL)
        .basic_auth(&config.stripe_secret_key, None::<&str>)
        .form(&params)
        .send()
        .await
        .map_err(|e| AppError::Billing(format!("checkout request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Billing(format!(
            "checkout session creation returned {status}: {body}"
        )));
    }

    response
        .json::<CheckoutSession>()
        .await
        .map_err(|e| AppError::Billing(format!("unreadable checkout session: {e}")))
}

/// Verifies a `Stripe-Signature` header (`t=<unix>,v1=<hex hmac>`) against
/// the raw request body. The signed message is `"{t}.{body}"`.
pub fn verify_signature(secret: &str, header: &str, payload: &[u8]) -> Result<(), AppError> {
    let bad = |msg: &str| AppError::Validation(format!("Invalid webhook signature: {msg}"));

    let mut timestamp: Option<&str> = None;
    let mut signature_hex: Option<&str> = None;
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = Some(value),
            Some(("v1", value)) => signature_hex = Some(value),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or_else(|| bad("missing timestamp"))?;
    let signature_hex = signature_hex.ok_or_else(|| bad("missing v1 signature"))?;

    let timestamp_secs: i64 = timestamp.parse().map_err(|_| bad("bad timestamp"))?;
    let age = (chrono::Utc::now().timestamp() - timestamp_secs).abs();
    if age > SIGNATURE_TOLERANCE_SECS {
        return Err(bad("timestamp outside tolerance"));
    }

    let signature = hex::decode(signature_hex).map_err(|_| bad("bad hex"))?;

    let mut signed_payload = Vec::with_capacity(timestamp.len() + 1 + payload.len());
    signed_payload.extend_from_slice(timestamp.as_bytes());
    signed_payload.push(b'.');
    signed_payload.extend_from_slice(payload);

    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    hmac::verify(&key, &signed_payload, &signature).map_err(|_| bad("signature mismatch"))
}
