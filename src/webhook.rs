use axum::{Json, body::Bytes, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::{AppState, error::AppError, stripe_signature::StripeSignature};

#[derive(Debug, Deserialize)]
struct Event {
    #[serde(rename = "type")]
    event_type: String,
    data: EventData,
}

#[derive(Debug, Deserialize)]
struct EventData {
    object: Value,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookAck {
    pub received: bool,
}

/// Stripe event receiver. Events are verified and logged; nothing is stored.
pub async fn webhook(
    stripe_signature: StripeSignature,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<WebhookAck>, AppError> {
    let Some(secret) = state.config.stripe_webhook_secret.as_ref() else {
        warn!("STRIPE_WEBHOOK_SECRET not set; rejecting webhook");
        return Err(AppError::Webhook(
            "Webhook signing secret is not configured".to_string(),
        ));
    };

    stripe_signature.verify(&body, secret.as_bytes(), state.config.webhook_tolerance)?;

    let event = serde_json::from_slice::<Event>(&body)
        .map_err(|err| AppError::Webhook(format!("Invalid event payload: {err}")))?;

    match event.event_type.as_str() {
        "customer.subscription.updated" | "customer.subscription.deleted" => {
            let subscription_id = event
                .data
                .object
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or("<unknown>");
            info!("Subscription {} was {}", subscription_id, event.event_type);
        }
        other => info!("Unhandled event type {}", other),
    }

    Ok(Json(WebhookAck { received: true }))
}
