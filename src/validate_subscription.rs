use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{AppState, error::AppError, json_body::decode_json_body};

#[derive(Debug, Default, Deserialize)]
pub struct ValidateSubscriptionRequest {
    #[serde(rename = "subscriptionId")]
    pub subscription_id: Option<String>,
}

/// The subset of a Stripe subscription object this service reads.
#[derive(Debug, Deserialize)]
pub struct StripeSubscription {
    pub status: String,
    pub current_period_end: Option<i64>,
    pub cancel_at_period_end: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSummary {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_period_end: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_at_period_end: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidateSubscriptionResponse {
    pub valid: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<SubscriptionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn validate_subscription(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<ValidateSubscriptionResponse>) {
    let request = match decode_json_body::<ValidateSubscriptionRequest>(&headers, &body) {
        Ok(request) => request,
        Err(err) => return failure(AppError::from(err)),
    };

    let Some(subscription_id) = request.subscription_id.filter(|id| !id.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ValidateSubscriptionResponse {
                valid: false,
                message: "Subscription ID is required".to_string(),
                subscription: None,
                error: None,
            }),
        );
    };

    let subscription = match retrieve_subscription(&state, &subscription_id).await {
        Ok(subscription) => subscription,
        Err(err) => return failure(err),
    };

    info!("Subscription {} has status {}", subscription_id, subscription.status);

    if subscription.status == "active" {
        (
            StatusCode::OK,
            Json(ValidateSubscriptionResponse {
                valid: true,
                message: "Subscription is active".to_string(),
                subscription: Some(SubscriptionSummary {
                    status: subscription.status,
                    current_period_end: subscription.current_period_end,
                    cancel_at_period_end: subscription.cancel_at_period_end,
                }),
                error: None,
            }),
        )
    } else {
        (
            StatusCode::OK,
            Json(ValidateSubscriptionResponse {
                valid: false,
                message: "Subscription is not active".to_string(),
                subscription: Some(SubscriptionSummary {
                    status: subscription.status,
                    current_period_end: None,
                    cancel_at_period_end: None,
                }),
                error: None,
            }),
        )
    }
}

async fn retrieve_subscription(
    state: &AppState,
    subscription_id: &str,
) -> Result<StripeSubscription, AppError> {
    let secret_key = state
        .config
        .stripe_secret_key
        .as_ref()
        .ok_or_else(|| AppError::Config("STRIPE_SECRET_KEY not set".to_string()))?;

    let mut url = reqwest::Url::parse(&state.config.stripe_api_base)
        .map_err(|err| AppError::Config(format!("Invalid STRIPE_API_BASE: {err}")))?;
    url.path_segments_mut()
        .map_err(|_| AppError::Config("Invalid STRIPE_API_BASE".to_string()))?
        .pop_if_empty()
        .extend(["v1", "subscriptions", subscription_id]);

    let response = state
        .http
        .get(url)
        .basic_auth(secret_key, None::<&str>)
        .send()
        .await
        .map_err(|err| AppError::Stripe(err.to_string()))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Stripe(format!("{status}: {body}")));
    }

    response
        .json::<StripeSubscription>()
        .await
        .map_err(|err| AppError::Stripe(err.to_string()))
}

fn failure(err: AppError) -> (StatusCode, Json<ValidateSubscriptionResponse>) {
    error!("Error validating subscription: {}", err);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ValidateSubscriptionResponse {
            valid: false,
            message: "Error validating subscription".to_string(),
            subscription: None,
            error: Some(err.to_string()),
        }),
    )
}
