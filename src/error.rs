use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Request-time failures.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error("stripe error: {0}")]
    Stripe(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Webhook(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("request error: {}", self);

        match self {
            AppError::Webhook(message) => {
                (StatusCode::BAD_REQUEST, format!("Webhook Error: {message}")).into_response()
            }
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": other.to_string() })),
            )
                .into_response(),
        }
    }
}
