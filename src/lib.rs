//! License code issuance and validation service.
//!
//! Codes are loaded once from a JSON file into a [`LicenseCodeSet`], then
//! shared read-only by the [`CodeIssuer`] (success page) and the
//! [`CodeValidator`] (`/validate-license`).

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use maud::{Markup, html};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod health;
pub mod issuer;
pub mod json_body;
pub mod license_store;
pub mod stripe_signature;
pub mod success;
pub mod validate_license;
pub mod validate_subscription;
pub mod validator;
pub mod webhook;

pub use config::Config;
pub use issuer::{CodeIssuer, DrawStrategy, UniformDraw};
pub use license_store::{LicenseCode, LicenseCodeSet, StoreError};
pub use validator::CodeValidator;

#[derive(Clone)]
pub struct AppState {
    pub issuer: CodeIssuer,
    pub validator: CodeValidator,
    pub config: Arc<Config>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(codes: LicenseCodeSet, config: Config) -> Self {
        Self {
            issuer: CodeIssuer::new(codes.clone()),
            validator: CodeValidator::new(codes),
            config: Arc::new(config),
            http: reqwest::Client::new(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health))
        .route("/success", get(success::success))
        .route("/validate-license", post(validate_license::validate_license))
        .route(
            "/validate-subscription",
            post(validate_subscription::validate_subscription),
        )
        .route("/webhook", post(webhook::webhook))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
}

pub fn get_meta_tags() -> Markup {
    let title = "License Checker";
    let description = "Your subscription license code.";

    html! {
        title { (title) }
        meta name="description" content=(description);
        meta name="robots" content="noindex";
        meta property="og:type" content="website";
        meta property="og:title" content=(title);
        meta property="og:description" content=(description);
    }
}
