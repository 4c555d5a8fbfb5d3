use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::{AppState, json_body::decode_json_body};

#[derive(Debug, Default, Deserialize)]
pub struct ValidateLicenseRequest {
    #[serde(rename = "licenseCode")]
    pub license_code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidateLicenseResponse {
    pub valid: bool,
    pub message: String,
    #[serde(rename = "licenseCode", skip_serializing_if = "Option::is_none")]
    pub license_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidateLicenseResponse {
    fn invalid(message: &str) -> Self {
        Self {
            valid: false,
            message: message.to_string(),
            license_code: None,
            error: None,
        }
    }
}

pub async fn validate_license(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<ValidateLicenseResponse>) {
    let request = match decode_json_body::<ValidateLicenseRequest>(&headers, &body) {
        Ok(request) => request,
        Err(err) => {
            error!("Error validating license code: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ValidateLicenseResponse {
                    error: Some(err.to_string()),
                    ..ValidateLicenseResponse::invalid("Error validating license code")
                }),
            );
        }
    };

    let Some(candidate) = request.license_code.filter(|code| !code.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ValidateLicenseResponse::invalid("License code is required")),
        );
    };

    if state.validator.validate(&candidate) {
        debug!("License code accepted");
        (
            StatusCode::OK,
            Json(ValidateLicenseResponse {
                valid: true,
                message: "License code is valid".to_string(),
                license_code: Some(candidate),
                error: None,
            }),
        )
    } else {
        debug!("License code rejected");
        (
            StatusCode::OK,
            Json(ValidateLicenseResponse::invalid("Invalid license code")),
        )
    }
}
