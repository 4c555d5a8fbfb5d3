use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{extract::FromRequestParts, http::request::Parts};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::AppError;

/// Parsed `Stripe-Signature` header: `t=<unix seconds>,v1=<hex>[,v1=<hex>...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripeSignature {
    pub timestamp: u64,
    pub v1: Vec<String>,
}

impl StripeSignature {
    pub fn parse(header: &str) -> Result<Self, AppError> {
        let mut timestamp = None;
        let mut v1 = Vec::new();

        for entry in header.split(',') {
            let mut kv = entry.trim().splitn(2, '=');
            match (kv.next(), kv.next()) {
                (Some("t"), Some(val)) => {
                    timestamp = Some(
                        val.parse::<u64>()
                            .map_err(|_| AppError::Webhook("Invalid timestamp".to_string()))?,
                    );
                }
                (Some("v1"), Some(val)) => v1.push(val.to_string()),
                _ => {}
            }
        }

        match timestamp {
            Some(timestamp) if !v1.is_empty() => Ok(Self { timestamp, v1 }),
            _ => Err(AppError::Webhook(
                "Missing required fields in Stripe-Signature".to_string(),
            )),
        }
    }

    pub fn verify(&self, payload: &[u8], key: &[u8], tolerance: Duration) -> Result<(), AppError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        self.verify_at(payload, key, tolerance, now)
    }

    pub fn verify_at(
        &self,
        payload: &[u8],
        key: &[u8],
        tolerance: Duration,
        now: u64,
    ) -> Result<(), AppError> {
        if now.abs_diff(self.timestamp) > tolerance.as_secs() {
            return Err(AppError::Webhook(
                "Timestamp outside the tolerance zone".to_string(),
            ));
        }

        if self.is_valid(payload, key) {
            Ok(())
        } else {
            Err(AppError::Webhook(
                "No signatures found matching the expected signature for payload".to_string(),
            ))
        }
    }

    pub fn is_valid(&self, payload: &[u8], key: &[u8]) -> bool {
        let expected_hex = expected_signature(self.timestamp, payload, key);

        self.v1
            .iter()
            .any(|candidate| bool::from(expected_hex.as_bytes().ct_eq(candidate.as_bytes())))
    }
}

/// Hex-encoded HMAC-SHA256 of `"{timestamp}.{payload}"`.
pub fn expected_signature(timestamp: u64, payload: &[u8], key: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC can take a key of any size");

    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);

    hex::encode(mac.finalize().into_bytes())
}

impl<S> FromRequestParts<S> for StripeSignature
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let sig_header = parts
            .headers
            .get("Stripe-Signature")
            .ok_or_else(|| AppError::Webhook("Missing Stripe-Signature header".to_string()))?
            .to_str()
            .map_err(|_| AppError::Webhook("Invalid header encoding".to_string()))?;

        Self::parse(sig_header)
    }
}
