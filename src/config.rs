use std::{env, time::Duration};

use crate::error::AppError;

const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";
const DEFAULT_WEBHOOK_TOLERANCE_SECS: u64 = 300;

/// Billing provider settings, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub stripe_secret_key: Option<String>,
    pub stripe_webhook_secret: Option<String>,
    pub stripe_api_base: String,
    pub webhook_tolerance: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let webhook_tolerance = match env::var("STRIPE_WEBHOOK_TOLERANCE_SECS") {
            Ok(value) => value.parse::<u64>().map_err(|_| {
                AppError::Config("Invalid integer for STRIPE_WEBHOOK_TOLERANCE_SECS".to_string())
            })?,
            Err(_) => DEFAULT_WEBHOOK_TOLERANCE_SECS,
        };

        Ok(Self {
            stripe_secret_key: non_empty_var("STRIPE_SECRET_KEY"),
            stripe_webhook_secret: non_empty_var("STRIPE_WEBHOOK_SECRET"),
            stripe_api_base: non_empty_var("STRIPE_API_BASE")
                .unwrap_or_else(|| DEFAULT_STRIPE_API_BASE.to_string()),
            webhook_tolerance: Duration::from_secs(webhook_tolerance),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stripe_secret_key: None,
            stripe_webhook_secret: None,
            stripe_api_base: DEFAULT_STRIPE_API_BASE.to_string(),
            webhook_tolerance: Duration::from_secs(DEFAULT_WEBHOOK_TOLERANCE_SECS),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}
