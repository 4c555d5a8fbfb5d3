use std::collections::HashMap;

use axum::extract::{Query, State};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use tracing::info;

use crate::{AppState, get_meta_tags, license_store::LicenseCode};

/// Landing page after checkout. Always 200 so browsers show the message.
///
/// The query is read as a plain map so repeated or unexpected parameters
/// never turn into an extractor rejection.
pub async fn success(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Markup {
    match query.get("session_id").filter(|id| !id.is_empty()) {
        Some(session_id) => {
            let code = state.issuer.issue();
            info!("Issued license code for session {}", session_id);
            success_page(&code)
        }
        None => message_page("No session ID provided"),
    }
}

pub fn success_page(license_code: &LicenseCode) -> Markup {
    layout(html! {
        h1 { "Thank you for your purchase!" }
        p { "Your license code:" }
        p .license-code { code { (license_code.as_str()) } }
        p { "Keep this code somewhere safe. You will need it to activate your subscription." }
    })
}

pub fn message_page(message: &str) -> Markup {
    layout(html! {
        h1 { "Checkout" }
        p { (message) }
    })
}

fn layout(content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                (get_meta_tags())
                style { (PreEscaped(STYLES)) }
            }
            body {
                main { (content) }
            }
        }
    }
}

const STYLES: &str = "\
body { font-family: system-ui, sans-serif; max-width: 40rem; margin: 4rem auto; padding: 0 1rem; } \
.license-code code { font-size: 1.5rem; padding: 0.5rem 1rem; background: #f2f2f2; border-radius: 4px; }";
