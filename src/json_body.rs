use axum::http::{HeaderMap, header::CONTENT_TYPE};
use serde::de::DeserializeOwned;

/// Decodes a JSON request body the lenient way browsers' form posts expect.
///
/// A body without a JSON content type, or with nothing but whitespace in it,
/// decodes as `T::default()` so handlers see every field as absent. Only a
/// JSON body that is present and malformed is an error.
pub fn decode_json_body<T>(headers: &HeaderMap, body: &[u8]) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    if !is_json_content_type(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body)
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
