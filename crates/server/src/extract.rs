use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::errors::JsonApiError;

/// JSON body extractor that ignores `Content-Type` and reads a missing or
/// blank body as `{}`. Only bytes that fail to parse are rejected (400).
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid request body", Some(e.body_text())))?;
        parse_body(&bytes).map(JsonBody)
    }
}

fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, JsonApiError> {
    let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) { b"{}" } else { bytes };
    serde_json::from_slice(raw)
        .map_err(|e| JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid JSON body", Some(e.to_string())))
}
