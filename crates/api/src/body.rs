//! Request body parsing shared by the mutating handlers.
//!
//! Handlers take the raw body as [`Bytes`] instead of axum's `Json`
//! extractor so that malformed or mistyped payloads surface as a
//! `400` in the standard error envelope.

use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

/// Parse a JSON request body into `T`.
///
/// An empty (or whitespace-only) body is treated as `{}` so that endpoints
/// whose fields are all optional accept a bare POST.
pub fn parse_json_body<T: DeserializeOwned>(body: &Bytes) -> AppResult<T> {
    let result = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_str("{}")
    } else {
        serde_json::from_slice(body)
    };

    result.map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))
}
