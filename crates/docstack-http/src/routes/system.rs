//! Status endpoint and the catch-all fallback.

use axum::Json;
use axum::http::Uri;
use serde::Serialize;

use crate::jsonapi;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: &'static str,
}

/// Liveness probe.
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse { message: "OK" })
}

/// Answers any unrouted request with a JSON:API 404.
pub async fn fallback(uri: Uri) -> jsonapi::Error {
    jsonapi::Error::not_found(format!("no route matches {}", uri.path()))
}
