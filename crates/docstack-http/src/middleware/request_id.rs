//! Request ID middleware: every request is tagged with an `X-Request-Id`.

use axum::extract::Request;
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Returns the caller-supplied ID, or a fresh UUID v4.
fn incoming_or_new(headers: &HeaderMap) -> HeaderValue {
    headers
        .get(&X_REQUEST_ID)
        .filter(|v| v.to_str().is_ok_and(|s| !s.is_empty()))
        .cloned()
        .unwrap_or_else(|| {
            HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
        })
}

/// Propagates or generates the request ID.
///
/// The ID is written back into the request headers, echoed on the
/// response (including JSON:API error responses), and recorded on a
/// `request` span so every log line of the request carries it.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let request_id = incoming_or_new(req.headers());
    req.headers_mut()
        .insert(X_REQUEST_ID.clone(), request_id.clone());

    let span = tracing::info_span!(
        "request",
        request_id = request_id.to_str().unwrap_or_default(),
        method = %req.method(),
        path = req.uri().path(),
    );
    let mut response = next.run(req).instrument(span).await;

    response
        .headers_mut()
        .insert(X_REQUEST_ID.clone(), request_id);
    response
}
