//! Docstack HTTP — REST transport adapter.
//!
//! Provides:
//! - JSON:API error objects and the translation of storage errors into them
//! - System endpoints (`/status`) and a JSON:API 404 fallback
//! - Request-ID and tracing middleware

pub mod jsonapi;
pub mod middleware;
pub mod routes;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

/// Builds the HTTP API router.
pub fn router() -> Router {
    Router::new()
        .route("/status", get(routes::system::status))
        .fallback(routes::system::fallback)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(
            middleware::request_id::request_id_middleware,
        ))
}

/// Serve the HTTP router on the given listener with graceful shutdown.
pub async fn serve(
    listener: tokio::net::TcpListener,
    app: Router,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) {
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
    {
        tracing::error!("HTTP server error: {e}");
    }
}
