//! Docstack Server entry point.

use tracing_subscriber::EnvFilter;

use docstack_server::config::{Config, LogFormat};

#[tokio::main]
async fn main() {
    let config = Config::parse();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(env_filter).init(),
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Docstack Server starting");

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");

    tracing::info!(%addr, "Docstack Server ready");

    docstack_http::serve(listener, docstack_server::router(), shutdown_signal()).await;

    tracing::info!("Docstack Server shut down");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install signal handler");
    tracing::info!("Shutdown signal received");
}
