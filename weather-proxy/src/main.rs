//! Weather proxy server entry point.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_proxy::{AppState, ProxyConfig, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_proxy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ProxyConfig::from_env()?;

    if config.api_key.is_none() {
        warn!(
            "WEATHERSTACK_API_KEY is not set; every request will be answered \
             with a server_error envelope"
        );
    }

    info!(
        addr = %config.bind_addr,
        upstream = %config.upstream_base_url,
        "weather proxy v{} starting",
        env!("CARGO_PKG_VERSION"),
    );

    let addr = config.bind_addr;
    let state = AppState::new(config)?;
    let router = create_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    axum::serve(listener, router).await.context("HTTP server failed")?;

    Ok(())
}
