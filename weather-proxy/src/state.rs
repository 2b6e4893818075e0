//! Application state shared across handlers.

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::sync::Arc;

use crate::config::ProxyConfig;

/// Shared, stateless-per-request server state: one HTTP client, the config,
/// and the precomputed cache directive.
#[derive(Debug, Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub config: Arc<ProxyConfig>,
    pub cache_control: HeaderValue,
}

impl AppState {
    pub fn new(config: ProxyConfig) -> Result<Self> {
        let cache_control = HeaderValue::from_str(&config.cache_control_value())
            .context("Invalid cache-control value")?;

        Ok(Self { http: reqwest::Client::new(), config: Arc::new(config), cache_control })
    }
}
