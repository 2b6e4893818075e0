use anyhow::{Context, Result};
use std::{env, net::SocketAddr};

/// Server configuration, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Listen address (`WEATHER_PROXY_BIND`).
    pub bind_addr: SocketAddr,

    /// Server-held upstream credential (`WEATHERSTACK_API_KEY`). Absence is
    /// a configuration error surfaced per request as a `server_error`
    /// envelope, never a panic in the request path.
    pub api_key: Option<String>,

    /// Upstream base URL (`WEATHERSTACK_BASE_URL`), overridable for tests.
    pub upstream_base_url: String,

    /// Shared-cache freshness window in seconds.
    pub cache_max_age_secs: u32,

    /// Stale-while-revalidate window in seconds.
    pub cache_stale_while_revalidate_secs: u32,
}

pub const DEFAULT_BIND: &str = "127.0.0.1:8787";
pub const DEFAULT_UPSTREAM: &str = "http://api.weatherstack.com";

impl ProxyConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = env::var("WEATHER_PROXY_BIND")
            .unwrap_or_else(|_| DEFAULT_BIND.to_string())
            .parse()
            .context("Invalid WEATHER_PROXY_BIND address")?;

        let api_key =
            env::var("WEATHERSTACK_API_KEY").ok().filter(|key| !key.trim().is_empty());

        let upstream_base_url =
            env::var("WEATHERSTACK_BASE_URL").unwrap_or_else(|_| DEFAULT_UPSTREAM.to_string());

        Ok(Self {
            bind_addr,
            api_key,
            upstream_base_url,
            cache_max_age_secs: 300,
            cache_stale_while_revalidate_secs: 600,
        })
    }

    /// The one caching policy in the system: keep identical queries fresh for
    /// a few minutes and serve stale for a longer window while revalidating.
    pub fn cache_control_value(&self) -> String {
        format!(
            "public, s-maxage={}, stale-while-revalidate={}",
            self.cache_max_age_secs, self.cache_stale_while_revalidate_secs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_control_renders_both_windows() {
        let config = ProxyConfig {
            bind_addr: "127.0.0.1:0".parse().expect("addr must parse"),
            api_key: None,
            upstream_base_url: DEFAULT_UPSTREAM.to_string(),
            cache_max_age_secs: 300,
            cache_stale_while_revalidate_secs: 600,
        };

        assert_eq!(
            config.cache_control_value(),
            "public, s-maxage=300, stale-while-revalidate=600"
        );
    }
}
