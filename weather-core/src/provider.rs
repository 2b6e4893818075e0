use crate::{
    config::{Config, EndpointMode},
    model::{ApiError, ApiErrorEnvelope, WeatherPayload},
};
use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use thiserror::Error;
use tracing::debug;

/// Upstream error code for "location not found".
const CODE_NOT_FOUND: i32 = 615;
/// Upstream error code for a missing or invalid access key.
const CODE_INVALID_KEY: i32 = 101;

const GENERIC_API_MESSAGE: &str = "The weather service reported an error. Please try again.";

/// Outcome of a single fetch that did not succeed.
///
/// `Display` is the user-facing message; transport details are carried for
/// logging only and never shown to the user.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Location not found. Please check the city name and try again.")]
    LocationNotFound,

    #[error("Invalid API key configured. Please check your access credentials.")]
    InvalidApiKey,

    /// Any other upstream error code: `error.info` verbatim, or a generic
    /// fallback when the provider sent none.
    #[error("{0}")]
    Api(String),

    /// The request itself could not be completed.
    #[error("Unable to reach the weather service. Please try again.")]
    Transport(String),
}

impl FetchError {
    fn from_api_error(error: &ApiError) -> Self {
        match error.code {
            CODE_NOT_FOUND => FetchError::LocationNotFound,
            CODE_INVALID_KEY => FetchError::InvalidApiKey,
            _ => FetchError::Api(
                error.info.clone().unwrap_or_else(|| GENERIC_API_MESSAGE.to_string()),
            ),
        }
    }
}

/// Classify a raw response body into exactly one of: payload, typed API
/// error, or transport failure (unparseable body).
pub fn classify_body(body: &str) -> Result<WeatherPayload, FetchError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| FetchError::Transport(format!("unparseable response body: {e}")))?;

    if value.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
        let envelope: ApiErrorEnvelope = serde_json::from_value(value)
            .map_err(|e| FetchError::Transport(format!("malformed error envelope: {e}")))?;
        return Err(FetchError::from_api_error(&envelope.error));
    }

    serde_json::from_value(value)
        .map_err(|e| FetchError::Transport(format!("malformed weather payload: {e}")))
}

/// A source of current-conditions data.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current(&self, query: &str) -> Result<WeatherPayload, FetchError>;
}

/// Where requests go, resolved once from config at startup.
#[derive(Debug, Clone)]
pub enum Endpoint {
    /// Call the upstream API directly with a client-held key.
    Direct { base_url: String, api_key: String },
    /// Call the relay endpoint; the key stays server-side.
    Proxy { url: String },
}

#[derive(Debug, Clone)]
pub struct WeatherstackClient {
    endpoint: Endpoint,
    http: Client,
}

impl WeatherstackClient {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint, http: Client::new() }
    }
}

#[async_trait]
impl WeatherSource for WeatherstackClient {
    async fn current(&self, query: &str) -> Result<WeatherPayload, FetchError> {
        let request = match &self.endpoint {
            Endpoint::Direct { base_url, api_key } => {
                debug!(query, "fetching current conditions directly");
                self.http
                    .get(format!("{base_url}/current"))
                    .query(&[("access_key", api_key.as_str()), ("query", query)])
            }
            Endpoint::Proxy { url } => {
                debug!(query, "fetching current conditions through proxy");
                self.http.get(url).query(&[("query", query)])
            }
        };

        let res = request.send().await.map_err(|e| FetchError::Transport(e.to_string()))?;

        // The proxy answers its own failures with the same JSON envelope the
        // upstream uses, so the body is classified regardless of HTTP status.
        let body = res.text().await.map_err(|e| FetchError::Transport(e.to_string()))?;

        classify_body(&body)
    }
}

/// Construct a client from config, honoring the resolved endpoint mode.
pub fn client_from_config(config: &Config) -> anyhow::Result<WeatherstackClient> {
    let endpoint = match config.endpoint_mode()? {
        EndpointMode::Direct => {
            let direct = config.direct.as_ref().ok_or_else(|| {
                anyhow::anyhow!(
                    "Endpoint mode is 'direct' but no API key is configured.\n\
                     Hint: run `weather configure` and enter your API key."
                )
            })?;
            Endpoint::Direct {
                base_url: direct.base_url.clone(),
                api_key: direct.api_key.clone(),
            }
        }
        EndpointMode::Proxy => {
            let proxy = config.proxy.as_ref().ok_or_else(|| {
                anyhow::anyhow!(
                    "Endpoint mode is 'proxy' but no proxy URL is configured.\n\
                     Hint: run `weather configure` and enter the proxy endpoint URL."
                )
            })?;
            Endpoint::Proxy { url: proxy.url.clone() }
        }
    };

    Ok(WeatherstackClient::new(endpoint))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DirectConfig, ProxyClientConfig};

    fn api_error_body(code: i32, info: Option<&str>) -> String {
        match info {
            Some(info) => format!(
                r#"{{"success": false, "error": {{"code": {code}, "type": "some_type", "info": "{info}"}}}}"#
            ),
            None => {
                format!(r#"{{"success": false, "error": {{"code": {code}, "type": "some_type"}}}}"#)
            }
        }
    }

    #[test]
    fn classify_not_found_ignores_info() {
        let err = classify_body(&api_error_body(615, Some("whatever upstream says")))
            .expect_err("615 must classify as an error");

        assert!(matches!(err, FetchError::LocationNotFound));
        assert_eq!(
            err.to_string(),
            "Location not found. Please check the city name and try again."
        );
    }

    #[test]
    fn classify_invalid_key_ignores_info() {
        let err = classify_body(&api_error_body(101, Some("You have not supplied an access key.")))
            .expect_err("101 must classify as an error");

        assert!(matches!(err, FetchError::InvalidApiKey));
        assert_eq!(
            err.to_string(),
            "Invalid API key configured. Please check your access credentials."
        );
    }

    #[test]
    fn classify_other_code_surfaces_info_verbatim() {
        let err = classify_body(&api_error_body(104, Some("Usage limit reached.")))
            .expect_err("104 must classify as an error");

        assert_eq!(err.to_string(), "Usage limit reached.");
    }

    #[test]
    fn classify_other_code_without_info_uses_fallback() {
        let err =
            classify_body(&api_error_body(104, None)).expect_err("104 must classify as an error");

        assert_eq!(err.to_string(), GENERIC_API_MESSAGE);
    }

    #[test]
    fn classify_success_payload() {
        let body = r#"{
            "location": {"name": "Paris", "country": "France", "region": "Ile-de-France",
                         "localtime": "2025-08-25 14:30", "utc_offset": "2.0"},
            "current": {"temperature": 22, "weather_descriptions": ["Sunny"],
                        "weather_icons": [], "weather_code": 113, "wind_speed": 7,
                        "wind_dir": "N", "humidity": 45, "feelslike": 23, "uv_index": 6,
                        "visibility": 10, "pressure": 1016, "cloudcover": 0, "is_day": "yes"}
        }"#;

        let payload = classify_body(body).expect("payload must classify as success");
        assert_eq!(payload.location.name, "Paris");
        assert_eq!(payload.current.uv_index, 6);
    }

    #[test]
    fn classify_non_json_is_transport() {
        let err = classify_body("<html>504 Gateway Timeout</html>")
            .expect_err("non-JSON must classify as an error");

        assert!(matches!(err, FetchError::Transport(_)));
        assert_eq!(err.to_string(), "Unable to reach the weather service. Please try again.");
    }

    #[test]
    fn client_from_config_errors_without_direct_section() {
        let cfg = Config { mode: Some("direct".to_string()), ..Config::default() };
        let err = client_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("no API key is configured"));
    }

    #[test]
    fn client_from_config_errors_without_proxy_section() {
        let cfg = Config { mode: Some("proxy".to_string()), ..Config::default() };
        let err = client_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("no proxy URL is configured"));
    }

    #[test]
    fn client_from_config_builds_for_both_modes() {
        let direct = Config {
            direct: Some(DirectConfig {
                api_key: "KEY".to_string(),
                base_url: "http://api.weatherstack.com".to_string(),
            }),
            ..Config::default()
        };
        assert!(client_from_config(&direct).is_ok());

        let proxy = Config {
            proxy: Some(ProxyClientConfig { url: "http://localhost:8787/api/weather".into() }),
            ..Config::default()
        };
        assert!(client_from_config(&proxy).is_ok());
    }
}
