use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use weather_core::ApiErrorEnvelope;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RelayParams {
    pub query: Option<String>,
}

fn envelope_response(status: StatusCode, kind: &str, info: &str) -> Response {
    (status, Json(ApiErrorEnvelope::proxy(kind, info))).into_response()
}

/// Forward a `query` to the upstream provider with the server-held key and
/// relay the JSON body verbatim, plus a short-lived shared cache directive.
/// Exactly one upstream call per invocation; no retry, no transformation.
pub async fn relay_current(
    State(state): State<AppState>,
    Query(params): Query<RelayParams>,
) -> Response {
    let query = match params.query.as_deref().map(str::trim) {
        Some(query) if !query.is_empty() => query.to_string(),
        _ => {
            return envelope_response(
                StatusCode::BAD_REQUEST,
                "bad_request",
                "Missing \"query\" parameter.",
            );
        }
    };

    let Some(api_key) = state.config.api_key.as_deref() else {
        return envelope_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "server_error",
            "API key not configured on server.",
        );
    };

    debug!(query, "relaying current-conditions request");

    let url = format!("{}/current", state.config.upstream_base_url);
    let upstream = state
        .http
        .get(&url)
        .query(&[("access_key", api_key), ("query", query.as_str())])
        .send()
        .await;

    let body = match upstream {
        Ok(res) => match res.bytes().await {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "failed to read upstream response");
                return envelope_response(
                    StatusCode::BAD_GATEWAY,
                    "proxy_error",
                    "Failed to reach Weatherstack API.",
                );
            }
        },
        Err(err) => {
            warn!(error = %err, "upstream request failed");
            return envelope_response(
                StatusCode::BAD_GATEWAY,
                "proxy_error",
                "Failed to reach Weatherstack API.",
            );
        }
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, header::HeaderValue::from_static("application/json")),
            (header::CACHE_CONTROL, state.cache_control.clone()),
        ],
        body,
    )
        .into_response()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_serialization() {
        let resp = HealthResponse { status: "ok".to_string(), version: "0.1.0".to_string() };
        let json = serde_json::to_string(&resp).expect("response must serialize");
        assert!(json.contains("status"));
        assert!(json.contains("ok"));
    }
}
