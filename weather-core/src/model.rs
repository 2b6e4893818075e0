use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Successful current-conditions response from the weather provider.
///
/// The provider is trusted: fields are mapped as-is and unknown fields are
/// ignored. A payload is immutable once received and fully replaced on each
/// new fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherPayload {
    pub location: Location,
    pub current: CurrentConditions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub region: String,
    /// Local wall-clock time as reported upstream, e.g. "2025-08-25 14:30".
    pub localtime: String,
    pub utc_offset: String,
}

impl Location {
    /// Parse the upstream `localtime` string, if it is well-formed.
    pub fn local_time(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.localtime, "%Y-%m-%d %H:%M").ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub weather_descriptions: Vec<String>,
    pub weather_icons: Vec<String>,
    pub weather_code: i32,
    pub wind_speed: f64,
    pub wind_dir: String,
    pub humidity: u8,
    pub feelslike: f64,
    pub uv_index: u8,
    pub visibility: f64,
    pub pressure: f64,
    pub cloudcover: u8,
    /// Upstream encodes the day flag as "yes"/"no".
    pub is_day: String,
}

impl CurrentConditions {
    /// First weather description, or an empty string if the provider sent none.
    pub fn primary_description(&self) -> &str {
        self.weather_descriptions.first().map_or("", String::as_str)
    }

    pub fn is_day(&self) -> bool {
        self.is_day.eq_ignore_ascii_case("yes")
    }
}

/// Error envelope from the provider (and from the proxy). Mutually exclusive
/// with [`WeatherPayload`]: a response body is one or the other, never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorEnvelope {
    pub success: bool,
    pub error: ApiError,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: i32,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl ApiErrorEnvelope {
    /// Build the envelope shape the proxy emits for its own failures.
    pub fn proxy(kind: &str, info: &str) -> Self {
        Self {
            success: false,
            error: ApiError { code: 0, kind: kind.to_string(), info: Some(info.to_string()) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload_json() -> &'static str {
        r#"{
            "location": {
                "name": "Paris",
                "country": "France",
                "region": "Ile-de-France",
                "localtime": "2025-08-25 14:30",
                "utc_offset": "2.0"
            },
            "current": {
                "temperature": 22,
                "weather_descriptions": ["Partly cloudy"],
                "weather_icons": ["https://example.com/icon.png"],
                "weather_code": 116,
                "wind_speed": 11,
                "wind_dir": "NW",
                "humidity": 60,
                "feelslike": 24,
                "uv_index": 5,
                "visibility": 10,
                "pressure": 1015,
                "cloudcover": 50,
                "is_day": "yes"
            }
        }"#
    }

    #[test]
    fn payload_deserializes() {
        let payload: WeatherPayload =
            serde_json::from_str(sample_payload_json()).expect("payload must parse");

        assert_eq!(payload.location.name, "Paris");
        assert_eq!(payload.current.primary_description(), "Partly cloudy");
        assert!(payload.current.is_day());
        assert_eq!(payload.current.humidity, 60);
    }

    #[test]
    fn local_time_parses_upstream_format() {
        let payload: WeatherPayload =
            serde_json::from_str(sample_payload_json()).expect("payload must parse");

        let dt = payload.location.local_time().expect("localtime must parse");
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2025-08-25 14:30");
    }

    #[test]
    fn local_time_is_none_for_garbage() {
        let loc = Location {
            name: String::new(),
            country: String::new(),
            region: String::new(),
            localtime: "not a time".to_string(),
            utc_offset: "0.0".to_string(),
        };
        assert!(loc.local_time().is_none());
    }

    #[test]
    fn envelope_roundtrips_type_field() {
        let envelope = ApiErrorEnvelope::proxy("bad_request", "Missing \"query\" parameter.");
        let json = serde_json::to_string(&envelope).expect("envelope must serialize");
        assert!(json.contains("\"type\":\"bad_request\""));

        let back: ApiErrorEnvelope = serde_json::from_str(&json).expect("envelope must parse");
        assert!(!back.success);
        assert_eq!(back.error.code, 0);
        assert_eq!(back.error.kind, "bad_request");
    }

    #[test]
    fn envelope_info_is_optional() {
        let json = r#"{"success": false, "error": {"code": 603, "type": "historical_queries_not_supported_on_plan"}}"#;
        let envelope: ApiErrorEnvelope = serde_json::from_str(json).expect("envelope must parse");
        assert_eq!(envelope.error.code, 603);
        assert!(envelope.error.info.is_none());
    }
}
