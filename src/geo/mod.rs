//! Tra cứu vị trí một lần qua endpoint IP-geolocation.
//!
//! Desktop không có API định vị portable như trình duyệt, nên toạ độ lấy từ
//! một HTTP endpoint (mặc định ip-api.com, format `{status, lat, lon}`).
//! Mỗi lần mount panel bản đồ gọi đúng một lần, deadline 10 giây, không
//! cache, không retry.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::common::types::Location;

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Các lỗi định vị có thể xảy ra; tập đóng, message hiển thị thẳng cho user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoError {
    #[error("Location permission denied.")]
    Denied,

    #[error("Location information is unavailable.")]
    Unavailable,

    #[error("The request to get user location timed out.")]
    TimedOut,

    #[error("Geolocation is not supported on this platform.")]
    Unsupported,

    #[error("An unknown error occurred.")]
    Unknown,
}

/// Payload của endpoint tra cứu (theo format ip-api.com).
#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

#[derive(Clone)]
pub struct Locator {
    http: Client,
    endpoint: String,
}

impl Locator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Lấy toạ độ hiện tại. Endpoint rỗng nghĩa là geolocation bị tắt.
    pub async fn resolve(&self) -> Result<Location, GeoError> {
        if self.endpoint.trim().is_empty() {
            return Err(GeoError::Unsupported);
        }

        let response = self
            .http
            .get(&self.endpoint)
            .timeout(LOOKUP_TIMEOUT)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
        ) {
            return Err(GeoError::Denied);
        }
        if !status.is_success() {
            return Err(GeoError::Unavailable);
        }

        let payload: LookupResponse = response.json().await.map_err(|err| {
            log::warn!("Malformed geolocation payload: {err}");
            GeoError::Unknown
        })?;

        parse_lookup(payload)
    }
}

fn classify_transport_error(err: reqwest::Error) -> GeoError {
    if err.is_timeout() {
        GeoError::TimedOut
    } else if err.is_connect() {
        GeoError::Unavailable
    } else {
        GeoError::Unknown
    }
}

fn parse_lookup(payload: LookupResponse) -> Result<Location, GeoError> {
    if payload.status.as_deref() == Some("fail") {
        return Err(GeoError::Unavailable);
    }
    match (payload.lat, payload.lon) {
        (Some(latitude), Some(longitude)) => Ok(Location {
            latitude,
            longitude,
        }),
        _ => Err(GeoError::Unavailable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_match_the_user_facing_copy() {
        assert_eq!(GeoError::Denied.to_string(), "Location permission denied.");
        assert_eq!(
            GeoError::Unavailable.to_string(),
            "Location information is unavailable."
        );
        assert_eq!(
            GeoError::TimedOut.to_string(),
            "The request to get user location timed out."
        );
        assert_eq!(
            GeoError::Unsupported.to_string(),
            "Geolocation is not supported on this platform."
        );
        assert_eq!(GeoError::Unknown.to_string(), "An unknown error occurred.");
    }

    #[test]
    fn successful_payload_parses_to_coordinates() {
        let payload: LookupResponse =
            serde_json::from_str(r#"{"status": "success", "lat": 10.76, "lon": 106.66}"#).unwrap();
        let location = parse_lookup(payload).unwrap();
        assert_eq!(location.latitude, 10.76);
        assert_eq!(location.longitude, 106.66);
    }

    #[test]
    fn fail_status_maps_to_unavailable() {
        let payload: LookupResponse =
            serde_json::from_str(r#"{"status": "fail", "message": "private range"}"#).unwrap();
        assert_eq!(parse_lookup(payload), Err(GeoError::Unavailable));
    }

    #[test]
    fn missing_coordinates_map_to_unavailable() {
        let payload: LookupResponse = serde_json::from_str(r#"{"lat": 10.76}"#).unwrap();
        assert_eq!(parse_lookup(payload), Err(GeoError::Unavailable));
    }

    #[tokio::test]
    async fn empty_endpoint_means_unsupported() {
        let locator = Locator::new("");
        assert_eq!(locator.resolve().await, Err(GeoError::Unsupported));
    }

    #[tokio::test]
    async fn refused_connection_maps_to_unavailable() {
        let locator = Locator::new("http://127.0.0.1:9/json");
        assert_eq!(locator.resolve().await, Err(GeoError::Unavailable));
    }
}
