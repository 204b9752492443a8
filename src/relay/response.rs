//! Outbound response shaping.
//!
//! # Responsibilities
//! - Carry the provider's status, headers and body back to the client
//! - Force the CORS and cache overlay regardless of what the provider sent
//! - Produce the single terminal failure response of the relay path

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::security::headers::forwardable_response_headers;
use crate::upstream::UpstreamResponse;

/// Body of the 503 returned once every provider has failed.
pub const ALL_PROVIDERS_FAILED: &str = "All DNS providers failed";

/// Response handed back to the HTTP layer.
#[derive(Debug, Clone)]
pub struct RelayResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RelayResponse {
    /// Wrap a usable provider response and apply the header overlay.
    pub fn shaped(upstream: UpstreamResponse, cache_control: &HeaderValue) -> Self {
        let mut headers = forwardable_response_headers(&upstream.headers);
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        headers.insert(header::CACHE_CONTROL, cache_control.clone());

        Self {
            status: upstream.status,
            headers,
            body: upstream.body,
        }
    }

    /// Terminal failure: every candidate was exhausted.
    pub fn exhausted() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );

        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            headers,
            body: Bytes::from_static(ALL_PROVIDERS_FAILED.as_bytes()),
        }
    }
}

/// `Cache-Control` value advertised on relayed responses.
pub fn cache_control(max_age_secs: u32) -> HeaderValue {
    HeaderValue::from_str(&format!("public, max-age={}", max_age_secs))
        .unwrap_or_else(|_| HeaderValue::from_static("public, max-age=300"))
}

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_replaces_conflicting_values() {
        let mut upstream_headers = HeaderMap::new();
        upstream_headers.append(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("https://evil.example"));
        upstream_headers.append(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        upstream_headers.append(header::CACHE_CONTROL, HeaderValue::from_static("private"));
        upstream_headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/dns-message"));
        upstream_headers.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));

        let shaped = RelayResponse::shaped(
            UpstreamResponse {
                status: StatusCode::OK,
                headers: upstream_headers,
                body: Bytes::from_static(b"\x00\x01"),
            },
            &cache_control(300),
        );

        let origins: Vec<_> = shaped.headers.get_all(header::ACCESS_CONTROL_ALLOW_ORIGIN).iter().collect();
        let caches: Vec<_> = shaped.headers.get_all(header::CACHE_CONTROL).iter().collect();
        assert_eq!(origins, vec!["*"]);
        assert_eq!(caches, vec!["public, max-age=300"]);
        assert_eq!(shaped.headers[header::CONTENT_TYPE], "application/dns-message");
        assert!(!shaped.headers.contains_key(header::TRANSFER_ENCODING));
        assert_eq!(shaped.body, Bytes::from_static(b"\x00\x01"));
    }

    #[test]
    fn test_exhausted_shape() {
        let response = RelayResponse::exhausted();
        assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.body, ALL_PROVIDERS_FAILED.as_bytes());
    }
}
