//! Inbound DoH request as seen by the relay.

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue, Method};

use crate::security::headers::forwardable_request_headers;
use crate::upstream::{Provider, UpstreamRequest};

/// DNS wire-format media type (RFC 8484).
pub const DNS_MESSAGE: &str = "application/dns-message";

/// A validated GET or POST DoH request with its body buffered once.
#[derive(Debug, Clone)]
pub struct RelayRequest {
    pub method: Method,
    /// Raw query string without the leading `?`.
    pub query: Option<String>,
    pub headers: HeaderMap,
    /// Present only for POST; shared by every attempt.
    pub body: Option<Bytes>,
}

impl RelayRequest {
    pub fn new(method: Method, query: Option<String>, headers: HeaderMap, body: Option<Bytes>) -> Self {
        Self {
            method,
            query,
            headers,
            body,
        }
    }

    /// Provider URL with the original query string appended verbatim.
    pub fn target_url(&self, provider: &Provider) -> String {
        match self.query.as_deref() {
            Some(query) if !query.is_empty() => format!("{}?{}", provider.url, query),
            _ => provider.url.to_string(),
        }
    }

    /// Build the request sent to `provider`.
    pub fn to_upstream(&self, provider: &Provider, user_agent: &HeaderValue) -> UpstreamRequest {
        let mut headers = forwardable_request_headers(&self.headers);
        headers.insert(header::USER_AGENT, user_agent.clone());

        let body = if self.method == Method::POST {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(DNS_MESSAGE));
            Some(self.body.clone().unwrap_or_default())
        } else {
            headers.insert(header::ACCEPT, HeaderValue::from_static(DNS_MESSAGE));
            None
        };

        UpstreamRequest {
            method: self.method.clone(),
            url: self.target_url(provider),
            headers,
            body,
        }
    }
}
