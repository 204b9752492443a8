//! Header manipulation.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers before forwarding in either direction
//! - Drop headers the HTTP client must derive itself (Host, Content-Length)
//! - Keep the relay's request ID off upstream requests
//!
//! # Design Decisions
//! - Headers named in `Connection` are treated as hop-by-hop too
//! - Everything else passes through untouched

use axum::http::header::{self, HeaderMap, HeaderName};

use crate::http::request::X_REQUEST_ID;

/// Hop-by-hop headers per RFC 9110 §7.6.1.
const HOP_BY_HOP: &[HeaderName] = &[
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Remove hop-by-hop headers, including any listed in `Connection`.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in listed.iter().chain(HOP_BY_HOP) {
        headers.remove(name);
    }
    headers.remove("keep-alive");
}

/// Inbound headers made safe to send to a provider.
pub fn forwardable_request_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = inbound.clone();
    strip_hop_by_hop(&mut headers);
    headers.remove(header::HOST);
    headers.remove(header::CONTENT_LENGTH);
    headers.remove(X_REQUEST_ID);
    headers
}

/// Provider headers made safe to return to the client.
pub fn forwardable_response_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = upstream.clone();
    strip_hop_by_hop(&mut headers);
    headers.remove(header::CONTENT_LENGTH);
    headers
}
