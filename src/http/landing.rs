//! Landing page served at `/`.

use axum::http::{header, HeaderMap, Uri};
use axum::response::Html;

/// Render the landing page listing this relay's DoH endpoints.
pub fn render(headers: &HeaderMap, uri: &Uri, default_scheme: &str) -> Html<String> {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()))
        .filter(|host| is_plain_host(host))
        .unwrap_or("localhost");

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .filter(|proto| *proto == "https" || *proto == "http")
        .unwrap_or(default_scheme);

    let base = format!("{}://{}", scheme, host);

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>DoH Relay</title>
</head>
<body>
  <h1>DNS-over-HTTPS relay</h1>
  <p>Queries are relayed to public resolvers chosen by weighted random selection, with failover.</p>
  <h2>Endpoints</h2>
  <ul>
    <li>General: <code>{base}/dns-query</code></li>
    <li>Family-safe: <code>{base}/family/dns-query</code></li>
  </ul>
  <p>Send RFC 8484 queries: <code>GET ?dns=&lt;base64url&gt;</code> or <code>POST</code> with <code>application/dns-message</code>.</p>
</body>
</html>
"#
    ))
}

/// Hostname, IPv4 or bracketed IPv6 literal with an optional port.
fn is_plain_host(host: &str) -> bool {
    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | ':' | '[' | ']'))
}
