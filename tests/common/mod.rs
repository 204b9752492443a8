//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use tokio::net::TcpListener;

use doh_relay::config::{ProviderConfig, RelayConfig};
use doh_relay::{HttpServer, Shutdown};

/// One request observed by a mock provider.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: Method,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// A mock DoH provider listening on localhost.
pub struct MockProvider {
    pub addr: SocketAddr,
    pub seen: Arc<Mutex<Vec<Seen>>>,
}

impl MockProvider {
    pub fn url(&self) -> String {
        format!("http://{}/dns-query", self.addr)
    }

    pub fn requests(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

/// Start a mock provider answering every request with `status` and `answer`.
pub async fn start_provider(status: u16, answer: &'static [u8]) -> MockProvider {
    start_provider_with_delay(status, answer, Duration::ZERO).await
}

/// Start a mock provider that waits `delay` before answering.
pub async fn start_provider_with_delay(
    status: u16,
    answer: &'static [u8],
    delay: Duration,
) -> MockProvider {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();

    let app = Router::new().route(
        "/dns-query",
        any(move |request: Request<Body>| {
            let log = log.clone();
            async move {
                let (parts, body) = request.into_parts();
                let body = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
                log.lock().unwrap().push(Seen {
                    method: parts.method,
                    query: parts.uri.query().map(str::to_owned),
                    headers: parts.headers,
                    body,
                });

                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                provider_response(status, answer)
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockProvider { addr, seen }
}

fn provider_response(status: u16, answer: &'static [u8]) -> Response {
    let mut response = (StatusCode::from_u16(status).unwrap(), Bytes::from_static(answer)).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/dns-message"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("https://provider.example"),
    );
    response
}

/// A localhost URL nothing listens on.
pub async fn dead_provider_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/dns-query", addr)
}

pub fn provider(name: &str, url: &str, weight: u32) -> ProviderConfig {
    ProviderConfig {
        name: name.into(),
        url: url.into(),
        weight,
    }
}

/// Config pointing both pools at local providers.
pub fn relay_config(general: Vec<ProviderConfig>, family: Vec<ProviderConfig>) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.require_https = false;
    config.upstream.system_proxy = false;
    config.upstream.attempt_timeout_ms = 500;
    config.upstream.connect_timeout_ms = 500;
    config.pools.general = general;
    config.pools.family = family;
    config
}

/// Start the relay on an ephemeral port.
pub async fn start_relay(config: RelayConfig) -> (SocketAddr, Shutdown) {
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Client that never goes through an environment proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
