//! Upstream HTTP client.
//!
//! # Responsibilities
//! - Send one prepared request to one provider
//! - Follow redirects, enforce connect timeout, pool connections
//! - Hand back status, headers and the buffered body
//!
//! # Design Decisions
//! - The relay only sees the `UpstreamClient` trait so tests can script providers
//! - Deadlines per attempt live in the executor, not here
//! - Status codes are returned as-is; judging success is the caller's job

use std::future::Future;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode};
use reqwest::redirect::Policy;

use crate::config::UpstreamConfig;
use crate::upstream::error::UpstreamError;

/// A fully prepared request for one provider.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

/// A provider's answer with the body buffered.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Transport used to reach providers.
pub trait UpstreamClient: Send + Sync + 'static {
    fn send(
        &self,
        request: UpstreamRequest,
    ) -> impl Future<Output = Result<UpstreamResponse, UpstreamError>> + Send;
}

/// HTTPS client backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpsClient {
    inner: reqwest::Client,
}

impl HttpsClient {
    /// Build a client from upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .redirect(Policy::limited(config.max_redirects))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .pool_idle_timeout(Duration::from_secs(config.pool_idle_timeout_secs))
            .pool_max_idle_per_host(8)
            .tcp_keepalive(Duration::from_secs(60));

        if !config.system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            inner: builder.build()?,
        })
    }
}

impl UpstreamClient for HttpsClient {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, UpstreamError> {
        let mut builder = self
            .inner
            .request(request.method, &request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}
