//! Relay execution and failover.
//!
//! # Responsibilities
//! - Pick a provider with the weighted selector
//! - Send one attempt to it under a per-attempt deadline
//! - On transport failure, timeout or non-2xx, sweep the remaining
//!   providers in list order until one answers with success
//! - Shape the usable response or return the terminal 503
//!
//! # Design Decisions
//! - Attempts are strictly sequential: one upstream call in flight per request
//! - The sweep is deterministic; no re-weighting after the first pick
//! - A provider is tried at most once per request
//! - Individual failures are logged, never surfaced to the client

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::InvalidHeaderValue;
use axum::http::HeaderValue;

use crate::config::{ResponseConfig, UpstreamConfig};
use crate::relay::request::RelayRequest;
use crate::relay::response::{cache_control, RelayResponse};
use crate::resilience::timeouts::with_deadline;
use crate::upstream::{
    Provider, ProviderList, RandomSource, ThreadRandom, UpstreamClient, UpstreamError,
    UpstreamResponse, WeightedSelector,
};

/// Per-attempt behaviour shared by every request of a pool.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    /// Fixed identifying User-Agent.
    pub user_agent: HeaderValue,
    /// Deadline for each upstream attempt.
    pub attempt_timeout: Duration,
    /// Forced `Cache-Control` on relayed responses.
    pub cache_control: HeaderValue,
}

impl RelaySettings {
    pub fn from_config(
        upstream: &UpstreamConfig,
        response: &ResponseConfig,
    ) -> Result<Self, InvalidHeaderValue> {
        Ok(Self {
            user_agent: HeaderValue::from_str(&upstream.user_agent)?,
            attempt_timeout: Duration::from_millis(upstream.attempt_timeout_ms),
            cache_control: cache_control(response.cache_max_age_secs),
        })
    }
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            user_agent: HeaderValue::from_static("NeonGhost/2026"),
            attempt_timeout: Duration::from_secs(5),
            cache_control: cache_control(300),
        }
    }
}

/// Relays DoH requests over one provider pool.
pub struct RelayExecutor<C, R = ThreadRandom> {
    pool: String,
    providers: ProviderList,
    client: Arc<C>,
    selector: WeightedSelector<R>,
    settings: RelaySettings,
}

impl<C: UpstreamClient, R: RandomSource> RelayExecutor<C, R> {
    pub fn new(
        pool: impl Into<String>,
        providers: ProviderList,
        client: Arc<C>,
        selector: WeightedSelector<R>,
        settings: RelaySettings,
    ) -> Self {
        Self {
            pool: pool.into(),
            providers,
            client,
            selector,
            settings,
        }
    }

    /// Pool name used in logs.
    pub fn pool(&self) -> &str {
        &self.pool
    }

    pub fn providers(&self) -> &ProviderList {
        &self.providers
    }

    /// Entry point: weighted pick, then relay with failover.
    pub async fn handle(&self, request: &RelayRequest) -> RelayResponse {
        let chosen = self.selector.select(&self.providers);
        self.relay(request, chosen).await
    }

    /// Relay through `chosen`, falling back to the sweep on failure.
    pub async fn relay(&self, request: &RelayRequest, chosen: &Provider) -> RelayResponse {
        tracing::debug!(
            pool = %self.pool,
            provider = %chosen.name,
            method = %request.method,
            "Relaying DoH query"
        );

        match self.attempt(request, chosen).await {
            Ok(upstream) => RelayResponse::shaped(upstream, &self.settings.cache_control),
            Err(error) => {
                tracing::warn!(
                    pool = %self.pool,
                    provider = %chosen.name,
                    error = %error,
                    "Selected provider failed, starting failover sweep"
                );
                self.sweep(request, chosen).await
            }
        }
    }

    /// Try every provider except `excluded`, in list order.
    pub async fn sweep(&self, request: &RelayRequest, excluded: &Provider) -> RelayResponse {
        for (attempt, candidate) in self.providers.others(excluded).enumerate() {
            match self.attempt(request, candidate).await {
                Ok(upstream) => {
                    tracing::info!(
                        pool = %self.pool,
                        provider = %candidate.name,
                        attempt = attempt + 1,
                        "Failover succeeded"
                    );
                    return RelayResponse::shaped(upstream, &self.settings.cache_control);
                }
                Err(error) => {
                    tracing::warn!(
                        pool = %self.pool,
                        provider = %candidate.name,
                        attempt = attempt + 1,
                        error = %error,
                        "Failover candidate failed"
                    );
                }
            }
        }

        tracing::error!(
            pool = %self.pool,
            providers = self.providers.len(),
            "All DNS providers failed"
        );
        RelayResponse::exhausted()
    }

    async fn attempt(
        &self,
        request: &RelayRequest,
        provider: &Provider,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let upstream_request = request.to_upstream(provider, &self.settings.user_agent);
        let response =
            with_deadline(self.settings.attempt_timeout, self.client.send(upstream_request)).await?;

        if !response.status.is_success() {
            return Err(UpstreamError::Status(response.status));
        }
        Ok(response)
    }
}
