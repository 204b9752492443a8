//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files, and
//! every section falls back to defaults so an empty file is a valid config.

use serde::{Deserialize, Serialize};

use crate::upstream::presets;

/// Root configuration for the DoH relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Upstream client behaviour.
    pub upstream: UpstreamConfig,

    /// Outbound response shaping.
    pub response: ResponseConfig,

    /// Inbound request limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Provider pools.
    pub pools: PoolsConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            tls: None,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Upstream HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// User-Agent sent to every provider.
    pub user_agent: String,

    /// Deadline for a single upstream attempt in milliseconds.
    pub attempt_timeout_ms: u64,

    /// Connection establishment timeout in milliseconds.
    pub connect_timeout_ms: u64,

    /// Maximum redirects followed per attempt.
    pub max_redirects: usize,

    /// Idle pooled connections are closed after this many seconds.
    pub pool_idle_timeout_secs: u64,

    /// Reject provider URLs that are not `https`.
    pub require_https: bool,

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            user_agent: "NeonGhost/2026".to_string(),
            attempt_timeout_ms: 5_000,
            connect_timeout_ms: 3_000,
            max_redirects: 10,
            pool_idle_timeout_secs: 90,
            require_https: true,
            system_proxy: true,
        }
    }
}

/// Response shaping configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResponseConfig {
    /// `max-age` advertised in the forced `Cache-Control` header.
    pub cache_max_age_secs: u32,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            cache_max_age_secs: 300,
        }
    }
}

/// Inbound request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest POST body accepted, in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 64 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter (trace, debug, info, warn, error or a full EnvFilter directive).
    /// `RUST_LOG` takes precedence when set.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Provider pools served by the relay.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PoolsConfig {
    /// Pool behind `/dns-query`.
    pub general: Vec<ProviderConfig>,

    /// Pool behind `/family/dns-query`.
    pub family: Vec<ProviderConfig>,
}

impl Default for PoolsConfig {
    fn default() -> Self {
        Self {
            general: presets::general(),
            family: presets::family(),
        }
    }
}

/// A single upstream DoH provider.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Display name used in logs.
    pub name: String,

    /// Absolute DoH endpoint URL.
    pub url: String,

    /// Relative selection weight (default: 1).
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: RelayConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.upstream.user_agent, "NeonGhost/2026");
        assert_eq!(config.response.cache_max_age_secs, 300);
        assert_eq!(config.pools.general.len(), 11);
        assert_eq!(config.pools.family.len(), 5);
    }

    #[test]
    fn test_custom_pool_replaces_preset() {
        let config: RelayConfig = toml::from_str(
            r#"
            [upstream]
            attempt_timeout_ms = 1500

            [[pools.general]]
            name = "Only"
            url = "https://only.example/dns-query"
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.attempt_timeout_ms, 1500);
        assert_eq!(config.upstream.connect_timeout_ms, 3_000);
        assert_eq!(config.pools.general.len(), 1);
        assert_eq!(config.pools.general[0].weight, 1);
        assert_eq!(config.pools.family.len(), 5);
    }
}
