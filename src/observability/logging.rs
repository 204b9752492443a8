//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Resolve the log filter from `RUST_LOG` or configuration
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins over the configured level
//! - DNS query contents are never logged

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Build the filter: `RUST_LOG` if set, otherwise the configured level for this crate.
pub fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(&config.log_level))
}

fn default_filter(level: &str) -> EnvFilter {
    let directive = if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("doh_relay={level},tower_http={level}")
    };
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("doh_relay=info,tower_http=info"))
}

/// Install the global subscriber. Safe to call once per process.
pub fn init_logging(config: &ObservabilityConfig) {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_level_scopes_to_crate() {
        let rendered = default_filter("debug").to_string();
        assert!(rendered.contains("doh_relay=debug"));
        assert!(rendered.contains("tower_http=debug"));
    }

    #[test]
    fn test_full_directive_used_verbatim() {
        let filter = default_filter("warn,doh_relay::relay=trace");
        assert!(filter.to_string().contains("doh_relay::relay=trace"));
    }

    #[test]
    fn test_garbage_falls_back_to_info() {
        let filter = default_filter("not a level=!!");
        assert!(filter.to_string().contains("doh_relay=info"));
    }
}
