//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check every provider pool builds into a valid `ProviderList`
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;

use crate::config::schema::{ProviderConfig, RelayConfig};
use crate::upstream::ProviderList;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.upstream.attempt_timeout_ms == 0 {
        errors.push(ValidationError::new("upstream.attempt_timeout_ms", "must be greater than 0"));
    }

    if config.upstream.connect_timeout_ms == 0 {
        errors.push(ValidationError::new("upstream.connect_timeout_ms", "must be greater than 0"));
    }

    if HeaderValue::from_str(&config.upstream.user_agent).is_err() {
        errors.push(ValidationError::new(
            "upstream.user_agent",
            "contains characters not allowed in a header value",
        ));
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::new("limits.max_body_bytes", "must be greater than 0"));
    }

    validate_pool(
        "pools.general",
        &config.pools.general,
        config.upstream.require_https,
        &mut errors,
    );
    validate_pool(
        "pools.family",
        &config.pools.family,
        config.upstream.require_https,
        &mut errors,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_pool(
    field: &str,
    providers: &[ProviderConfig],
    require_https: bool,
    errors: &mut Vec<ValidationError>,
) {
    match ProviderList::from_configs(providers) {
        Ok(list) => {
            if require_https {
                for provider in list.iter().filter(|p| p.url.scheme() != "https") {
                    errors.push(ValidationError::new(
                        field,
                        format!("provider '{}' must use https ({})", provider.name, provider.url),
                    ));
                }
            }
        }
        Err(e) => errors.push(ValidationError::new(field, e.to_string())),
    }
}
