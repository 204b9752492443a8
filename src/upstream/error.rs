//! Failure of a single upstream attempt.

use std::time::Duration;

use axum::http::StatusCode;

/// Why one upstream attempt produced no usable response.
///
/// Every variant advances the failover sweep; none reaches the client.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Connect, TLS, reset or body read failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The attempt exceeded its deadline.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The provider answered with a non-2xx status.
    #[error("provider returned {0}")]
    Status(StatusCode),

    /// Failure reported by a non-HTTP transport.
    #[error("{0}")]
    Other(String),
}
