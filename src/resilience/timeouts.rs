//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap each upstream attempt with a deadline
//! - Cancel the attempt cleanly when the deadline passes
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities; dropping the future aborts the request
//! - Timeout errors are distinct from transport errors but recovered the same way

use std::future::Future;
use std::time::Duration;

use tokio::time;

use crate::upstream::UpstreamError;

/// Run `attempt`, failing with `UpstreamError::Timeout` once `limit` elapses.
pub async fn with_deadline<T, F>(limit: Duration, attempt: F) -> Result<T, UpstreamError>
where
    F: Future<Output = Result<T, UpstreamError>>,
{
    match time::timeout(limit, attempt).await {
        Ok(result) => result,
        Err(_) => Err(UpstreamError::Timeout(limit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fast_attempt_passes_through() {
        let result = with_deadline(Duration::from_secs(1), async { Ok::<_, UpstreamError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_slow_attempt_times_out() {
        let limit = Duration::from_millis(20);
        let result = with_deadline(limit, async {
            time::sleep(Duration::from_secs(5)).await;
            Ok::<_, UpstreamError>(())
        })
        .await;

        assert!(matches!(result, Err(UpstreamError::Timeout(d)) if d == limit));
    }
}
