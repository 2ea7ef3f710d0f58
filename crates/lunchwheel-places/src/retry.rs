//! Retry with exponential back-off and jitter for the place search client.
//!
//! [`retry_with_backoff`] wraps any fallible async operation and retries on
//! transient errors (network failures, 429, 5xx). Everything else is
//! returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::PlacesError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection reset.
/// - [`PlacesError::RateLimited`].
/// - HTTP 5xx responses.
///
/// **Not retriable:**
/// - [`PlacesError::ApiError`]: bad key or bad parameters; retrying won't fix it.
/// - [`PlacesError::Deserialize`]: malformed response.
/// - Configuration errors and caller-side timeouts.
pub(crate) fn is_retriable(err: &PlacesError) -> bool {
    match err {
        PlacesError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        PlacesError::RateLimited { .. } => true,
        PlacesError::UnexpectedStatus { status, .. } => *status >= 500,
        PlacesError::ApiError { .. }
        | PlacesError::Deserialize { .. }
        | PlacesError::InvalidBaseUrl { .. }
        | PlacesError::Timeout { .. }
        | PlacesError::UpstreamUnavailable(_) => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 250`:
///
/// | Attempt | Sleep before next attempt   |
/// |---------|-----------------------------|
/// | 1       | 250 ms × 2⁰ ± 25 % jitter   |
/// | 2       | 250 ms × 2¹ ± 25 % jitter   |
///
/// Delay is capped at 10 s. A `RateLimited` error with a `Retry-After` hint
/// waits at least that long.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, PlacesError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PlacesError>>,
{
    const MAX_DELAY_MS: u64 = 10_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let mut delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                if let PlacesError::RateLimited {
                    retry_after_secs: Some(secs),
                } = &err
                {
                    delay_ms = delay_ms.max(secs.saturating_mul(1000)).min(MAX_DELAY_MS);
                }
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "place search transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn api_error() -> PlacesError {
        PlacesError::ApiError {
            status: 401,
            message: "wrong appKey".to_owned(),
        }
    }

    #[test]
    fn api_error_is_not_retriable() {
        assert!(!is_retriable(&api_error()));
    }

    #[test]
    fn rate_limited_is_retriable() {
        assert!(is_retriable(&PlacesError::RateLimited {
            retry_after_secs: None
        }));
    }

    #[test]
    fn server_error_status_is_retriable_client_error_is_not() {
        assert!(is_retriable(&PlacesError::UnexpectedStatus {
            status: 503,
            url: "http://x".to_owned()
        }));
        assert!(!is_retriable(&PlacesError::UnexpectedStatus {
            status: 404,
            url: "http://x".to_owned()
        }));
    }

    #[test]
    fn caller_timeout_is_not_retriable() {
        assert!(!is_retriable(&PlacesError::Timeout {
            operation: "category search".to_owned(),
            after_ms: 5000
        }));
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, PlacesError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn does_not_retry_api_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(api_error())
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1, "ApiError must not be retried");
        assert!(matches!(result, Err(PlacesError::ApiError { .. })));
    }

    #[tokio::test]
    async fn retries_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                let attempt = c.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < 3 {
                    Err::<u32, _>(PlacesError::UnexpectedStatus {
                        status: 502,
                        url: "http://upstream".to_owned(),
                    })
                } else {
                    Ok(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99, "should succeed after retries");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(2, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(PlacesError::RateLimited {
                    retry_after_secs: None,
                })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3, "1 attempt + 2 retries");
        assert!(matches!(result, Err(PlacesError::RateLimited { .. })));
    }
}
