//! Rate-limit retry with exponential backoff.
//!
//! Only HTTP 429 is retried. Any other failure is returned to the caller on
//! the first attempt; exhausting the retry bound escalates to a typed
//! rate-limit error.

use fresco_error::{ProviderError, ProviderErrorKind};
use serde::Deserialize;
use std::future::Future;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tracing::warn;

/// Retry bound and backoff base for 429 responses.
///
/// Delays follow `base_delay_ms * 2^attempt` (3 s, 6 s, 12 s with the
/// defaults), jittered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries after the initial attempt
    max_retries: u32,
    /// First backoff delay in milliseconds
    base_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 3000,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with an explicit bound and base delay.
    pub fn new(max_retries: u32, base_delay_ms: u64) -> Self {
        Self {
            max_retries,
            base_delay_ms,
        }
    }

    /// Backoff delays for this policy, jittered, one per permitted retry.
    fn delays(&self) -> impl Iterator<Item = std::time::Duration> {
        // ExponentialBackoff yields 2^n millis; the factor scales the series
        // so the first delay lands on base_delay_ms.
        ExponentialBackoff::from_millis(2)
            .factor(self.base_delay_ms.div_ceil(2))
            .map(jitter)
            .take(self.max_retries as usize)
    }
}

/// Runs `op`, retrying on 429 per the policy.
///
/// # Errors
///
/// Returns the first non-429 error unchanged, or a `RateLimited` error once
/// the retry bound is exhausted.
pub async fn with_backoff<T, F, Fut>(
    policy: RetryPolicy,
    provider: &'static str,
    mut op: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut delays = policy.delays();
    let mut attempt: u32 = 0;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_rate_limit_status() => match delays.next() {
                Some(delay) => {
                    attempt += 1;
                    warn!(
                        provider,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Rate limited, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                None => {
                    warn!(
                        provider,
                        retries = policy.max_retries,
                        "Rate limit retries exhausted"
                    );
                    return Err(ProviderError::new(ProviderErrorKind::RateLimited {
                        retries: policy.max_retries,
                    }));
                }
            },
            Err(err) => return Err(err),
        }
    }
}
