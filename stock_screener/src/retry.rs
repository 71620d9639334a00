//! Deadline + exponential backoff around a single provider call.

use std::{future::Future, time::Duration};

use market_data_ingestor::providers::ProviderError;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Deadline for each individual attempt.
    pub timeout: Duration,
    /// Attempts after the first one; only transient errors are retried.
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each following one.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Backoff before retry number `attempt` (zero-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Runs `call` until it succeeds, fails permanently, or runs out of retries.
///
/// An attempt that exceeds `policy.timeout` is abandoned and reported as
/// [`ProviderError::Timeout`], which counts as transient.
pub async fn call_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut call: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut attempt = 0u32;
    loop {
        let result = match tokio::time::timeout(policy.timeout, call()).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(policy.timeout)),
        };

        match result {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < policy.max_retries => {
                let delay = policy.delay_for(attempt);
                attempt += 1;
                warn!(
                    call = label,
                    attempt,
                    max_retries = policy.max_retries,
                    error = %e,
                    ?delay,
                    "transient provider error, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
