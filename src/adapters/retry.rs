//! Retry with exponential backoff for rate-limited calls
//!
//! Only rate-limit signals are retried: an HTTP 429 status, or an error
//! whose text mentions "too many requests" or "rate limit". Every other
//! error is returned on the first attempt.

use crate::config::TargetConfig;
use crate::domain::{MigratorError, Result};
use std::future::Future;
use std::time::Duration;

/// Backoff policy for rate-limited calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,

    /// Delay before the first retry; doubles on each subsequent one
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Policy configured for the target repository
    pub fn from_config(config: &TargetConfig) -> Self {
        Self::new(
            config.max_retries,
            Duration::from_millis(config.retry_base_delay_ms),
        )
    }

    /// Delay slept after the given zero-based failed attempt
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Total attempts including the first
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

/// True when the error signals rate limiting
pub fn is_rate_limited(error: &MigratorError) -> bool {
    match error {
        MigratorError::RateLimitExceeded { .. } => false,
        MigratorError::Api(api) if api.status() == Some(429) => true,
        MigratorError::Api(api) => {
            mentions_rate_limit(&api.to_string())
                || api.body().is_some_and(|b| mentions_rate_limit(&b.to_string()))
        }
        other => mentions_rate_limit(&other.to_string()),
    }
}

fn mentions_rate_limit(text: &str) -> bool {
    let text = text.to_lowercase();
    text.contains("too many requests") || text.contains("rate limit")
}

/// Runs `operation`, retrying on rate limiting with `tokio::time::sleep`
pub async fn retry_with_backoff<T, F, Fut>(policy: &RetryPolicy, operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    retry_with_backoff_using(policy, tokio::time::sleep, operation).await
}

/// Runs `operation`, retrying on rate limiting with a caller-supplied sleep
///
/// Attempt `n` (zero-based) that is rate limited is followed by a sleep of
/// `base_delay * 2^n`. After `max_retries + 1` rate-limited attempts the
/// last error is reported as [`MigratorError::RateLimitExceeded`].
pub async fn retry_with_backoff_using<T, F, Fut, S, SFut>(
    policy: &RetryPolicy,
    mut sleep: S,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    S: FnMut(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if is_rate_limited(&e) => {
                if attempt >= policy.max_retries {
                    tracing::error!(attempts = policy.max_attempts(), error = %e, "Rate limit retries exhausted");
                    return Err(MigratorError::RateLimitExceeded {
                        attempts: policy.max_attempts(),
                        message: e.to_string(),
                    });
                }

                let delay = policy.delay_for_attempt(attempt);
                crate::log_retry_attempt!(
                    attempt + 1,
                    policy.max_attempts(),
                    delay.as_millis() as u64,
                    e
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
