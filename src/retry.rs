use crate::error::TranslationFailure;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// How the wait between attempts grows with the attempt index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryStrategy {
    /// `base_delay * 2^attempt`
    Exponential,
    /// `base_delay * (attempt + 1)`
    Linear,
    /// No wait at all
    Immediate,
}

impl FromStr for RetryStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exponential" => Ok(RetryStrategy::Exponential),
            "linear" => Ok(RetryStrategy::Linear),
            "immediate" => Ok(RetryStrategy::Immediate),
            other => Err(format!(
                "Unknown retry strategy '{}'. Expected exponential, linear or immediate",
                other
            )),
        }
    }
}

impl std::fmt::Display for RetryStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RetryStrategy::Exponential => "exponential",
            RetryStrategy::Linear => "linear",
            RetryStrategy::Immediate => "immediate",
        };
        f.write_str(name)
    }
}

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// How delays grow between attempts
    pub strategy: RetryStrategy,
    /// Delay unit the strategy scales
    pub base_delay: Duration,
    /// Maximum number of attempts (including the first one)
    pub max_attempts: u32,
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(strategy: RetryStrategy, base_delay: Duration, max_attempts: u32) -> Self {
        Self {
            strategy,
            base_delay,
            max_attempts,
        }
    }

    /// Preset: Standard retries for API calls (3 attempts)
    /// Delays: 1s, 2s = 3s total wait time
    pub fn api_call() -> Self {
        Self::new(RetryStrategy::Exponential, Duration::from_secs(1), 3)
    }

    /// Preset: single attempt, never waits
    pub fn no_retry() -> Self {
        Self::new(RetryStrategy::Immediate, Duration::ZERO, 1)
    }

    /// Calculate the wait after a failed attempt (0-indexed)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self.strategy {
            RetryStrategy::Exponential => {
                let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
                self.base_delay.saturating_mul(factor)
            }
            RetryStrategy::Linear => self.base_delay.saturating_mul(attempt.saturating_add(1)),
            RetryStrategy::Immediate => Duration::ZERO,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::api_call()
    }
}

/// Errors that know whether repeating the operation could help
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for TranslationFailure {
    fn is_retryable(&self) -> bool {
        TranslationFailure::is_retryable(self)
    }
}

/// Execute an async operation with retries
///
/// The operation receives the 0-indexed attempt number. A non-retryable
/// error is returned immediately; a retryable one is followed by the
/// policy's delay unless it came from the final attempt, in which case it
/// is returned as-is.
///
/// # Panics
/// Panics if `policy.max_attempts` is 0
pub async fn with_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display + Retryable,
{
    assert!(
        policy.max_attempts >= 1,
        "RetryPolicy.max_attempts must be >= 1, got {}",
        policy.max_attempts
    );

    let mut attempt = 0;
    loop {
        match operation(attempt).await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(
                        "{}: Succeeded on attempt {}/{}",
                        operation_name,
                        attempt + 1,
                        policy.max_attempts
                    );
                }
                return Ok(result);
            }
            Err(e) => {
                if !e.is_retryable() {
                    debug!(
                        "{}: Error is not retryable, failing immediately: {}",
                        operation_name, e
                    );
                    return Err(e);
                }

                let remaining = policy.max_attempts - attempt - 1;
                if remaining == 0 {
                    warn!(
                        "{}: All {} attempts failed. Last error: {}",
                        operation_name, policy.max_attempts, e
                    );
                    return Err(e);
                }

                let delay = policy.delay_for_attempt(attempt);
                warn!(
                    "{}: Attempt {}/{} failed ({}), retrying in {:?} ({} retries remaining)",
                    operation_name,
                    attempt + 1,
                    policy.max_attempts,
                    e,
                    delay,
                    remaining
                );
                if !delay.is_zero() {
                    sleep(delay).await;
                }
                attempt += 1;
            }
        }
    }
}
