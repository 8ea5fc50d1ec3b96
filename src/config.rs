use crate::rate_limit::DEFAULT_MIN_INTERVAL;
use crate::retry::{RetryPolicy, RetryStrategy};
use crate::transport::{DEFAULT_API_URL, DEFAULT_TIMEOUT};
use anyhow::{bail, Context, Result};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // Provider
    pub api_url: String,
    pub api_key: Option<String>,
    pub use_mock: bool,
    pub request_timeout: Duration,

    // Throttling
    pub min_request_interval: Duration,
    pub max_requests_per_minute: Option<u32>,

    // Retries
    pub retry: RetryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            use_mock: true,
            request_timeout: DEFAULT_TIMEOUT,
            min_request_interval: DEFAULT_MIN_INTERVAL,
            max_requests_per_minute: None,
            retry: RetryPolicy::api_call(),
        }
    }
}

impl Config {
    /// Defaults with the mock transport
    pub fn mock() -> Self {
        Self {
            use_mock: true,
            ..Self::default()
        }
    }

    /// Defaults pointed at a live endpoint
    pub fn live(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            use_mock: false,
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let strategy = match std::env::var("TRANSLATE_RETRY_STRATEGY") {
            Ok(value) => RetryStrategy::from_str(&value)
                .map_err(anyhow::Error::msg)
                .context("Invalid TRANSLATE_RETRY_STRATEGY")?,
            Err(_) => defaults.retry.strategy,
        };
        let base_delay = parse_var::<u64>("TRANSLATE_RETRY_BASE_DELAY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry.base_delay);
        let max_attempts =
            parse_var::<u32>("TRANSLATE_MAX_ATTEMPTS")?.unwrap_or(defaults.retry.max_attempts);
        if max_attempts == 0 {
            bail!("TRANSLATE_MAX_ATTEMPTS must be at least 1");
        }

        let max_requests_per_minute = parse_var::<u32>("TRANSLATE_MAX_REQUESTS_PER_MINUTE")?;
        if max_requests_per_minute == Some(0) {
            bail!("TRANSLATE_MAX_REQUESTS_PER_MINUTE must be at least 1 when set");
        }

        Ok(Self {
            // Provider
            api_url: std::env::var("TRANSLATE_API_URL").unwrap_or(defaults.api_url),
            api_key: std::env::var("TRANSLATE_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            use_mock: parse_bool_var("TRANSLATE_USE_MOCK")?.unwrap_or(defaults.use_mock),
            request_timeout: parse_var::<u64>("TRANSLATE_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),

            // Throttling
            min_request_interval: parse_var::<u64>("TRANSLATE_MIN_INTERVAL_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.min_request_interval),
            max_requests_per_minute,

            // Retries
            retry: RetryPolicy::new(strategy, base_delay, max_attempts),
        })
    }
}

/// Read and parse an optional environment variable
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid {}: '{}'", name, value)),
        Err(_) => Ok(None),
    }
}

fn parse_bool_var(name: &str) -> Result<Option<bool>> {
    match std::env::var(name) {
        Ok(value) => match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => bail!("Invalid {}: '{}'. Expected true or false", name, value),
        },
        Err(_) => Ok(None),
    }
}
