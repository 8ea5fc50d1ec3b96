use crate::classifier::{classify, TranslationResult};
use crate::config::Config;
use crate::error::{Result, TranslationFailure};
use crate::i18n::get_supported_languages;
use crate::metrics::TranslationMetrics;
use crate::rate_limit::{RateLimiter, RequestBudget};
use crate::retry::{with_retry, RetryPolicy};
use crate::transport::{Endpoint, HttpPost, ReqwestPoster, Transport};
use crate::validation::{validate, TranslationRequest, ValidatedRequest};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Translation client: validates, throttles, retries and classifies.
///
/// One instance may be shared between tasks; its rate-limit state is
/// serialized internally, so concurrent calls still respect the minimum
/// spacing between live requests.
#[derive(Debug)]
pub struct TranslationClient<P = ReqwestPoster> {
    transport: Transport<P>,
    policy: RetryPolicy,
    limiter: RateLimiter,
    budget: Option<RequestBudget>,
    metrics: TranslationMetrics,
}

impl TranslationClient<ReqwestPoster> {
    /// Create a client that talks to the provider through reqwest
    pub fn new(config: &Config) -> Self {
        Self::with_poster(config, ReqwestPoster::default())
    }

    /// Create a client from `TRANSLATE_*` environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::new(&Config::from_env()?))
    }
}

impl<P: HttpPost> TranslationClient<P> {
    /// Create a client with a custom HTTP capability
    pub fn with_poster(config: &Config, poster: P) -> Self {
        let endpoint = Endpoint {
            url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            timeout: config.request_timeout,
        };

        Self {
            transport: Transport::new(config.use_mock, endpoint, poster),
            policy: config.retry.clone(),
            limiter: RateLimiter::new(config.min_request_interval),
            budget: config.max_requests_per_minute.map(RequestBudget::per_minute),
            metrics: TranslationMetrics::new(),
        }
    }

    pub fn is_mock(&self) -> bool {
        !self.transport.is_live()
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    /// Every supported `(code, display_name)` pair, sorted by code
    pub fn supported_languages(&self) -> Vec<(&'static str, &'static str)> {
        get_supported_languages()
    }

    /// Translate `text` into `target_language`, auto-detecting the source
    pub async fn translate(&self, text: &str, target_language: &str) -> Result<TranslationResult> {
        self.translate_request(&TranslationRequest::new(text, target_language))
            .await
    }

    /// Translate a full request
    ///
    /// Validation runs once and consumes no attempts. Afterwards each
    /// attempt is rate limited (live only), sent, and classified; retryable
    /// failures are retried per the policy and the last failure is returned
    /// when attempts run out.
    pub async fn translate_request(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResult> {
        self.metrics.record_request();
        self.run(request).await
    }

    /// Translate, giving up with `Cancelled` as soon as `cancel` completes
    pub async fn translate_with_cancel<C>(
        &self,
        request: &TranslationRequest,
        cancel: C,
    ) -> Result<TranslationResult>
    where
        C: Future<Output = ()>,
    {
        self.metrics.record_request();

        tokio::select! {
            biased;
            _ = cancel => {
                self.metrics.record_failure();
                warn!("Translation cancelled by caller");
                Err(TranslationFailure::cancelled("Translation cancelled by caller"))
            }
            outcome = self.run(request) => outcome,
        }
    }

    /// Translate, giving up with `Cancelled` once `deadline` has elapsed
    pub async fn translate_with_deadline(
        &self,
        request: &TranslationRequest,
        deadline: Duration,
    ) -> Result<TranslationResult> {
        self.metrics.record_request();

        match tokio::time::timeout(deadline, self.run(request)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                self.metrics.record_failure();
                warn!("Translation deadline of {:?} elapsed", deadline);
                Err(TranslationFailure::cancelled(format!(
                    "Deadline of {:?} elapsed before the translation finished",
                    deadline
                )))
            }
        }
    }

    /// Validate and drive the attempts; callers record the request
    async fn run(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        let validated = match self.prepare(request) {
            Ok(validated) => validated,
            Err(failure) => {
                self.metrics.record_validation_rejection();
                self.metrics.record_failure();
                debug!("Rejected translation request: {}", failure);
                return Err(failure);
            }
        };

        let operation_name = format!("Translation to {}", validated.target.name());
        let validated = &validated;
        let outcome = with_retry(&self.policy, &operation_name, move |attempt| {
            self.attempt(validated, attempt)
        })
        .await;

        match &outcome {
            Ok(result) => {
                self.metrics.record_success();
                debug!(
                    "{}: done in {} attempt(s) ({:?})",
                    operation_name, result.attempts_used, result.origin
                );
            }
            Err(failure) => {
                self.metrics.record_failure();
                warn!("{} failed: {}", operation_name, failure);
            }
        }

        outcome
    }

    /// Request checks plus a policy that can make at least one attempt
    fn prepare(&self, request: &TranslationRequest) -> Result<ValidatedRequest> {
        let validated = validate(request)?;
        if self.policy.max_attempts == 0 {
            return Err(TranslationFailure::validation(
                "Retry policy must allow at least one attempt (max_attempts is 0)",
            ));
        }
        Ok(validated)
    }

    async fn attempt(&self, request: &ValidatedRequest, attempt: u32) -> Result<TranslationResult> {
        self.metrics.record_attempt();
        if attempt > 0 {
            self.metrics.record_retry();
        }

        if self.transport.is_live() {
            self.limiter.wait_if_needed().await;

            if let Some(budget) = &self.budget {
                if !budget.try_acquire() {
                    return Err(TranslationFailure::rate_limited(format!(
                        "Local budget of {} requests per minute exhausted",
                        budget.max_requests()
                    )));
                }
                debug!("Request budget: {} left this minute", budget.remaining());
            }
            self.metrics.record_live_call();
        }

        let response = self.transport.send(request).await?;
        classify(response, request, attempt + 1)
    }
}
