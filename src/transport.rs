//! Transport selection: mock lookup or one live HTTP call.
//!
//! The transport confirms that a response arrived and hands it on
//! untouched. Interpreting the payload is the classifier's job.

use crate::error::{Result, TranslationFailure};
use crate::mock::{mock_translate, MockTranslation};
use crate::validation::ValidatedRequest;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Default LibreTranslate endpoint
pub const DEFAULT_API_URL: &str = "https://libretranslate.de/translate";

/// Default timeout for a single live call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Raw HTTP answer from the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// What the transport produced for one attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResponse {
    Mock(MockTranslation),
    Live(HttpReply),
}

/// The HTTP POST capability used by the live path.
///
/// Implementations perform exactly one request and map transport-level
/// problems to `Timeout`, `ConnectionFailure` or `ProtocolError`.
pub trait HttpPost: Send + Sync {
    fn post(
        &self,
        url: &str,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> impl Future<Output = Result<HttpReply>> + Send;
}

/// [`HttpPost`] backed by a shared `reqwest::Client`
#[derive(Debug, Clone, Default)]
pub struct ReqwestPoster {
    client: reqwest::Client,
}

impl HttpPost for ReqwestPoster {
    async fn post(
        &self,
        url: &str,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<HttpReply> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_reqwest_error(&e, timeout))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(&e, timeout))?;

        Ok(HttpReply { status, body })
    }
}

/// Map a reqwest error to the failure taxonomy
pub fn map_reqwest_error(error: &reqwest::Error, timeout: Duration) -> TranslationFailure {
    if error.is_timeout() {
        TranslationFailure::timeout(format!(
            "Request timed out after {:?}. The translation API is not responding.",
            timeout
        ))
    } else if error.is_connect() {
        TranslationFailure::connection(format!(
            "Failed to connect to the translation API: {}",
            error
        ))
    } else {
        TranslationFailure::protocol(format!("API request failed: {}", error))
    }
}

/// LibreTranslate request body
#[derive(Debug, Serialize)]
struct LibreTranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

/// Where and how live calls are sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Dispatches a request to the mock table or the live provider
#[derive(Debug)]
pub struct Transport<P> {
    use_mock: bool,
    endpoint: Endpoint,
    poster: P,
}

impl<P: HttpPost> Transport<P> {
    pub fn new(use_mock: bool, endpoint: Endpoint, poster: P) -> Self {
        Self {
            use_mock,
            endpoint,
            poster,
        }
    }

    pub fn is_live(&self) -> bool {
        !self.use_mock
    }

    /// Send one attempt.
    ///
    /// The mock path never fails. The live path issues exactly one call.
    pub async fn send(&self, request: &ValidatedRequest) -> Result<ProviderResponse> {
        if self.use_mock {
            return Ok(ProviderResponse::Mock(mock_translate(
                &request.text,
                request.target,
            )));
        }

        let body = serde_json::to_value(LibreTranslateRequest {
            q: &request.text,
            source: request.source.code(),
            target: request.target.code(),
            format: "text",
            api_key: self.endpoint.api_key.as_deref(),
        })
        .map_err(|e| TranslationFailure::protocol(format!("Failed to encode request: {}", e)))?;

        debug!(
            "Sending translation request to {} ({} -> {})",
            self.endpoint.url, request.source, request.target
        );
        let reply = self
            .poster
            .post(&self.endpoint.url, &body, self.endpoint.timeout)
            .await?;

        Ok(ProviderResponse::Live(reply))
    }
}
