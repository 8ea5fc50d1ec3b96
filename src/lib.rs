//! Text translation through a LibreTranslate-compatible API.
//!
//! Requests are validated, spaced by a rate limiter, retried with a
//! configurable backoff, and every provider reply is classified into either
//! a [`TranslationResult`] or a typed [`TranslationFailure`]. A mock
//! transport answers offline from a fixed table.

pub mod classifier;
pub mod config;
pub mod error;
pub mod i18n;
pub mod metrics;
pub mod mock;
pub mod rate_limit;
pub mod retry;
pub mod translation;
pub mod transport;
pub mod validation;

pub use classifier::{Origin, TranslationResult};
pub use config::Config;
pub use error::{FailureKind, TranslationFailure};
pub use i18n::{get_supported_languages, Language};
pub use retry::{RetryPolicy, RetryStrategy};
pub use translation::TranslationClient;
pub use validation::TranslationRequest;
