//! Classified failures for translation requests.

use serde::Serialize;
use thiserror::Error;

/// The kind of a [`TranslationFailure`], without its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Validation,
    Timeout,
    ConnectionFailure,
    RateLimited,
    MalformedResponse,
    UnsupportedLanguage,
    ProtocolError,
    Cancelled,
}

impl FailureKind {
    /// Whether a failure of this kind may succeed if the request is repeated.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            FailureKind::Timeout
                | FailureKind::ConnectionFailure
                | FailureKind::RateLimited
                | FailureKind::ProtocolError
        )
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FailureKind::Validation => "validation error",
            FailureKind::Timeout => "timeout",
            FailureKind::ConnectionFailure => "connection failure",
            FailureKind::RateLimited => "rate limited",
            FailureKind::MalformedResponse => "malformed response",
            FailureKind::UnsupportedLanguage => "unsupported language",
            FailureKind::ProtocolError => "protocol error",
            FailureKind::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Terminal failure of a translation request.
///
/// Every failure path of the client produces exactly one of these values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationFailure {
    /// The request was rejected before any network activity
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The provider did not answer within the request timeout
    #[error("Timeout: {message}")]
    Timeout { message: String },

    /// The provider could not be reached
    #[error("Connection failure: {message}")]
    ConnectionFailure { message: String },

    /// The provider (or the local request budget) is throttling us
    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    /// The provider answered with something that is not a translation
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    /// The provider rejected the language pair
    #[error("Unsupported language: {message}")]
    UnsupportedLanguage { message: String },

    /// Any other transport or provider error
    #[error("Protocol error: {message}")]
    ProtocolError { message: String },

    /// The caller cancelled the request or its deadline elapsed
    #[error("Cancelled: {message}")]
    Cancelled { message: String },
}

impl TranslationFailure {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::ConnectionFailure {
            message: message.into(),
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    pub fn unsupported_language(message: impl Into<String>) -> Self {
        Self::UnsupportedLanguage {
            message: message.into(),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::ProtocolError {
            message: message.into(),
        }
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::Cancelled {
            message: message.into(),
        }
    }

    /// The kind of this failure.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Validation { .. } => FailureKind::Validation,
            Self::Timeout { .. } => FailureKind::Timeout,
            Self::ConnectionFailure { .. } => FailureKind::ConnectionFailure,
            Self::RateLimited { .. } => FailureKind::RateLimited,
            Self::MalformedResponse { .. } => FailureKind::MalformedResponse,
            Self::UnsupportedLanguage { .. } => FailureKind::UnsupportedLanguage,
            Self::ProtocolError { .. } => FailureKind::ProtocolError,
            Self::Cancelled { .. } => FailureKind::Cancelled,
        }
    }

    /// The human-readable message, without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message }
            | Self::Timeout { message }
            | Self::ConnectionFailure { message }
            | Self::RateLimited { message }
            | Self::MalformedResponse { message }
            | Self::UnsupportedLanguage { message }
            | Self::ProtocolError { message }
            | Self::Cancelled { message } => message,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationFailure>;
