//! Request validation, run once before any network activity.

use crate::error::{Result, TranslationFailure};
use crate::i18n::{Language, LanguageRegistry, AUTO_DETECT_CODE};

/// Maximum text length accepted by the provider, in characters.
pub const MAX_TEXT_CHARS: usize = 5000;

/// A translation request as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    text: String,
    target_language: String,
    source_language: String,
}

impl TranslationRequest {
    /// Create a request with auto-detected source language.
    pub fn new(text: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_language: target_language.into(),
            source_language: AUTO_DETECT_CODE.to_string(),
        }
    }

    /// Use an explicit source language instead of auto-detection.
    pub fn with_source(mut self, source_language: impl Into<String>) -> Self {
        self.source_language = source_language.into();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }
}

/// A request that passed validation, with resolved languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub text: String,
    pub target: Language,
    pub source: Language,
}

/// Validate a request.
///
/// Checks, in order: text is not blank; trimmed text is at most
/// [`MAX_TEXT_CHARS`] characters; target code is not blank; target code is
/// a supported language other than auto-detect; source code is supported.
pub fn validate(request: &TranslationRequest) -> Result<ValidatedRequest> {
    let text = request.text();
    if text.trim().is_empty() {
        return Err(TranslationFailure::validation(
            "Text cannot be empty. Please provide text to translate.",
        ));
    }

    let length = text.trim().chars().count();
    if length > MAX_TEXT_CHARS {
        return Err(TranslationFailure::validation(format!(
            "Text too long ({} characters). Maximum {} characters allowed.",
            length, MAX_TEXT_CHARS
        )));
    }

    let target_code = request.target_language();
    if target_code.trim().is_empty() {
        return Err(TranslationFailure::validation(
            "Target language code cannot be empty.",
        ));
    }

    let target = Language::target(target_code).map_err(|e| {
        TranslationFailure::validation(format!(
            "Invalid target language: {}. Supported codes: {}",
            e,
            supported_codes_hint()
        ))
    })?;

    let source = Language::from_code(request.source_language()).map_err(|e| {
        TranslationFailure::validation(format!("Invalid source language: {}", e))
    })?;

    Ok(ValidatedRequest {
        text: text.to_string(),
        target,
        source,
    })
}

fn supported_codes_hint() -> String {
    LanguageRegistry::get()
        .list_all()
        .iter()
        .filter(|lang| !lang.is_auto_detect())
        .map(|lang| lang.code)
        .collect::<Vec<_>>()
        .join(", ")
}
