//! Language registry: Single source of truth for all supported languages.
//!
//! This module provides a centralized registry of every language code the
//! translation provider accepts. It uses a singleton pattern with `OnceLock`
//! to ensure thread-safe initialization and read-only access for the
//! lifetime of the process.

use std::sync::OnceLock;

/// Code of the pseudo-language that asks the provider to detect the source.
pub const AUTO_DETECT_CODE: &str = "auto";

/// Configuration for a supported language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Provider language code (e.g., "en", "es", "auto")
    pub code: &'static str,

    /// Display name of the language (e.g., "English", "Spanish")
    pub name: &'static str,
}

impl LanguageConfig {
    /// Whether this entry is the auto-detect pseudo-language.
    ///
    /// Auto-detect is only meaningful as a source language.
    pub fn is_auto_detect(&self) -> bool {
        self.code == AUTO_DETECT_CODE
    }
}

/// Global language registry singleton.
///
/// Initialized once on first access and immutable thereafter. Languages are
/// stored sorted by code so listings are stable.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| {
            let mut languages = default_languages();
            languages.sort_by(|a, b| a.code.cmp(b.code));
            LanguageRegistry { languages }
        })
    }

    /// Get a language configuration by its code.
    ///
    /// The lookup trims surrounding whitespace and ignores case, so `"ES"`,
    /// `"es"` and `" es "` all resolve to Spanish.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        let normalized = code.trim().to_lowercase();
        self.languages
            .binary_search_by(|lang| lang.code.cmp(normalized.as_str()))
            .ok()
            .map(|index| &self.languages[index])
    }

    /// Get all languages, sorted by code.
    pub fn list_all(&self) -> &[LanguageConfig] {
        &self.languages
    }

    /// Get the display name for a code, if supported.
    pub fn display_name(&self, code: &str) -> Option<&'static str> {
        self.get_by_code(code).map(|lang| lang.name)
    }
}

/// Default language configurations.
///
/// Mirrors the codes served by LibreTranslate instances.
fn default_languages() -> Vec<LanguageConfig> {
    [
        (AUTO_DETECT_CODE, "Auto-detect"),
        ("ar", "Arabic"),
        ("bn", "Bengali"),
        ("cs", "Czech"),
        ("cy", "Welsh"),
        ("da", "Danish"),
        ("de", "German"),
        ("el", "Greek"),
        ("en", "English"),
        ("es", "Spanish"),
        ("fa", "Farsi"),
        ("fi", "Finnish"),
        ("fr", "French"),
        ("gu", "Gujarati"),
        ("he", "Hebrew"),
        ("hi", "Hindi"),
        ("hu", "Hungarian"),
        ("id", "Indonesian"),
        ("it", "Italian"),
        ("ja", "Japanese"),
        ("kn", "Kannada"),
        ("ko", "Korean"),
        ("lt", "Lithuanian"),
        ("lv", "Latvian"),
        ("mk", "Macedonian"),
        ("ml", "Malayalam"),
        ("mr", "Marathi"),
        ("ne", "Nepali"),
        ("nl", "Dutch"),
        ("pa", "Punjabi"),
        ("pl", "Polish"),
        ("pt", "Portuguese"),
        ("ro", "Romanian"),
        ("ru", "Russian"),
        ("sk", "Slovak"),
        ("sl", "Slovenian"),
        ("sv", "Swedish"),
        ("ta", "Tamil"),
        ("te", "Telugu"),
        ("tr", "Turkish"),
        ("uk", "Ukrainian"),
        ("vi", "Vietnamese"),
        ("zh", "Chinese"),
    ]
    .into_iter()
    .map(|(code, name)| LanguageConfig { code, name })
    .collect()
}
