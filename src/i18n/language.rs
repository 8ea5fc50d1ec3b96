//! Language type: validated language representation.
//!
//! A `Language` can only be constructed from a code present in the
//! registry, so downstream stages never handle an unchecked code.

use crate::i18n::{LanguageRegistry, AUTO_DETECT_CODE};
use anyhow::{bail, Result};

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// Provider language code (e.g., "en", "es", "auto")
    code: &'static str,
}

impl Language {
    /// Auto-detect pseudo-language (valid only as a source).
    pub const AUTO: Language = Language {
        code: AUTO_DETECT_CODE,
    };

    /// English.
    pub const ENGLISH: Language = Language { code: "en" };

    /// Spanish.
    pub const SPANISH: Language = Language { code: "es" };

    /// Create a Language from a code string.
    ///
    /// The code is trimmed and matched case-insensitively.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is registered (including "auto")
    /// * `Err` if the code is blank or unknown
    ///
    /// # Example
    /// ```ignore
    /// let spanish = Language::from_code(" ES ")?;
    /// ```
    pub fn from_code(code: &str) -> Result<Language> {
        if code.trim().is_empty() {
            bail!("Language code cannot be empty");
        }

        match LanguageRegistry::get().get_by_code(code) {
            Some(config) => Ok(Language { code: config.code }),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Create a Language usable as a translation target.
    ///
    /// Same as [`Language::from_code`], but rejects auto-detect.
    pub fn target(code: &str) -> Result<Language> {
        let language = Self::from_code(code)?;
        if language.is_auto_detect() {
            bail!("'{}' can only be used as a source language", code.trim());
        }
        Ok(language)
    }

    /// Get the language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the display name of the language (e.g., "Spanish").
    pub fn name(&self) -> &'static str {
        LanguageRegistry::get()
            .display_name(self.code)
            .unwrap_or(self.code)
    }

    /// Whether this is the auto-detect pseudo-language.
    pub fn is_auto_detect(&self) -> bool {
        self.code == AUTO_DETECT_CODE
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::AUTO
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_spanish_constant() {
        let spanish = Language::SPANISH;
        assert_eq!(spanish.code(), "es");
        assert_eq!(spanish.name(), "Spanish");
        assert!(!spanish.is_auto_detect());
    }

    #[test]
    fn test_auto_constant() {
        assert_eq!(Language::AUTO.code(), "auto");
        assert_eq!(Language::AUTO.name(), "Auto-detect");
        assert!(Language::AUTO.is_auto_detect());
        assert_eq!(Language::default(), Language::AUTO);
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_normalizes() {
        for code in ["DE", "de", "  de  "] {
            let language = Language::from_code(code).expect("Should succeed");
            assert_eq!(language.code(), "de");
            assert_eq!(language.name(), "German");
        }
    }

    #[test]
    fn test_from_code_accepts_auto() {
        assert_eq!(Language::from_code("auto").ok(), Some(Language::AUTO));
    }

    #[test]
    fn test_from_code_invalid() {
        let result = Language::from_code("xx");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_blank() {
        let result = Language::from_code("   ");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty"));
    }

    // ==================== target Tests ====================

    #[test]
    fn test_target_accepts_real_language() {
        assert_eq!(Language::target("ES").ok(), Some(Language::SPANISH));
    }

    #[test]
    fn test_target_rejects_auto() {
        let result = Language::target(" Auto ");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("source language"));
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_language_equality() {
        assert_eq!(Language::ENGLISH, Language::from_code("en").unwrap());
        assert_ne!(Language::ENGLISH, Language::SPANISH);
    }

    #[test]
    fn test_language_display() {
        assert_eq!(Language::SPANISH.to_string(), "es");
    }

    #[test]
    fn test_display_name_lookup() {
        assert_eq!(Language::SPANISH.name(), "Spanish");
        assert_eq!(Language::AUTO.name(), "Auto-detect");
        assert_eq!(Language::from_code("ja").unwrap().name(), "Japanese");
    }
}
