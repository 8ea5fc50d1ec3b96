//! Supported-language set.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported languages and their display names
//! - `language`: Type-safe `Language` handle validated against the registry
//!
//! # Example
//!
//! ```rust,ignore
//! use translate_query::i18n::{Language, LanguageRegistry};
//!
//! let spanish = Language::target("ES")?;
//! let everything = LanguageRegistry::get().list_all();
//! ```

mod language;
mod registry;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry, AUTO_DETECT_CODE};

/// List every supported `(code, display_name)` pair, sorted by code.
pub fn get_supported_languages() -> Vec<(&'static str, &'static str)> {
    LanguageRegistry::get()
        .list_all()
        .iter()
        .map(|lang| (lang.code, lang.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_supported_languages_sorted_pairs() {
        let languages = get_supported_languages();

        assert_eq!(languages.len(), 43);
        assert_eq!(languages.first(), Some(&("ar", "Arabic")));
        assert_eq!(languages.last(), Some(&("zh", "Chinese")));
        assert!(languages.contains(&("auto", "Auto-detect")));
        assert!(languages.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }
}
