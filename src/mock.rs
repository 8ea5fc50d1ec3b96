//! Deterministic offline translations used when the client runs in mock mode.

use crate::i18n::Language;

/// Source language reported for every mock translation.
pub const MOCK_DETECTED_SOURCE: &str = "en";

/// Confidence reported for every mock translation.
pub const MOCK_CONFIDENCE: f64 = 0.95;

/// Canned `(lowercased text, target code) -> translation` pairs
const MOCK_TRANSLATIONS: &[(&str, &str, &str)] = &[
    ("hello world", "es", "Hola mundo"),
    ("hello world", "fr", "Bonjour le monde"),
    ("hello world", "de", "Hallo Welt"),
    ("hello world", "ja", "こんにちは世界"),
    ("hello world", "zh", "你好世界"),
    ("hello world", "ru", "Привет мир"),
    ("good morning", "es", "Buenos días"),
    ("good morning", "fr", "Bonjour"),
    ("good morning", "de", "Guten Morgen"),
    ("good morning", "ja", "おはようございます"),
    ("how are you", "de", "Wie geht es dir?"),
    ("how are you", "es", "¿Cómo estás?"),
    ("how are you", "fr", "Comment allez-vous?"),
    ("how are you", "ja", "お元気ですか？"),
    ("thank you", "fr", "Merci"),
    ("thank you", "es", "Gracias"),
    ("thank you", "de", "Danke"),
    ("thank you", "ja", "ありがとうございます"),
    ("goodbye", "ja", "さようなら"),
    ("goodbye", "es", "Adiós"),
    ("goodbye", "fr", "Au revoir"),
];

/// A translation produced without touching the network
#[derive(Debug, Clone, PartialEq)]
pub struct MockTranslation {
    pub translated_text: String,
    pub detected_source: &'static str,
    pub confidence: f64,
}

/// Look up a canned translation, or synthesize a placeholder on a miss.
///
/// Never fails.
pub fn mock_translate(text: &str, target: Language) -> MockTranslation {
    let key = text.to_lowercase();
    let translated_text = MOCK_TRANSLATIONS
        .iter()
        .find(|(source, code, _)| *source == key && *code == target.code())
        .map(|(_, _, translation)| translation.to_string())
        .unwrap_or_else(|| format!("[{} translation of '{}']", target.name(), text));

    MockTranslation {
        translated_text,
        detected_source: MOCK_DETECTED_SOURCE,
        confidence: MOCK_CONFIDENCE,
    }
}
