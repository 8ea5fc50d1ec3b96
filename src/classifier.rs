//! Turns provider responses into a `TranslationResult` or a classified failure.

use crate::error::{Result, TranslationFailure};
use crate::transport::{HttpReply, ProviderResponse};
use crate::validation::ValidatedRequest;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

/// Where a translation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Mock,
    Live,
}

/// A successful translation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationResult {
    pub translated_text: String,
    pub detected_source: String,
    /// In `[0, 1]`
    pub confidence: f64,
    pub attempts_used: u32,
    pub origin: Origin,
    pub target_language: String,
    pub timestamp: DateTime<Utc>,
}

/// Provider payload shapes, tried in order
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProviderPayload {
    Error {
        error: Value,
    },
    Translation {
        #[serde(rename = "translatedText")]
        translated_text: String,
        #[serde(rename = "detectedLanguage", default)]
        detected_language: Option<Value>,
    },
    Unrecognized(serde_json::Map<String, Value>),
}

fn quota_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)quota|limit").expect("valid regex"))
}

fn language_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)language").expect("valid regex"))
}

/// Classify one attempt's response.
///
/// `attempts_used` is stamped onto a successful result.
pub fn classify(
    response: ProviderResponse,
    request: &ValidatedRequest,
    attempts_used: u32,
) -> Result<TranslationResult> {
    match response {
        ProviderResponse::Mock(mock) => Ok(TranslationResult {
            translated_text: mock.translated_text,
            detected_source: mock.detected_source.to_string(),
            confidence: mock.confidence,
            attempts_used,
            origin: Origin::Mock,
            target_language: request.target.code().to_string(),
            timestamp: Utc::now(),
        }),
        ProviderResponse::Live(reply) => classify_live(reply, request, attempts_used),
    }
}

fn classify_live(
    reply: HttpReply,
    request: &ValidatedRequest,
    attempts_used: u32,
) -> Result<TranslationResult> {
    let HttpReply { status, body } = reply;
    let is_success = (200..300).contains(&status);

    if status == 429 {
        return Err(TranslationFailure::rate_limited(format!(
            "API quota exceeded (HTTP 429): {}. Please try again later.",
            snippet(&body)
        )));
    }

    let object = match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(object)) => object,
        Ok(_) if status >= 500 => {
            return Err(server_error(status, &body));
        }
        Ok(_) => {
            return Err(TranslationFailure::malformed(
                "Malformed API response: Expected JSON object.",
            ));
        }
        Err(_) if status >= 500 => {
            return Err(server_error(status, &body));
        }
        Err(_) => {
            return Err(TranslationFailure::malformed(
                "Malformed API response: Invalid JSON returned by the server.",
            ));
        }
    };

    let payload: ProviderPayload = serde_json::from_value(Value::Object(object))
        .map_err(|e| TranslationFailure::malformed(format!("Malformed API response: {}", e)))?;

    match payload {
        ProviderPayload::Error { error } => Err(classify_error_message(&error_text(&error))),
        _ if !is_success => Err(TranslationFailure::protocol(format!(
            "API returned HTTP {} without an error description",
            status
        ))),
        ProviderPayload::Unrecognized(_) => Err(TranslationFailure::malformed(
            "Malformed API response: Missing or non-string 'translatedText' field.",
        )),
        ProviderPayload::Translation {
            translated_text,
            detected_language,
        } => {
            let detection = detected_language.as_ref().and_then(read_detection);
            let (detected_source, confidence) = match detection {
                Some((language, confidence)) => {
                    (language, confidence.map_or(0.0, normalize_confidence))
                }
                None => (
                    request.source.code().to_string(),
                    if request.source.is_auto_detect() { 0.0 } else { 1.0 },
                ),
            };

            Ok(TranslationResult {
                translated_text,
                detected_source,
                confidence,
                attempts_used,
                origin: Origin::Live,
                target_language: request.target.code().to_string(),
                timestamp: Utc::now(),
            })
        }
    }
}

/// Pull `(language, confidence)` out of a `detectedLanguage` value.
///
/// Accepts an object or an array of objects (first object wins). Numeric
/// strings are accepted for the confidence. Any other shape yields `None`.
fn read_detection(value: &Value) -> Option<(String, Option<f64>)> {
    let entry = match value {
        Value::Array(entries) => entries.iter().find(|entry| entry.is_object())?,
        other => other,
    };

    let language = entry.get("language")?.as_str()?.trim();
    if language.is_empty() {
        return None;
    }

    let confidence = match entry.get("confidence") {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    };

    Some((language.to_string(), confidence))
}

/// Map a provider error message to a failure kind
fn classify_error_message(message: &str) -> TranslationFailure {
    if quota_pattern().is_match(message) {
        TranslationFailure::rate_limited(format!(
            "API quota exceeded: {}. Please try again later.",
            message
        ))
    } else if language_pattern().is_match(message) {
        TranslationFailure::unsupported_language(format!("Invalid language code. {}", message))
    } else {
        TranslationFailure::protocol(format!("API Error: {}", message))
    }
}

fn error_text(error: &Value) -> String {
    match error {
        Value::String(message) => message.clone(),
        Value::Null => "Unknown error".to_string(),
        other => other.to_string(),
    }
}

fn server_error(status: u16, body: &str) -> TranslationFailure {
    TranslationFailure::protocol(format!("API returned HTTP {}: {}", status, snippet(body)))
}

fn snippet(body: &str) -> String {
    const MAX: usize = 200;
    let trimmed = body.trim();
    if trimmed.chars().count() > MAX {
        format!("{}...", trimmed.chars().take(MAX).collect::<String>())
    } else {
        trimmed.to_string()
    }
}

/// Bring provider confidence into `[0, 1]`; some providers report percentages
fn normalize_confidence(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    let scaled = if raw > 1.0 { raw / 100.0 } else { raw };
    scaled.clamp(0.0, 1.0)
}
