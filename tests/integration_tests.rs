//! Integration tests for the translation client
//!
//! These tests drive the public API against a local wiremock server, so
//! every layer (validation, rate limiting, retries, transport and
//! classification) runs exactly as it does in production.

use std::time::{Duration, Instant};
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    matchers::{body_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

use translate_query::{
    config::Config, get_supported_languages, FailureKind, Origin, RetryPolicy, RetryStrategy,
    TranslationClient, TranslationRequest,
};

// ==================== Test Helpers ====================

/// Live config against the mock server with fast retries
fn create_test_config(server: &MockServer) -> Config {
    Config {
        api_url: format!("{}/translate", server.uri()),
        api_key: None,
        use_mock: false,
        request_timeout: Duration::from_secs(5),
        min_request_interval: Duration::from_millis(20),
        max_requests_per_minute: None,
        retry: RetryPolicy::new(RetryStrategy::Immediate, Duration::ZERO, 3),
    }
}

fn translation_body(text: &str, source: &str, confidence: f64) -> serde_json::Value {
    serde_json::json!({
        "translatedText": text,
        "detectedLanguage": {"language": source, "confidence": confidence}
    })
}

// ==================== Success Path ====================

#[tokio::test]
async fn test_live_translation_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_json(serde_json::json!({
            "q": "hello world",
            "source": "auto",
            "target": "es",
            "format": "text"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(translation_body(
            "Hola mundo",
            "en",
            90.0,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TranslationClient::new(&create_test_config(&mock_server));
    let result = assert_ok!(client.translate("hello world", "es").await);

    assert_eq!(result.translated_text, "Hola mundo");
    assert_eq!(result.detected_source, "en");
    assert!((result.confidence - 0.9).abs() < 1e-9);
    assert_eq!(result.attempts_used, 1);
    assert_eq!(result.origin, Origin::Live);
    assert_eq!(result.target_language, "es");
}

#[tokio::test]
async fn test_explicit_source_and_api_key_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_json(serde_json::json!({
            "q": "Guten Morgen",
            "source": "de",
            "target": "en",
            "format": "text",
            "api_key": "test-api-key"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"translatedText": "Good morning"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = Config {
        api_key: Some("test-api-key".to_string()),
        ..create_test_config(&mock_server)
    };
    let client = TranslationClient::new(&config);
    let request = TranslationRequest::new("Guten Morgen", "en").with_source("de");

    let result = assert_ok!(client.translate_request(&request).await);

    // No detectedLanguage in the payload: the explicit source is reported
    assert_eq!(result.translated_text, "Good morning");
    assert_eq!(result.detected_source, "de");
    assert_eq!(result.confidence, 1.0);
}

#[tokio::test]
async fn test_detection_reported_as_array_is_a_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "translatedText": "Hola",
            "detectedLanguage": [{"language": "en", "confidence": 90}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TranslationClient::new(&create_test_config(&mock_server));
    let result = assert_ok!(client.translate("hello", "es").await);

    assert_eq!(result.translated_text, "Hola");
    assert_eq!(result.detected_source, "en");
    assert!((result.confidence - 0.9).abs() < 1e-9);
}

#[tokio::test]
async fn test_result_serializes_to_json() {
    let client = TranslationClient::new(&Config::mock());
    let result = assert_ok!(client.translate("thank you", "de").await);

    let json = serde_json::to_value(&result).expect("Should serialize");
    assert_eq!(json["translated_text"], "Danke");
    assert_eq!(json["origin"], "mock");
    assert_eq!(json["attempts_used"], 1);
    assert!(json["timestamp"].is_string());
}

// ==================== Retry Behaviour ====================

#[tokio::test]
async fn test_server_errors_are_retried_until_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(translation_body(
            "Bonjour",
            "en",
            0.8,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TranslationClient::new(&create_test_config(&mock_server));
    let result = assert_ok!(client.translate("hello", "fr").await);

    assert_eq!(result.translated_text, "Bonjour");
    assert_eq!(result.attempts_used, 3);
    assert_eq!(client.metrics().retries(), 2);
    assert_eq!(client.metrics().live_calls(), 3);
}

#[tokio::test]
async fn test_quota_error_exhausts_attempts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(serde_json::json!({"error": "Daily quota exceeded"})),
        )
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = TranslationClient::new(&create_test_config(&mock_server));
    let err = assert_err!(client.translate("hello", "fr").await);

    assert_eq!(err.kind(), FailureKind::RateLimited);
    assert_eq!(client.metrics().failures(), 1);
}

#[tokio::test]
async fn test_unsupported_language_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "ja is not supported as a target language"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TranslationClient::new(&create_test_config(&mock_server));
    let err = assert_err!(client.translate("hello", "ja").await);

    assert_eq!(err.kind(), FailureKind::UnsupportedLanguage);
    assert!(err.message().contains("ja is not supported"));
}

#[tokio::test]
async fn test_malformed_payload_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"unexpected": true})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TranslationClient::new(&create_test_config(&mock_server));
    let err = assert_err!(client.translate("hello", "es").await);

    assert_eq!(err.kind(), FailureKind::MalformedResponse);
}

#[tokio::test]
async fn test_slow_provider_times_out_each_attempt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(translation_body("Hola", "en", 0.9))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let config = Config {
        request_timeout: Duration::from_millis(100),
        retry: RetryPolicy::new(RetryStrategy::Immediate, Duration::ZERO, 2),
        ..create_test_config(&mock_server)
    };
    let client = TranslationClient::new(&config);
    let err = assert_err!(client.translate("hello", "es").await);

    assert_eq!(err.kind(), FailureKind::Timeout);
    assert!(err.is_retryable());
    assert_eq!(client.metrics().attempts(), 2);
}

// ==================== Validation and Throttling ====================

#[tokio::test]
async fn test_invalid_requests_never_reach_the_provider() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = TranslationClient::new(&create_test_config(&mock_server));

    for (text, target) in [("", "es"), ("hello", "klingon"), ("hello", "auto")] {
        let err = assert_err!(client.translate(text, target).await);
        assert_eq!(err.kind(), FailureKind::Validation);
    }
}

#[tokio::test]
async fn test_consecutive_live_calls_respect_min_interval() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(translation_body(
            "Hola", "en", 0.9,
        )))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = Config {
        min_request_interval: Duration::from_millis(150),
        ..create_test_config(&mock_server)
    };
    let client = TranslationClient::new(&config);
    let start = Instant::now();

    for _ in 0..3 {
        assert_ok!(client.translate("hello", "es").await);
    }

    // Three calls need at least two full intervals between them
    assert!(start.elapsed() >= Duration::from_millis(300));
}

#[tokio::test]
async fn test_deadline_cancels_slow_translation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(translation_body("Hola", "en", 0.9))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client = TranslationClient::new(&create_test_config(&mock_server));
    let err = assert_err!(
        client
            .translate_with_deadline(
                &TranslationRequest::new("hello", "es"),
                Duration::from_millis(200)
            )
            .await
    );

    assert_eq!(err.kind(), FailureKind::Cancelled);
}

// ==================== Languages ====================

#[test]
fn test_supported_languages_listing() {
    let languages = get_supported_languages();

    assert_eq!(languages.len(), 43);
    assert!(languages.contains(&("auto", "Auto-detect")));
    assert!(languages.windows(2).all(|pair| pair[0].0 < pair[1].0));
}
