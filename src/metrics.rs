//! Translation metrics and observability.
//!
//! Each client owns one `TranslationMetrics`; counters are lock-free so
//! concurrent `translate` calls can update them without coordination.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for one translation client.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Number of `translate` calls received
    requests: AtomicUsize,

    /// Number of requests rejected by validation
    validation_rejections: AtomicUsize,

    /// Number of attempts made (mock or live)
    attempts: AtomicUsize,

    /// Number of attempts beyond the first
    retries: AtomicUsize,

    /// Number of calls that reached the live provider
    live_calls: AtomicUsize,

    /// Number of requests that produced a translation
    successes: AtomicUsize,

    /// Number of requests that ended in a failure (validation included)
    failures: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation_rejection(&self) {
        self.validation_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_retry(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_live_call(&self) {
        self.live_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn validation_rejections(&self) -> usize {
        self.validation_rejections.load(Ordering::Relaxed)
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::Relaxed)
    }

    pub fn retries(&self) -> usize {
        self.retries.load(Ordering::Relaxed)
    }

    pub fn live_calls(&self) -> usize {
        self.live_calls.load(Ordering::Relaxed)
    }

    pub fn successes(&self) -> usize {
        self.successes.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let successes = self.successes();
        let failures = self.failures();
        let finished = successes + failures;
        let success_rate = if finished > 0 {
            (successes as f64 / finished as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            requests: self.requests(),
            validation_rejections: self.validation_rejections(),
            attempts: self.attempts(),
            retries: self.retries(),
            live_calls: self.live_calls(),
            successes,
            failures,
            success_rate,
        }
    }
}

/// Snapshot of a client's counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub requests: usize,
    pub validation_rejections: usize,
    pub attempts: usize,
    pub retries: usize,
    pub live_calls: usize,
    pub successes: usize,
    pub failures: usize,

    /// Success rate of finished requests as a percentage (0-100)
    pub success_rate: f64,
}
