//! Outbound throttling for the live transport.
//!
//! Two independent guards:
//! - [`RateLimiter`] keeps a minimum spacing between consecutive live calls.
//! - [`RequestBudget`] caps how many live calls may start per window.

use std::sync::Mutex;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// Minimum spacing used when none is configured.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(500);

/// Enforces a minimum spacing between live calls from one client.
///
/// Concurrent callers each reserve the next free slot under a short lock and
/// then sleep outside of it, so no two calls start closer than
/// `min_interval` apart and no lock is held while waiting.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request_at: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request_at: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until a live call may be issued.
    ///
    /// The slot is recorded as used whether or not the following call
    /// succeeds, and stays recorded if this future is dropped mid-wait.
    pub async fn wait_if_needed(&self) {
        let slot = self.reserve_slot();
        let now = Instant::now();
        if slot > now {
            debug!("Rate limiter: waiting {:?} before next request", slot - now);
            sleep_until(slot).await;
        }
    }

    fn reserve_slot(&self) -> Instant {
        let now = Instant::now();
        let mut last = self
            .last_request_at
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let slot = match *last {
            Some(previous) => now.max(previous + self.min_interval),
            None => now,
        };
        *last = Some(slot);
        slot
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}

/// Window length for [`RequestBudget`].
pub const BUDGET_WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct BudgetWindow {
    opened_at: Instant,
    used: u32,
}

/// Fixed-window cap on live calls (e.g. 30 per minute).
#[derive(Debug)]
pub struct RequestBudget {
    max_requests: u32,
    window: Duration,
    state: Mutex<BudgetWindow>,
}

impl RequestBudget {
    pub fn per_minute(max_requests: u32) -> Self {
        Self::new(max_requests, BUDGET_WINDOW)
    }

    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            state: Mutex::new(BudgetWindow {
                opened_at: Instant::now(),
                used: 0,
            }),
        }
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Take one request from the budget.
    ///
    /// Returns `false` without consuming anything when the current window is
    /// spent. The window restarts once it is older than its length.
    pub fn try_acquire(&self) -> bool {
        let now = Instant::now();
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if now.duration_since(state.opened_at) >= self.window {
            state.opened_at = now;
            state.used = 0;
        }

        if state.used >= self.max_requests {
            return false;
        }
        state.used += 1;
        true
    }

    /// Requests still available in the current window.
    pub fn remaining(&self) -> u32 {
        let now = Instant::now();
        let state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if now.duration_since(state.opened_at) >= self.window {
            self.max_requests
        } else {
            self.max_requests.saturating_sub(state.used)
        }
    }
}
