//! Rate Limiter Module
//!
//! Admission gate in front of every upstream call. Two strategies:
//! - sliding window: fails fast when the budget is spent, for listing endpoints
//! - fixed interval: delays the caller, for single-entity lookups
//!
//! Rejection is a normal return value, never an error.

mod fixed_interval;
mod sliding_window;

use std::time::Duration;

use serde::Serialize;

pub use fixed_interval::FixedInterval;
pub use sliding_window::SlidingWindow;

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Rejected,
}

// == Rate Limiter ==
/// One admission strategy, configured per call site.
#[derive(Debug)]
pub enum RateLimiter {
    SlidingWindow(SlidingWindow),
    FixedInterval(FixedInterval),
}

impl RateLimiter {
    pub fn sliding_window(max_requests: usize, window: Duration) -> Self {
        RateLimiter::SlidingWindow(SlidingWindow::new(max_requests, window))
    }

    pub fn fixed_interval(min_interval: Duration) -> Self {
        RateLimiter::FixedInterval(FixedInterval::new(min_interval))
    }

    /// Decides whether an upstream call may proceed.
    ///
    /// Only the fixed-interval strategy suspends; it always admits.
    pub async fn admit(&self) -> Admission {
        match self {
            RateLimiter::SlidingWindow(window) => window.admit(),
            RateLimiter::FixedInterval(gate) => {
                gate.admit().await;
                Admission::Admitted
            }
        }
    }

    /// Current configuration and load, for the stats endpoint.
    pub fn snapshot(&self) -> LimiterSnapshot {
        match self {
            RateLimiter::SlidingWindow(window) => LimiterSnapshot::SlidingWindow {
                max_requests: window.max_requests(),
                window_ms: window.window().as_millis() as u64,
                recent_requests: window.recent(),
            },
            RateLimiter::FixedInterval(gate) => LimiterSnapshot::FixedInterval {
                min_interval_ms: gate.min_interval().as_millis() as u64,
            },
        }
    }
}

/// Serializable view of a limiter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum LimiterSnapshot {
    SlidingWindow {
        max_requests: usize,
        window_ms: u64,
        recent_requests: usize,
    },
    FixedInterval {
        min_interval_ms: u64,
    },
}
