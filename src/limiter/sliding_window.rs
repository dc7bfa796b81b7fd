//! Sliding-window admission
//!
//! Keeps the timestamps of admitted requests from the trailing window and
//! admits a new one only while fewer than `max_requests` remain. Never waits.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use super::Admission;

#[derive(Debug)]
pub struct SlidingWindow {
    max_requests: usize,
    window: Duration,
    /// Admission times, oldest first
    admitted: Mutex<VecDeque<Instant>>,
}

impl SlidingWindow {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            admitted: Mutex::new(VecDeque::with_capacity(max_requests)),
        }
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn admit(&self) -> Admission {
        self.admit_at(Instant::now())
    }

    /// Prune, check and record under a single lock so concurrent callers can
    /// neither lose nor double-count an admission.
    pub fn admit_at(&self, now: Instant) -> Admission {
        let mut admitted = self.admitted.lock().unwrap_or_else(PoisonError::into_inner);
        self.prune(&mut admitted, now);

        if admitted.len() < self.max_requests {
            admitted.push_back(now);
            Admission::Admitted
        } else {
            Admission::Rejected
        }
    }

    /// Admissions recorded within the trailing window.
    pub fn recent(&self) -> usize {
        let mut admitted = self.admitted.lock().unwrap_or_else(PoisonError::into_inner);
        self.prune(&mut admitted, Instant::now());
        admitted.len()
    }

    fn prune(&self, admitted: &mut VecDeque<Instant>, now: Instant) {
        while admitted
            .front()
            .is_some_and(|t| now.saturating_duration_since(*t) >= self.window)
        {
            admitted.pop_front();
        }
    }
}
