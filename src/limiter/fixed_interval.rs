//! Fixed minimum-interval admission
//!
//! Spaces admitted requests at least `min_interval` apart by delaying the
//! caller. Used for single-entity lookups where only one request is in flight.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

#[derive(Debug)]
pub struct FixedInterval {
    min_interval: Duration,
    /// Slot handed to the most recent caller
    last_slot: Mutex<Option<Instant>>,
}

impl FixedInterval {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_slot: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until the caller's slot arrives. Returns how long it waited.
    pub async fn admit(&self) -> Duration {
        let now = Instant::now();
        let slot = self.reserve_at(now);
        let wait = slot.saturating_duration_since(now);

        if !wait.is_zero() {
            debug!("Rate limit: waiting {}ms before next API request", wait.as_millis());
            tokio::time::sleep_until(slot).await;
        }
        wait
    }

    /// Claims the next free slot at or after `now`.
    ///
    /// Slots are claimed before sleeping, so concurrent callers queue up one
    /// interval apart instead of all waking at the same instant.
    pub fn reserve_at(&self, now: Instant) -> Instant {
        let mut last = self.last_slot.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = match *last {
            Some(prev) => (prev + self.min_interval).max(now),
            None => now,
        };
        *last = Some(slot);
        slot
    }
}
