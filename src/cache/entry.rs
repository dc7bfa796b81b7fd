//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

// == Cache Entry ==
/// A stored upstream payload with its own lifetime.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Value,
    /// Creation time (monotonic)
    pub stored_at: Instant,
    /// Entry-specific lifetime
    pub ttl: Duration,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stored now.
    pub fn new(value: Value, ttl: Duration) -> Self {
        Self::new_at(value, ttl, Instant::now())
    }

    /// Creates a new cache entry stored at `now`.
    pub fn new_at(value: Value, ttl: Duration, now: Instant) -> Self {
        Self {
            value,
            stored_at: now,
            ttl,
        }
    }

    // == Expiry ==
    /// Instant at which the entry stops being valid.
    pub fn expires_at(&self) -> Instant {
        self.stored_at + self.ttl
    }

    /// Checks if the entry has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Checks expiry against an explicit instant.
    ///
    /// Boundary condition: an entry is valid iff `now - stored_at < ttl`, so
    /// it is already expired once exactly `ttl` has elapsed. A zero TTL is
    /// therefore never valid.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) >= self.ttl
    }

    // == Time To Live ==
    /// Remaining lifetime, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at().saturating_duration_since(Instant::now())
    }
}
