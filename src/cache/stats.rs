//! Cache counters
//!
//! Lookup outcomes since startup, reported by the stats endpoint.

use serde::Serialize;

/// Lookup counters plus the current entry count.
///
/// An expired lookup is also a miss: `hits + misses` is always the number of
/// lookups performed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups answered with a fresh entry
    pub hits: u64,
    /// Lookups that found nothing valid (absent or expired)
    pub misses: u64,
    /// Lookups that found an expired entry
    pub expired: u64,
    /// Entries currently stored, stale ones included
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of lookups served fresh; 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            lookups => self.hits as f64 / lookups as f64,
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// A lookup found an expired entry.
    pub fn record_expired(&mut self) {
        self.expired += 1;
        self.record_miss();
    }

    pub fn set_total_entries(&mut self, entries: usize) {
        self.total_entries = entries;
    }
}
