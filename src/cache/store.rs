//! Cache Store Module
//!
//! Main cache engine: a HashMap of JSON payloads, each with its own TTL.
//! `get` drops expired entries lazily; `lookup` keeps them readable as stale
//! data until the sweeper purges them.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Lookup ==
/// Result of a cache lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// Entry present and still valid
    Fresh(Value),
    /// Entry present but past its TTL; it stays stored for later fallbacks
    Expired(Value),
    /// No entry for the key
    Missing,
}

impl Lookup {
    /// The value if it was fresh.
    pub fn fresh(self) -> Option<Value> {
        match self {
            Lookup::Fresh(value) => Some(value),
            _ => None,
        }
    }
}

// == Cache Store ==
/// In-memory TTL cache keyed by canonical request strings.
///
/// Unbounded: growth is limited only by the number of distinct request keys
/// and by the optional stale sweeper.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl`, replacing any previous entry.
    pub fn set(&mut self, key: impl Into<String>, value: Value, ttl: Duration) {
        self.set_at(key, value, ttl, Instant::now());
    }

    /// Same as [`set`](Self::set) with an explicit storage time.
    pub fn set_at(&mut self, key: impl Into<String>, value: Value, ttl: Duration, now: Instant) {
        self.entries
            .insert(key.into(), CacheEntry::new_at(value, ttl, now));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns the value if present and unexpired.
    ///
    /// An expired entry is removed as a side effect.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        self.get_at(key, Instant::now())
    }

    pub fn get_at(&mut self, key: &str, now: Instant) -> Option<Value> {
        match self.lookup_at(key, now) {
            Lookup::Fresh(value) => Some(value),
            Lookup::Expired(_) => {
                self.entries.remove(key);
                self.stats.set_total_entries(self.entries.len());
                None
            }
            Lookup::Missing => None,
        }
    }

    // == Lookup ==
    /// Like [`get`](Self::get), but hands back an expired value instead of
    /// discarding it so the caller can use it as a last resort.
    ///
    /// The expired entry stays in place, so every fallback until the next
    /// overwrite, sweep or clear can still serve it.
    pub fn lookup(&mut self, key: &str) -> Lookup {
        self.lookup_at(key, Instant::now())
    }

    pub fn lookup_at(&mut self, key: &str, now: Instant) -> Lookup {
        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            return Lookup::Missing;
        };

        if entry.is_expired_at(now) {
            self.stats.record_expired();
            Lookup::Expired(entry.value.clone())
        } else {
            self.stats.record_hit();
            Lookup::Fresh(entry.value.clone())
        }
    }

    // == Clear ==
    /// Removes every entry. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.stats.set_total_entries(0);
        count
    }

    // == Purge ==
    /// Removes entries that expired more than `retention` before `now`.
    ///
    /// Recently expired entries are kept so that they can still be served as
    /// stale data. Returns the number of entries removed.
    pub fn purge_expired_before(&mut self, now: Instant, retention: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| {
            !entry.is_expired_at(now) || now.duration_since(entry.expires_at()) < retention
        });
        self.stats.set_total_entries(self.entries.len());
        before - self.entries.len()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
