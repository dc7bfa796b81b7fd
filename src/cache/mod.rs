//! Cache Module
//!
//! In-memory caching of upstream responses with per-entry TTL and lazy expiry.

mod entry;
mod key;
mod stats;
mod store;
mod ttl;

#[cfg(test)]
mod property_tests;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// Re-export public types
pub use entry::CacheEntry;
pub use key::ApiRequest;
pub use stats::CacheStats;
pub use store::{CacheStore, Lookup};
pub use ttl::{CacheCategory, TtlPolicy};

/// Process-wide cache handle.
///
/// Cache operations never await, so a blocking mutex is held only for the
/// duration of a single map operation.
pub type SharedCache = Arc<Mutex<CacheStore>>;

/// Creates an empty shared cache.
pub fn shared_cache() -> SharedCache {
    Arc::new(Mutex::new(CacheStore::new()))
}

/// Locks the shared cache, recovering the store if a previous holder panicked.
pub fn lock(cache: &SharedCache) -> MutexGuard<'_, CacheStore> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}
