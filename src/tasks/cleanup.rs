//! Stale Sweep Task
//!
//! Background task that drops cache entries which expired long ago.
//!
//! Lookups already evict expired entries lazily; this sweep only bounds the
//! memory held by keys that are never requested again. Recently expired
//! entries are kept so they can still be served as stale fallbacks.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::cache::{self, SharedCache};

/// Spawns a background task that periodically purges long-expired entries.
///
/// # Arguments
/// * `cache` - shared cache handle
/// * `interval` - time between sweeps
/// * `retention` - how long an expired entry is kept for stale fallback
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = shared_cache();
/// let handle = spawn_stale_sweeper(cache.clone(), Duration::from_secs(300), retention);
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_stale_sweeper(
    cache: SharedCache,
    interval: Duration,
    retention: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting stale cache sweeper: every {}s, retention {}s",
            interval.as_secs(),
            retention.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache::lock(&cache).purge_expired_before(Instant::now(), retention);

            if removed > 0 {
                info!("Stale sweep: removed {} long-expired entries", removed);
            } else {
                debug!("Stale sweep: nothing to remove");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{shared_cache, Lookup};
    use serde_json::json;

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_removes_long_expired_entries() {
        let cache = shared_cache();
        cache::lock(&cache).set("old", json!({"matches": []}), Duration::from_secs(1));

        let handle = spawn_stale_sweeper(
            cache.clone(),
            Duration::from_secs(10),
            Duration::from_secs(5),
        );

        tokio::time::sleep(Duration::from_secs(11)).await;

        assert_eq!(cache::lock(&cache).len(), 0);
        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_keeps_recently_expired_entries() {
        let cache = shared_cache();
        cache::lock(&cache).set("recent", json!({"matches": [1]}), Duration::from_secs(8));

        let handle = spawn_stale_sweeper(
            cache.clone(),
            Duration::from_secs(10),
            Duration::from_secs(60),
        );

        tokio::time::sleep(Duration::from_secs(11)).await;

        assert_eq!(
            cache::lock(&cache).lookup("recent"),
            Lookup::Expired(json!({"matches": [1]}))
        );
        handle.abort();
    }

    #[tokio::test]
    async fn test_sweeper_can_be_aborted() {
        let handle = spawn_stale_sweeper(shared_cache(), Duration::from_secs(1), Duration::ZERO);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
