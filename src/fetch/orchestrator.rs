//! Fetch orchestration
//!
//! Per request: cache check, admission, upstream call, classification, and
//! fallback. Every path ends in a [`Served`] payload; nothing is thrown.
//!
//! Concurrent misses on the same key are not coalesced: each one pays its own
//! admission and makes its own upstream call.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::payload::{error_payload, normalize_success, placeholder, upstream_message};
use super::{Served, Source};
use crate::cache::{self, ApiRequest, Lookup, SharedCache, TtlPolicy};
use crate::error::FetchError;
use crate::limiter::{Admission, LimiterSnapshot, RateLimiter};
use crate::upstream::{Upstream, UpstreamReply};

/// Default bound on a single upstream call
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

// == Orchestrator ==
pub struct Orchestrator {
    cache: SharedCache,
    upstream: Arc<dyn Upstream>,
    /// Fail-fast gate for listing endpoints
    listing_gate: Arc<RateLimiter>,
    /// Delaying gate for single-entity lookups
    detail_gate: Arc<RateLimiter>,
    ttl: TtlPolicy,
    timeout: Duration,
}

impl Orchestrator {
    /// Wires the orchestrator to its collaborators.
    ///
    /// The cache and gates are shared handles so the composition root can
    /// also hand them to operator tooling.
    pub fn new(
        cache: SharedCache,
        upstream: Arc<dyn Upstream>,
        listing_gate: Arc<RateLimiter>,
        detail_gate: Arc<RateLimiter>,
    ) -> Self {
        Self {
            cache,
            upstream,
            listing_gate,
            detail_gate,
            ttl: TtlPolicy::default(),
            timeout: DEFAULT_UPSTREAM_TIMEOUT,
        }
    }

    pub fn with_ttl_policy(mut self, ttl: TtlPolicy) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    pub fn ttl_policy(&self) -> &TtlPolicy {
        &self.ttl
    }

    /// Limiter views: (listing, detail).
    pub fn limiter_snapshots(&self) -> (LimiterSnapshot, LimiterSnapshot) {
        (self.listing_gate.snapshot(), self.detail_gate.snapshot())
    }

    // == Fetch ==
    /// Serves `request` from cache, upstream, or fallback.
    pub async fn fetch(&self, request: &ApiRequest) -> Served {
        let key = request.cache_key();

        // Cache hits never consult the limiter
        let lookup = cache::lock(&self.cache).lookup(&key);
        let stale = match lookup {
            Lookup::Fresh(value) => {
                debug!("Cache hit for {}", key);
                return Served::new(value, Source::Cache, None);
            }
            Lookup::Expired(value) => Some(value),
            Lookup::Missing => None,
        };

        let gate = if request.is_detail() {
            &self.detail_gate
        } else {
            &self.listing_gate
        };
        if gate.admit().await == Admission::Rejected {
            warn!("Rate limit exceeded, falling back for {}", key);
            return self.fallback(request, stale, FetchError::AdmissionRejected);
        }

        let reply = match tokio::time::timeout(self.timeout, self.upstream.fetch(request)).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(err)) => {
                error!("Upstream call failed for {}: {}", key, err);
                return self.fallback(request, stale, err);
            }
            Err(_) => {
                let err = FetchError::Network(format!(
                    "request timed out after {}ms",
                    self.timeout.as_millis()
                ));
                error!("Upstream call failed for {}: {}", key, err);
                return self.fallback(request, stale, err);
            }
        };

        self.store_reply(request, &key, reply)
    }

    /// Classifies an upstream reply and caches the outcome.
    fn store_reply(&self, request: &ApiRequest, key: &str, reply: UpstreamReply) -> Served {
        let field = request.collection_field();

        let failure = if reply.is_success() {
            match normalize_success(reply.body, field) {
                Ok(payload) => {
                    let ttl = self.ttl.ttl_for(request);
                    cache::lock(&self.cache).set(key, payload.clone(), ttl);
                    info!(
                        "API success: {}, cached for {}s, count: {}",
                        key,
                        ttl.as_secs(),
                        payload[field].as_array().map_or(0, Vec::len)
                    );
                    return Served::new(payload, Source::Upstream, None);
                }
                Err(err) => err,
            }
        } else {
            let message = upstream_message(reply.body.as_ref(), reply.status);
            FetchError::from_status(reply.status, message)
        };

        // Cached briefly so polling panels do not keep hitting a failing upstream
        let payload = error_payload(&failure, field);
        cache::lock(&self.cache).set(key, payload.clone(), self.ttl.error_ttl());
        warn!(
            "Upstream error for {}: {}, cached for {}s",
            key,
            failure,
            self.ttl.error_ttl().as_secs()
        );
        Served::new(payload, Source::Upstream, Some(failure))
    }

    /// Last resort: the expired entry if there was one, else a placeholder.
    /// Never touches the network.
    fn fallback(&self, request: &ApiRequest, stale: Option<Value>, err: FetchError) -> Served {
        match stale {
            Some(value) => {
                info!("Serving stale cache for {}", request);
                Served::new(value, Source::Stale, Some(err))
            }
            None => {
                info!("Serving placeholder for {}", request);
                let payload = placeholder(&err, request.collection_field());
                Served::new(payload, Source::Placeholder, Some(err))
            }
        }
    }
}
