//! Response DTOs for the gateway API
//!
//! Defines the structure of the operator endpoints' response bodies. Proxy
//! endpoints return upstream payloads as-is.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::fetch::{Served, Source};
use crate::limiter::LimiterSnapshot;

/// Response body for `POST /api/cache/clear`
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    /// Number of entries removed
    pub cleared: usize,
}

impl ClearResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cache cleared ({} entries)", cleared),
            cleared,
        }
    }
}

/// Response body for `GET /api/cache/stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of fresh cache hits
    pub hits: u64,
    /// Number of misses, expired lookups included
    pub misses: u64,
    /// Number of lookups that found an expired entry
    pub expired: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Gate for listing endpoints
    pub listing_limiter: LimiterSnapshot,
    /// Gate for single-entity endpoints
    pub detail_limiter: LimiterSnapshot,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats, listing: LimiterSnapshot, detail: LimiterSnapshot) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            expired: stats.expired,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            listing_limiter: listing,
            detail_limiter: detail,
        }
    }
}

/// Response body for `GET /api/diagnostics/upstream`
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticsResponse {
    /// Canonical request key
    pub request: String,
    /// Whether fresh, error-free data was served
    pub ok: bool,
    /// Where the payload came from
    pub source: Source,
    /// Wall time of the orchestration in milliseconds
    pub latency_ms: u64,
    /// Collection field of the payload
    pub collection: &'static str,
    /// Number of items in the collection
    pub count: usize,
    /// Failure kind, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
    /// Failure code, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<u16>,
    /// Raw error text, development mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DiagnosticsResponse {
    pub fn new(
        request: String,
        collection: &'static str,
        served: &Served,
        latency_ms: u64,
        expose_details: bool,
    ) -> Self {
        let error = served.error.as_ref();
        Self {
            request,
            ok: !served.is_degraded(),
            source: served.source,
            latency_ms,
            collection,
            count: served.collection_len(collection),
            error_kind: error.map(|e| e.kind()),
            error_code: error.map(|e| e.error_code()),
            error: error.filter(|_| expose_details).map(|e| e.to_string()),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
