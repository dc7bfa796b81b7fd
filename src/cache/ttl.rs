//! TTL policy
//!
//! Chooses how long a response may be cached from the request alone.
//! The more volatile the data, the shorter the lifetime.

use std::time::Duration;

use serde::Serialize;

use crate::cache::ApiRequest;

/// Response categories, most volatile first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheCategory {
    /// In-play match lists
    Live,
    /// Standings and top-scorer tables
    Standings,
    /// Match queries bounded by `dateFrom` and `dateTo`
    DateRange,
    /// Everything else
    Default,
}

impl CacheCategory {
    /// Classifies a request. First matching rule wins.
    pub fn of(request: &ApiRequest) -> Self {
        let live = request
            .param("status")
            .is_some_and(|status| {
                status
                    .split(',')
                    .any(|s| matches!(s.trim(), "LIVE" | "IN_PLAY"))
            });
        if live {
            return CacheCategory::Live;
        }

        let endpoint = request.endpoint();
        if endpoint.contains("/standings") || endpoint.contains("/scorers") {
            return CacheCategory::Standings;
        }

        if request.param("dateFrom").is_some() && request.param("dateTo").is_some() {
            return CacheCategory::DateRange;
        }

        CacheCategory::Default
    }
}

// == TTL Policy ==
/// Lifetimes per response category. Values are tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    pub live: Duration,
    pub standings: Duration,
    pub date_range: Duration,
    pub default: Duration,
    /// Lifetime of cached upstream error payloads
    pub error: Duration,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            live: Duration::from_secs(60),
            standings: Duration::from_secs(20 * 60),
            date_range: Duration::from_secs(10 * 60),
            default: Duration::from_secs(5 * 60),
            error: Duration::from_secs(30),
        }
    }
}

impl TtlPolicy {
    /// TTL for a successful response to `request`.
    pub fn ttl_for(&self, request: &ApiRequest) -> Duration {
        self.ttl_for_category(CacheCategory::of(request))
    }

    pub fn ttl_for_category(&self, category: CacheCategory) -> Duration {
        match category {
            CacheCategory::Live => self.live,
            CacheCategory::Standings => self.standings,
            CacheCategory::DateRange => self.date_range,
            CacheCategory::Default => self.default,
        }
    }

    /// TTL for a deliberately cached upstream error.
    pub fn error_ttl(&self) -> Duration {
        self.error
    }
}
