//! Configuration Module
//!
//! Handles loading and managing gateway configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::TtlPolicy;

/// Gateway configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the football-data API
    pub api_base_url: String,
    /// API key sent as `X-Auth-Token`
    pub api_key: Option<String>,
    /// HTTP server port
    pub server_port: u16,
    /// Listing endpoints: admitted requests per window
    pub max_requests: usize,
    /// Listing endpoints: window length in seconds
    pub rate_window: u64,
    /// Detail endpoints: minimum spacing in milliseconds
    pub detail_min_interval_ms: u64,
    /// Upstream call timeout in seconds
    pub upstream_timeout: u64,
    /// Cache lifetimes per response category
    pub ttl: TtlPolicy,
    /// Stale sweep interval in seconds, 0 disables the sweeper
    pub cleanup_interval: u64,
    /// How long expired entries are kept for stale fallback, in seconds
    pub stale_retention: u64,
    /// Whether raw error details are exposed by diagnostics
    pub development: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `FOOTBALL_API_BASE_URL` - Upstream base URL (default: https://api.football-data.org/v4)
    /// - `FOOTBALL_API_KEY` - Upstream API key (default: unset)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `RATE_LIMIT_MAX_REQUESTS` - Listing requests per window (default: 10)
    /// - `RATE_LIMIT_WINDOW_SECS` - Listing window (default: 60)
    /// - `DETAIL_MIN_INTERVAL_MS` - Detail request spacing (default: 7000)
    /// - `UPSTREAM_TIMEOUT_SECS` - Upstream call timeout (default: 10)
    /// - `TTL_LIVE_SECS`, `TTL_STANDINGS_SECS`, `TTL_DATE_RANGE_SECS`,
    ///   `TTL_DEFAULT_SECS`, `TTL_ERROR_SECS` - Cache lifetimes (60/1200/600/300/30)
    /// - `CLEANUP_INTERVAL_SECS` - Stale sweep frequency (default: 300)
    /// - `STALE_RETENTION_SECS` - Stale retention (default: 3600)
    /// - `APP_ENV` - `development` exposes error details (default: production)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let ttl = TtlPolicy {
            live: secs_or("TTL_LIVE_SECS", defaults.ttl.live),
            standings: secs_or("TTL_STANDINGS_SECS", defaults.ttl.standings),
            date_range: secs_or("TTL_DATE_RANGE_SECS", defaults.ttl.date_range),
            default: secs_or("TTL_DEFAULT_SECS", defaults.ttl.default),
            error: secs_or("TTL_ERROR_SECS", defaults.ttl.error),
        };

        Self {
            api_base_url: env::var("FOOTBALL_API_BASE_URL").unwrap_or(defaults.api_base_url),
            api_key: env::var("FOOTBALL_API_KEY").ok().filter(|k| !k.is_empty()),
            server_port: parse_or("SERVER_PORT", defaults.server_port),
            max_requests: parse_or("RATE_LIMIT_MAX_REQUESTS", defaults.max_requests),
            rate_window: parse_or("RATE_LIMIT_WINDOW_SECS", defaults.rate_window),
            detail_min_interval_ms: parse_or(
                "DETAIL_MIN_INTERVAL_MS",
                defaults.detail_min_interval_ms,
            ),
            upstream_timeout: parse_or("UPSTREAM_TIMEOUT_SECS", defaults.upstream_timeout),
            ttl,
            cleanup_interval: parse_or("CLEANUP_INTERVAL_SECS", defaults.cleanup_interval),
            stale_retention: parse_or("STALE_RETENTION_SECS", defaults.stale_retention),
            development: env::var("APP_ENV").is_ok_and(|v| v.eq_ignore_ascii_case("development")),
        }
    }

    pub fn rate_window(&self) -> Duration {
        Duration::from_secs(self.rate_window)
    }

    pub fn detail_min_interval(&self) -> Duration {
        Duration::from_millis(self.detail_min_interval_ms)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.football-data.org/v4".to_string(),
            api_key: None,
            server_port: 3000,
            max_requests: 10,
            rate_window: 60,
            detail_min_interval_ms: 7000,
            upstream_timeout: 10,
            ttl: TtlPolicy::default(),
            cleanup_interval: 300,
            stale_retention: 3600,
            development: false,
        }
    }
}

fn parse_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn secs_or(name: &str, default: Duration) -> Duration {
    Duration::from_secs(parse_or(name, default.as_secs()))
}
