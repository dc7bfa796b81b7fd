//! API Handlers
//!
//! HTTP request handlers for the gateway endpoints. Proxy handlers always
//! answer 200 with a renderable payload; only malformed requests get a 400.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::HeaderValue,
    response::{IntoResponse, Response},
    Json,
};
use tokio::time::Instant;
use tracing::info;

use crate::cache::{self, shared_cache, ApiRequest};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::fetch::{Orchestrator, Served};
use crate::limiter::RateLimiter;
use crate::models::{
    ClearResponse, DiagnosticsResponse, FootballQuery, HealthResponse, StatsResponse,
    TeamMatchesQuery,
};
use crate::upstream::HttpUpstream;

/// Response header naming where the payload came from
pub const CACHE_SOURCE_HEADER: &str = "x-cache";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-fronted, rate-limited upstream access
    pub orchestrator: Arc<Orchestrator>,
    /// Whether diagnostics may show raw error text
    pub expose_error_details: bool,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            expose_error_details: false,
        }
    }

    pub fn with_error_details(mut self, expose: bool) -> Self {
        self.expose_error_details = expose;
        self
    }

    /// Composition root: one cache, one gate per strategy, one HTTP client.
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let upstream = HttpUpstream::new(
            config.api_base_url.clone(),
            config.api_key.clone(),
            config.upstream_timeout(),
        )?;
        let listing_gate = RateLimiter::sliding_window(config.max_requests, config.rate_window());
        let detail_gate = RateLimiter::fixed_interval(config.detail_min_interval());

        let orchestrator = Orchestrator::new(
            shared_cache(),
            Arc::new(upstream),
            Arc::new(listing_gate),
            Arc::new(detail_gate),
        )
        .with_ttl_policy(config.ttl)
        .with_timeout(config.upstream_timeout());

        Ok(Self::new(orchestrator).with_error_details(config.development))
    }
}

fn served_response(served: Served) -> Response {
    let source = served.source.as_str();
    let mut response = Json(served.payload).into_response();
    response
        .headers_mut()
        .insert(CACHE_SOURCE_HEADER, HeaderValue::from_static(source));
    response
}

/// Handler for GET /api/football
///
/// Generic proxy: `endpoint` selects the upstream path, every other query
/// parameter is forwarded.
pub async fn football_handler(
    State(state): State<AppState>,
    Query(query): Query<FootballQuery>,
) -> Result<Response> {
    let request = query.into_request()?;
    let served = state.orchestrator.fetch(&request).await;
    Ok(served_response(served))
}

/// Handler for GET /api/matches/:id
pub async fn match_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Response> {
    let request = ApiRequest::new(&format!("/matches/{id}"))?;
    let served = state.orchestrator.fetch(&request).await;
    Ok(served_response(served))
}

/// Handler for GET /api/teams/:id/matches
pub async fn team_matches_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<TeamMatchesQuery>,
) -> Result<Response> {
    let request = query.into_request(id)?;
    let served = state.orchestrator.fetch(&request).await;
    Ok(served_response(served))
}

/// Handler for GET /api/competitions/:code/standings
pub async fn standings_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response> {
    let code = competition_code(&code)?;
    let request = ApiRequest::new(&format!("/competitions/{code}/standings"))?.with_params(params);
    let served = state.orchestrator.fetch(&request).await;
    Ok(served_response(served))
}

/// Competition codes are plain alphanumeric tags (`PL`, `2021`); anything
/// else could rewrite the upstream path or its query.
fn competition_code(code: &str) -> Result<&str> {
    if !code.is_empty() && code.bytes().all(|b| b.is_ascii_alphanumeric()) {
        Ok(code)
    } else {
        Err(ApiError::InvalidRequest(format!(
            "Invalid competition code: {code}"
        )))
    }
}

/// Handler for POST /api/cache/clear
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = cache::lock(state.orchestrator.cache()).clear();
    info!("Cache cleared by operator: {} entries removed", cleared);
    Json(ClearResponse::new(cleared))
}

/// Handler for GET /api/cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = cache::lock(state.orchestrator.cache()).stats();
    let (listing, detail) = state.orchestrator.limiter_snapshots();
    Json(StatsResponse::new(&stats, listing, detail))
}

/// Handler for GET /api/diagnostics/upstream
///
/// Runs one orchestration and reports how it went.
pub async fn diagnostics_handler(
    State(state): State<AppState>,
    Query(query): Query<FootballQuery>,
) -> Result<Json<DiagnosticsResponse>> {
    let request = query.into_request()?;

    let started = Instant::now();
    let served = state.orchestrator.fetch(&request).await;
    let latency_ms = started.elapsed().as_millis() as u64;

    Ok(Json(DiagnosticsResponse::new(
        request.cache_key(),
        request.collection_field(),
        &served,
        latency_ms,
        state.expose_error_details,
    )))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::Source;
    use crate::upstream::mock::ScriptedUpstream;
    use serde_json::json;
    use std::time::Duration;

    fn state_with(upstream: ScriptedUpstream) -> AppState {
        let orchestrator = Orchestrator::new(
            shared_cache(),
            Arc::new(upstream),
            Arc::new(RateLimiter::sliding_window(10, Duration::from_secs(60))),
            Arc::new(RateLimiter::fixed_interval(Duration::from_millis(10))),
        );
        AppState::new(orchestrator)
    }

    #[tokio::test]
    async fn test_football_handler_marks_source() {
        let state = state_with(ScriptedUpstream::always(json!({"matches": [{"id": 1}]})));
        let query = FootballQuery {
            endpoint: Some("/matches".to_string()),
            params: HashMap::new(),
        };

        let first = football_handler(State(state.clone()), Query(query.clone()))
            .await
            .unwrap();
        assert_eq!(first.headers()[CACHE_SOURCE_HEADER], "upstream");

        let second = football_handler(State(state), Query(query)).await.unwrap();
        assert_eq!(second.headers()[CACHE_SOURCE_HEADER], "cache");
    }

    #[tokio::test]
    async fn test_football_handler_rejects_bad_endpoint() {
        let state = state_with(ScriptedUpstream::new());
        let query = FootballQuery {
            endpoint: Some("no-slash".to_string()),
            params: HashMap::new(),
        };

        assert!(football_handler(State(state), Query(query)).await.is_err());
    }

    #[tokio::test]
    async fn test_clear_cache_handler() {
        let state = state_with(ScriptedUpstream::always(json!({"matches": []})));
        let request = ApiRequest::new("/matches").unwrap();
        state.orchestrator.fetch(&request).await;

        let response = clear_cache_handler(State(state.clone())).await;
        assert_eq!(response.cleared, 1);

        let stats = stats_handler(State(state)).await;
        assert_eq!(stats.total_entries, 0);
    }

    #[tokio::test]
    async fn test_diagnostics_handler_reports_failure_kind() {
        let state = state_with(ScriptedUpstream::new().then_status(403));
        let query = FootballQuery::default();

        let report = diagnostics_handler(State(state), Query(query)).await.unwrap();

        assert!(!report.ok);
        assert_eq!(report.source, Source::Upstream);
        assert_eq!(report.error_kind, Some("upstream_client_error"));
        assert_eq!(report.error_code, Some(403));
        assert_eq!(report.error, None);
    }

    #[test]
    fn test_competition_code_validation() {
        assert_eq!(competition_code("PL").unwrap(), "PL");
        assert_eq!(competition_code("2021").unwrap(), "2021");
        assert!(competition_code("").is_err());
        assert!(competition_code("PL?status=LIVE").is_err());
        assert!(competition_code("PL/matches").is_err());
        assert!(competition_code("P L").is_err());
    }

    #[tokio::test]
    async fn test_standings_handler_rejects_injected_query() {
        let upstream = Arc::new(ScriptedUpstream::always(json!({"standings": []})));
        let orchestrator = Orchestrator::new(
            shared_cache(),
            upstream.clone(),
            Arc::new(RateLimiter::sliding_window(10, Duration::from_secs(60))),
            Arc::new(RateLimiter::fixed_interval(Duration::from_millis(10))),
        );

        let result = standings_handler(
            State(AppState::new(orchestrator)),
            Path("PL?status=LIVE".to_string()),
            Query(HashMap::new()),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(upstream.calls(), 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_from_config_builds_state() {
        let state = AppState::from_config(&Config::default()).unwrap();
        assert!(!state.expose_error_details);
        assert!(cache::lock(state.orchestrator.cache()).is_empty());
    }
}
