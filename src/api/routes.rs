//! API Routes
//!
//! Configures the Axum router with all gateway endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_cache_handler, diagnostics_handler, football_handler, health_handler,
    match_detail_handler, standings_handler, stats_handler, team_matches_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/football` - Generic cached proxy (`endpoint` + filters)
/// - `GET /api/matches/:id` - Single match
/// - `GET /api/teams/:id/matches` - Matches of one team
/// - `GET /api/competitions/:code/standings` - Competition table
/// - `POST /api/cache/clear` - Drop every cached response
/// - `GET /api/cache/stats` - Cache and limiter statistics
/// - `GET /api/diagnostics/upstream` - Test one upstream request
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (the UI is served from another origin)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/football", get(football_handler))
        .route("/api/matches/:id", get(match_detail_handler))
        .route("/api/teams/:id/matches", get(team_matches_handler))
        .route("/api/competitions/:code/standings", get(standings_handler))
        .route("/api/cache/clear", post(clear_cache_handler))
        .route("/api/cache/stats", get(stats_handler))
        .route("/api/diagnostics/upstream", get(diagnostics_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
