//! API Module
//!
//! HTTP handlers and routing for the gateway.
//!
//! # Endpoints
//! - `GET /api/football` - Cached, rate-limited proxy to the football-data API
//! - `GET /api/matches/:id`, `/api/teams/:id/matches`, `/api/competitions/:code/standings`
//! - `POST /api/cache/clear` - Operator cache invalidation
//! - `GET /api/cache/stats` - Cache statistics
//! - `GET /api/diagnostics/upstream` - Operator upstream test
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
