//! Footy Cache - a caching gateway for the football-data API
//!
//! Serves football data from an in-memory TTL cache, rate-limits the calls
//! that reach the upstream API, and degrades to stale or placeholder data
//! instead of failing.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod limiter;
pub mod models;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use fetch::{Orchestrator, Served, Source};
pub use tasks::spawn_stale_sweeper;
