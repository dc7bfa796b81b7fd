//! Request and Response models for the gateway API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! deserializing query strings and serializing operator responses.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{FootballQuery, TeamMatchesQuery, DEFAULT_ENDPOINT};
pub use responses::{ClearResponse, DiagnosticsResponse, HealthResponse, StatsResponse};
