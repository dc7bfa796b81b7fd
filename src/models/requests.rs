//! Request DTOs for the gateway API
//!
//! Query strings of the proxy endpoints become [`ApiRequest`]s here.

use std::collections::HashMap;

use serde::Deserialize;

use crate::cache::ApiRequest;
use crate::error::Result;

/// Endpoint used when `/api/football` is called without one
pub const DEFAULT_ENDPOINT: &str = "/matches";

/// Query string of `GET /api/football` and the diagnostics endpoint.
///
/// # Fields
/// - `endpoint`: upstream path, e.g. `/competitions/PL/standings`
/// - everything else: forwarded as upstream query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FootballQuery {
    /// Upstream endpoint path
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Remaining query parameters
    #[serde(flatten)]
    pub params: HashMap<String, String>,
}

impl FootballQuery {
    /// Builds the logical upstream request.
    pub fn into_request(self) -> Result<ApiRequest> {
        let endpoint = self
            .endpoint
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        Ok(ApiRequest::new(&endpoint)?.with_params(self.params))
    }
}

/// Query string of the team-matches convenience route.
///
/// A `status` of `ALL` means no status filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamMatchesQuery {
    #[serde(flatten)]
    pub params: HashMap<String, String>,
}

impl TeamMatchesQuery {
    pub fn into_request(self, team_id: u64) -> Result<ApiRequest> {
        let params = self
            .params
            .into_iter()
            .filter(|(name, value)| !(name == "status" && value.eq_ignore_ascii_case("ALL")));
        Ok(ApiRequest::new(&format!("/teams/{team_id}/matches"))?.with_params(params))
    }
}
