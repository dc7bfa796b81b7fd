//! What the orchestrator hands back

use serde::Serialize;
use serde_json::Value;

use crate::error::FetchError;

/// Where a served payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Fresh cache entry; includes briefly cached upstream errors
    Cache,
    /// This request's upstream call, successful or not
    Upstream,
    /// Expired cache entry served as a last resort
    Stale,
    /// Locally generated empty result
    Placeholder,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Cache => "cache",
            Source::Upstream => "upstream",
            Source::Stale => "stale",
            Source::Placeholder => "placeholder",
        }
    }
}

/// A payload that is always safe to render, plus why it may be degraded.
///
/// `payload` always carries its collection field as an array.
#[derive(Debug, Clone, PartialEq)]
pub struct Served {
    pub payload: Value,
    pub source: Source,
    pub error: Option<FetchError>,
}

impl Served {
    pub fn new(payload: Value, source: Source, error: Option<FetchError>) -> Self {
        Self {
            payload,
            source,
            error,
        }
    }

    /// True when the payload is not fresh upstream data.
    ///
    /// Error payloads served from cache carry no typed error, only `errorCode`.
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
            || self.payload.get("errorCode").is_some()
            || matches!(self.source, Source::Stale | Source::Placeholder)
    }

    /// Number of items in the collection field.
    pub fn collection_len(&self, field: &str) -> usize {
        self.payload
            .get(field)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Typed view for callers that want the failure instead of the payload.
    pub fn into_result(self) -> Result<Value, FetchError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.payload),
        }
    }
}
