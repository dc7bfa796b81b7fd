//! Canonical request descriptors
//!
//! An [`ApiRequest`] is the logical request sent to the upstream API:
//! an endpoint path plus query parameters. Its cache key is deterministic,
//! so two requests with the same parameters in a different order share
//! one cache entry.

use std::collections::BTreeMap;
use std::fmt;

use url::form_urlencoded;

use crate::error::{ApiError, Result};

/// Path segments that name a response collection, in upstream vocabulary.
const COLLECTION_FIELDS: &[&str] = &[
    "matches",
    "standings",
    "scorers",
    "competitions",
    "teams",
    "persons",
    "areas",
];

/// Collection used when no path segment names one.
const DEFAULT_COLLECTION: &str = "matches";

// == Api Request ==
/// A logical upstream request: endpoint plus sorted query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiRequest {
    endpoint: String,
    params: BTreeMap<String, String>,
}

impl ApiRequest {
    // == Constructor ==
    /// Parses an endpoint path.
    ///
    /// The path must start with `/`. An inline query string
    /// (`/matches?status=LIVE`) is percent-decoded and split into parameters.
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = endpoint.trim();
        let (path, query) = match endpoint.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (endpoint, None),
        };

        if !path.starts_with('/') {
            return Err(ApiError::InvalidRequest(format!(
                "Endpoint must start with '/': {endpoint}"
            )));
        }
        if path.chars().any(char::is_whitespace) {
            return Err(ApiError::InvalidRequest(format!(
                "Endpoint must not contain whitespace: {endpoint}"
            )));
        }

        let trimmed = path.trim_end_matches('/');
        let mut request = Self {
            endpoint: if trimmed.is_empty() { "/".to_string() } else { trimmed.to_string() },
            params: BTreeMap::new(),
        };

        let pairs = query.map(|q| form_urlencoded::parse(q.as_bytes()));
        for (name, value) in pairs.into_iter().flatten() {
            request.insert_param(&name, &value);
        }

        Ok(request)
    }

    /// Adds a query parameter. Empty names or values are ignored.
    pub fn with_param(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.insert_param(name.as_ref(), value.as_ref());
        self
    }

    /// Adds every parameter from an iterator of pairs.
    pub fn with_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in params {
            self.insert_param(name.as_ref(), value.as_ref());
        }
        self
    }

    fn insert_param(&mut self, name: &str, value: &str) {
        let (name, value) = (name.trim(), value.trim());
        if !name.is_empty() && !value.is_empty() {
            self.params.insert(name.to_string(), value.to_string());
        }
    }

    // == Accessors ==
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    // == Cache Key ==
    /// Canonical key: `endpoint?a=1&b=2` with parameter names sorted and
    /// names and values form-urlencoded, so a value containing `&` or `=`
    /// cannot pass for two parameters.
    pub fn cache_key(&self) -> String {
        self.to_string()
    }

    // == Shape ==
    /// Top-level collection field every response for this request carries.
    ///
    /// `/competitions/PL/standings` -> `standings`, `/matches/42` -> `matches`.
    pub fn collection_field(&self) -> &'static str {
        self.segments()
            .rev()
            .find_map(|segment| COLLECTION_FIELDS.iter().copied().find(|f| *f == segment))
            .unwrap_or(DEFAULT_COLLECTION)
    }

    /// Whether the request targets a single entity (`/matches/{id}`).
    pub fn is_detail(&self) -> bool {
        self.segments()
            .last()
            .is_some_and(|segment| segment.bytes().all(|b| b.is_ascii_digit()))
    }

    fn segments(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
        self.endpoint.split('/').filter(|s| !s.is_empty())
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.endpoint)?;
        if self.params.is_empty() {
            return Ok(());
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.params)
            .finish();
        write!(f, "?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(endpoint: &str) -> ApiRequest {
        ApiRequest::new(endpoint).unwrap()
    }

    #[test]
    fn test_key_is_order_independent() {
        let a = req("/matches")
            .with_param("status", "LIVE")
            .with_param("competitions", "PL");
        let b = req("/matches")
            .with_param("competitions", "PL")
            .with_param("status", "LIVE");

        assert_eq!(a.cache_key(), b.cache_key());
        assert_eq!(a.cache_key(), "/matches?competitions=PL&status=LIVE");
    }

    #[test]
    fn test_reserved_characters_do_not_split_params() {
        let packed = req("/teams").with_param("a", "1&b=2");
        let split = req("/teams").with_param("a", "1").with_param("b", "2");

        assert_ne!(packed.cache_key(), split.cache_key());
        assert_eq!(packed.cache_key(), "/teams?a=1%26b%3D2");
    }

    #[test]
    fn test_inline_query_is_decoded() {
        let inline = req("/teams?a=1%26b%3D2&q=Real+Madrid");

        assert_eq!(inline.param("a"), Some("1&b=2"));
        assert_eq!(inline.param("q"), Some("Real Madrid"));
        let built = req("/teams")
            .with_param("a", "1&b=2")
            .with_param("q", "Real Madrid");
        assert_eq!(inline, built);
    }

    #[test]
    fn test_key_without_params() {
        assert_eq!(req("/competitions").cache_key(), "/competitions");
    }

    #[test]
    fn test_inline_query_is_parsed() {
        let inline = req("/matches?status=LIVE&competitions=PL");
        let built = req("/matches")
            .with_param("competitions", "PL")
            .with_param("status", "LIVE");
        assert_eq!(inline, built);
    }

    #[test]
    fn test_different_params_different_keys() {
        let a = req("/matches").with_param("dateFrom", "2024-01-01");
        let b = req("/matches").with_param("dateFrom", "2024-01-02");
        assert_ne!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn test_empty_values_are_dropped() {
        let r = req("/matches").with_param("status", "").with_param("limit", "10");
        assert_eq!(r.cache_key(), "/matches?limit=10");
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        assert_eq!(req("/matches/").cache_key(), req("/matches").cache_key());
    }

    #[test]
    fn test_invalid_endpoints() {
        assert!(ApiRequest::new("matches").is_err());
        assert!(ApiRequest::new("").is_err());
        assert!(ApiRequest::new("/mat ches").is_err());
    }

    #[test]
    fn test_collection_field() {
        assert_eq!(req("/matches").collection_field(), "matches");
        assert_eq!(req("/matches/42").collection_field(), "matches");
        assert_eq!(req("/competitions/PL/standings").collection_field(), "standings");
        assert_eq!(req("/competitions/PL/scorers").collection_field(), "scorers");
        assert_eq!(req("/teams/65/matches").collection_field(), "matches");
        assert_eq!(req("/competitions").collection_field(), "competitions");
        assert_eq!(req("/unknown").collection_field(), "matches");
    }

    #[test]
    fn test_is_detail() {
        assert!(req("/matches/42").is_detail());
        assert!(req("/teams/65").is_detail());
        assert!(!req("/matches").is_detail());
        assert!(!req("/teams/65/matches").is_detail());
        assert!(!req("/competitions/PL").is_detail());
    }
}
