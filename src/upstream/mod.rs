//! Upstream Module
//!
//! The football-data API as seen by the orchestrator: a function from a
//! request to a status plus (maybe) a JSON body, or a network failure.

mod http;
pub mod mock;

use async_trait::async_trait;
use serde_json::Value;

use crate::cache::ApiRequest;
use crate::error::FetchError;

pub use http::HttpUpstream;

/// Raw upstream answer, before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    /// HTTP status code
    pub status: u16,
    /// Parsed body, `None` when the body was not valid JSON
    pub body: Option<Value>,
}

impl UpstreamReply {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    /// A 200 reply with a JSON body.
    pub fn ok(body: Value) -> Self {
        Self::new(200, Some(body))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Upstream: Send + Sync {
    /// Performs one upstream call.
    ///
    /// Any HTTP status is a successful call; only transport failures are
    /// errors, and they are always [`FetchError::Network`].
    async fn fetch(&self, request: &ApiRequest) -> Result<UpstreamReply, FetchError>;
}
