//! reqwest-backed upstream client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::debug;

use super::{Upstream, UpstreamReply};
use crate::cache::ApiRequest;
use crate::error::FetchError;

/// Header carrying the football-data API key
const AUTH_HEADER: &str = "X-Auth-Token";

/// Client for the football-data HTTP API.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl HttpUpstream {
    /// Builds a client whose every call is bounded by `timeout`.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let http = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.base_url, request.endpoint())
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn fetch(&self, request: &ApiRequest) -> Result<UpstreamReply, FetchError> {
        let url = self.url_for(request);
        debug!("Fetching {}", request);

        let mut builder = self
            .http
            .get(&url)
            .query(request.params())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(key) = &self.api_key {
            builder = builder.header(AUTH_HEADER, key);
        }

        let response = builder.send().await.map_err(network_error)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(network_error)?;

        Ok(UpstreamReply::new(status, serde_json::from_slice(&bytes).ok()))
    }
}

fn network_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Network(format!("request timed out: {err}"))
    } else {
        FetchError::Network(err.to_string())
    }
}
