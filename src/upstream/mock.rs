//! Scripted upstream for testing
//!
//! Plays back a queue of replies and records every request, so tests can
//! assert how often the real API would have been called.
//!
//! # Example
//! ```ignore
//! let upstream = ScriptedUpstream::new()
//!     .then_reply(UpstreamReply::ok(json!({"matches": []})))
//!     .then_status(429);
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use super::{Upstream, UpstreamReply};
use crate::cache::ApiRequest;
use crate::error::FetchError;

/// One scripted upstream behaviour.
#[derive(Debug, Clone)]
pub enum Step {
    Reply(UpstreamReply),
    Fail(FetchError),
    /// Never answers; only a timeout ends the call
    Hang,
}

#[derive(Debug)]
pub struct ScriptedUpstream {
    /// Steps consumed in order
    script: Mutex<VecDeque<Step>>,
    /// Step used once the script is exhausted
    otherwise: Step,
    calls: AtomicUsize,
    requests: Mutex<Vec<ApiRequest>>,
}

impl Default for ScriptedUpstream {
    fn default() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            otherwise: Step::Fail(FetchError::Network("no scripted reply".to_string())),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every call with `body` and status 200.
    pub fn always(body: Value) -> Self {
        Self {
            otherwise: Step::Reply(UpstreamReply::ok(body)),
            ..Self::default()
        }
    }

    pub fn then(self, step: Step) -> Self {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(step);
        self
    }

    pub fn then_reply(self, reply: UpstreamReply) -> Self {
        self.then(Step::Reply(reply))
    }

    pub fn then_json(self, body: Value) -> Self {
        self.then_reply(UpstreamReply::ok(body))
    }

    /// Queues an error status with a football-data style message body.
    pub fn then_status(self, status: u16) -> Self {
        let body = serde_json::json!({
            "message": format!("upstream status {status}"),
            "errorCode": status,
        });
        self.then_reply(UpstreamReply::new(status, Some(body)))
    }

    pub fn then_fail(self, err: FetchError) -> Self {
        self.then(Step::Fail(err))
    }

    pub fn then_hang(self) -> Self {
        self.then(Step::Hang)
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received, in call order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Upstream for ScriptedUpstream {
    async fn fetch(&self, request: &ApiRequest) -> Result<UpstreamReply, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let step = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| self.otherwise.clone());

        match step {
            Step::Reply(reply) => Ok(reply),
            Step::Fail(err) => Err(err),
            Step::Hang => std::future::pending().await,
        }
    }
}
