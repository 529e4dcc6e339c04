//! Recording transport for tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{ApiRequest, ApiResponse, ApiTransport};
use crate::{Error, Result};

#[derive(Debug, Default)]
struct MockState {
    requests: Vec<ApiRequest>,
    replies: VecDeque<Result<ApiResponse>>,
}

/// Transport that records requests and answers with queued replies.
///
/// When the queue is empty it answers `204 No Content`. Clones share state, so
/// a test can keep one handle while the client owns another.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Creates a transport with no queued replies.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queues a successful reply.
    pub fn reply(&self, response: ApiResponse) -> &Self {
        self.state().replies.push_back(Ok(response));
        self
    }

    /// Queues a `200 OK` JSON reply.
    pub fn reply_json(&self, value: serde_json::Value) -> &Self {
        self.reply(ApiResponse::json(&value))
    }

    /// Queues a failure.
    pub fn fail(&self, error: Error) -> &Self {
        self.state().replies.push_back(Err(error));
        self
    }

    /// Returns all requests sent so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state().requests.clone()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.state().requests.last().cloned()
    }
}

#[async_trait::async_trait]
impl ApiTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut state = self.state();
        state.requests.push(request);
        state
            .replies
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::no_content()))
    }
}
