//! Canned feed client for testing.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{Result, UpgradeError};

use super::{FeedClient, FeedResponse};

/// Feed client that serves pre-registered responses.
///
/// Unknown URLs fail with a request error, like an unreachable host.
#[derive(Debug, Default)]
pub struct MockFeedClient {
    responses: HashMap<String, FeedResponse>,
    requested: RefCell<Vec<String>>,
}

impl MockFeedClient {
    /// Create a client with no registered URLs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with `status` for `url`.
    pub fn with_response(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses.insert(
            url.to_string(),
            FeedResponse {
                status,
                body: body.as_bytes().to_vec(),
            },
        );
        self
    }

    /// URLs requested so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl FeedClient for MockFeedClient {
    fn get(&self, url: &str) -> Result<FeedResponse> {
        self.requested.borrow_mut().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| UpgradeError::FeedRequest {
                url: url.to_string(),
                message: "connection refused".to_string(),
            })
    }
}
