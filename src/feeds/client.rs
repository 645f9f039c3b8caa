//! HTTP access to release feeds.
//!
//! A feed fetch is a single blocking GET. The status code is handed back as
//! data so callers can tell "the feed is down" apart from "the feed changed
//! shape".

use anyhow::Context;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::{Result, UpgradeError};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw response from a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
}

impl FeedResponse {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Fail with [`UpgradeError::FeedStatus`] unless the status is 2xx.
    pub fn require_success(self, url: &str) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(UpgradeError::FeedStatus {
                url: url.to_string(),
                status: self.status,
            })
        }
    }
}

/// Fetches release feeds.
pub trait FeedClient {
    /// Perform a GET request.
    ///
    /// Only transport problems are errors; any HTTP status is a response.
    fn get(&self, url: &str) -> Result<FeedResponse>;
}

/// Fetches feeds over HTTP/HTTPS.
pub struct HttpFeedClient {
    client: Client,
}

impl HttpFeedClient {
    /// Create a client with the default 30-second timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("upgrade-all/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl FeedClient for HttpFeedClient {
    fn get(&self, url: &str) -> Result<FeedResponse> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| UpgradeError::FeedRequest {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response.bytes().map_err(|e| UpgradeError::FeedRequest {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        debug!("{} answered HTTP {} ({} bytes)", url, status, body.len());

        Ok(FeedResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn get_returns_status_and_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/data.json");
            then.status(200).body("[]");
        });

        let client = HttpFeedClient::new().unwrap();
        let response = client.get(&server.url("/data.json")).unwrap();

        mock.assert();
        assert_eq!(response.status, 200);
        assert_eq!(response.text(), "[]");
        assert!(response.is_success());
    }

    #[test]
    fn non_success_status_is_data_not_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/releases/");
            then.status(503).body("down for maintenance");
        });

        let client = HttpFeedClient::new().unwrap();
        let response = client.get(&server.url("/releases/")).unwrap();

        assert_eq!(response.status, 503);
        assert!(!response.is_success());
    }

    #[test]
    fn require_success_maps_status_to_error() {
        let response = FeedResponse {
            status: 404,
            body: Vec::new(),
        };
        let err = response.require_success("https://example.com").unwrap_err();
        assert!(matches!(err, UpgradeError::FeedStatus { status: 404, .. }));
    }

    #[test]
    fn unreachable_host_is_request_error() {
        let client = HttpFeedClient::with_timeout(Duration::from_secs(2)).unwrap();
        let err = client.get("http://127.0.0.1:1/feed").unwrap_err();
        assert!(matches!(err, UpgradeError::FeedRequest { .. }));
    }

    #[test]
    fn text_replaces_invalid_utf8() {
        let response = FeedResponse {
            status: 200,
            body: vec![b'o', b'k', 0xff],
        };
        assert!(response.text().starts_with("ok"));
    }
}
