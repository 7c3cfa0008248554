//! Upstream HTTP client for the sibling service (brands + rost product feed).
//!
//! ## Session Retry
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Session Retry Helper                                │
//! │                                                                         │
//! │  fetch ──► upstream responds                                            │
//! │              │                                                          │
//! │              ├─ 2xx ──────────────► done (attempt counter forgotten)    │
//! │              │                                                          │
//! │              ├─ error body contains the session marker                  │
//! │              │      │                                                   │
//! │              │      ▼                                                   │
//! │              │   attempts < 3 ? wait fixed delay, fetch again           │
//! │              │   attempts = 3 ? give up with SessionError               │
//! │              │                                                          │
//! │              └─ any other error ──► returned immediately, no retry      │
//! │                                                                         │
//! │  The upstream occasionally drops its session mid-deploy and answers     │
//! │  with a recognizable error body until it re-establishes one. That is    │
//! │  the only failure worth retrying; everything else is reported as-is.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use reqwest::StatusCode;
use tracing::{debug, warn};

use rost_core::Brand;

/// Error body substring that identifies a transient upstream session drop.
pub const SESSION_ERROR_MARKER: &str = "session expired";

/// Maximum fetch attempts for a session-marked failure.
pub const MAX_SESSION_ATTEMPTS: u32 = 3;

/// Fixed wait between session retries.
const SESSION_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Errors from the upstream service.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream resource not found: {path}")]
    NotFound { path: String },

    #[error("Upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Upstream payload decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Upstream session error after {attempts} attempts: {body}")]
    Session { attempts: u32, body: String },
}

/// Client for the sibling HTTP service.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    /// Base URL for brands.
    brands_base: String,
    /// Base URL for the rost product feed (may be a different host).
    feed_base: String,
    /// Wait between session retries; shortened in tests.
    retry_delay: Duration,
}

impl UpstreamClient {
    /// Creates a new upstream client.
    pub fn new(brands_base: impl Into<String>, feed_base: impl Into<String>) -> Self {
        UpstreamClient {
            http: reqwest::Client::new(),
            brands_base: brands_base.into(),
            feed_base: feed_base.into(),
            retry_delay: SESSION_RETRY_DELAY,
        }
    }

    /// Overrides the session retry delay.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Fetches the brand list from upstream.
    pub async fn fetch_brands(&self) -> Result<Vec<Brand>, UpstreamError> {
        let url = format!("{}/brands", self.brands_base);
        let body = self.get_with_session_retry(&url).await?;

        let brands: Vec<Brand> = serde_json::from_str(&body)?;
        Ok(brands)
    }

    /// Fetches a single rost product from the feed.
    ///
    /// The payload shape belongs to the upstream; it is proxied through
    /// untouched as JSON.
    pub async fn fetch_rost_product(&self, id: &str) -> Result<serde_json::Value, UpstreamError> {
        let url = format!("{}/rost-products/{}", self.feed_base, id);
        let body = self.get_with_session_retry(&url).await?;

        let value: serde_json::Value = serde_json::from_str(&body)?;
        Ok(value)
    }

    /// GET with the bounded session retry described in the module docs.
    async fn get_with_session_retry(&self, url: &str) -> Result<String, UpstreamError> {
        let mut attempt = 1u32;

        loop {
            match self.get_once(url).await {
                Ok(body) => {
                    if attempt > 1 {
                        debug!(url = %url, attempt, "Upstream recovered after session retry");
                    }
                    return Ok(body);
                }
                Err(UpstreamError::Status { status, body })
                    if body.contains(SESSION_ERROR_MARKER) =>
                {
                    if attempt >= MAX_SESSION_ATTEMPTS {
                        return Err(UpstreamError::Session {
                            attempts: attempt,
                            body,
                        });
                    }
                    warn!(url = %url, attempt, %status, "Upstream session error, retrying");
                    tokio::time::sleep(self.retry_delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn get_once(&self, url: &str) -> Result<String, UpstreamError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound {
                path: url.to_string(),
            });
        }

        let body = response.text().await?;

        if !status.is_success() {
            return Err(UpstreamError::Status { status, body });
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_upstream_is_not_retried() {
        // Nothing listens on this port; a connect error is not a session
        // error, so it must surface on the first attempt.
        let client = UpstreamClient::new("http://127.0.0.1:9/api", "http://127.0.0.1:9/api")
            .with_retry_delay(Duration::from_millis(1));

        let started = std::time::Instant::now();
        let err = client.fetch_brands().await.unwrap_err();
        assert!(matches!(err, UpstreamError::Http(_)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_malformed_payload_maps_to_decode_error() {
        let parse_err = serde_json::from_str::<Vec<Brand>>("not json").unwrap_err();
        let err = UpstreamError::from(parse_err);
        assert!(matches!(err, UpstreamError::Decode(_)));

        // The message must describe a decode failure, not a 200 response.
        let message = err.to_string();
        assert!(message.starts_with("Upstream payload decode failed"));
        assert!(!message.contains("200"));
    }

    #[test]
    fn test_session_marker_detection() {
        let body = format!("{{\"error\":\"{} at gateway\"}}", SESSION_ERROR_MARKER);
        assert!(body.contains(SESSION_ERROR_MARKER));
        assert!(!"{\"error\":\"timeout\"}".contains(SESSION_ERROR_MARKER));
    }
}
