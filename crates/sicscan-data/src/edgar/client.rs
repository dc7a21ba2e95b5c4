//! SEC EDGAR HTTP client with rate limiting.

use crate::config::EdgarConfig;
use crate::error::{DataError, Result};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::debug;

/// Rate limiter to ensure we don't exceed SEC's rate limits
struct RateLimiter {
    last_request: Option<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    const fn new(min_interval: Duration) -> Self {
        Self {
            last_request: None,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

/// SEC EDGAR HTTP client with rate limiting.
///
/// Cloning is cheap; clones share the connection pool and the rate limiter.
#[derive(Clone)]
pub struct EdgarClient {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    config: Arc<EdgarConfig>,
}

impl EdgarClient {
    /// Creates a client from the configuration.
    ///
    /// # Example
    /// ```no_run
    /// use sicscan_data::{EdgarClient, EdgarConfig};
    /// use std::time::Duration;
    ///
    /// # fn example() -> sicscan_data::Result<()> {
    /// // 5 requests per second
    /// let config = EdgarConfig::default().with_min_interval(Duration::from_millis(200));
    /// let client = EdgarClient::new(config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: EdgarConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/json;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(config.min_interval))),
            config: Arc::new(config),
        })
    }

    /// Returns the configuration the client was built with.
    pub fn config(&self) -> &EdgarConfig {
        &self.config
    }

    /// Sends a rate-limited GET request and returns the response body.
    ///
    /// Returns `Ok(None)` on HTTP 404.
    ///
    /// # Errors
    ///
    /// `DataError::Network` on transport failure, `DataError::Http` on any other
    /// non-success status.
    pub async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<Option<String>> {
        self.rate_limiter.lock().await.wait().await;

        debug!(url, ?query, "EDGAR request");
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(DataError::Network)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(DataError::Http(format!("{url} returned HTTP {status}")));
        }

        let body = response.text().await.map_err(DataError::Network)?;
        Ok(Some(body))
    }
}

impl std::fmt::Debug for EdgarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgarClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rate_limiter_spaces_requests() {
        let mut limiter = RateLimiter::new(Duration::from_millis(50));

        let start = Instant::now();
        limiter.wait().await;
        limiter.wait().await;
        limiter.wait().await;

        // First call is immediate, the next two wait one interval each
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_rate_limiter_first_call_is_immediate() {
        let mut limiter = RateLimiter::new(Duration::from_secs(60));

        let start = Instant::now();
        limiter.wait().await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_client_debug_shows_config() {
        let client =
            EdgarClient::new(EdgarConfig::default().with_user_agent("test agent")).unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("EdgarClient"));
        assert!(debug.contains("test agent"));
        assert_eq!(client.config().page_size, 100);
    }
}
