//! EDGAR client configuration.

use std::time::Duration;

/// Browser-like user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/111.0.0.0 Safari/537.36";

/// EDGAR company browser endpoint.
pub const DEFAULT_DIRECTORY_URL: &str = "https://www.sec.gov/cgi-bin/browse-edgar";

/// XBRL company facts base URL.
pub const DEFAULT_FACTS_URL: &str = "https://data.sec.gov/api/xbrl/companyfacts";

/// Number of companies the directory returns per page.
pub const DIRECTORY_PAGE_SIZE: usize = 100;

/// Default rate limit: 10 requests per second (SEC requirement)
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Pause between directory pages.
const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(1);

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable settings shared by every EDGAR request.
///
/// Built once and handed to [`EdgarClient::new`](crate::EdgarClient::new).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgarConfig {
    /// `User-Agent` header value
    pub user_agent: String,
    /// Company browser endpoint
    pub directory_url: String,
    /// Company facts base URL, without trailing slash
    pub facts_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Minimum delay between any two requests
    pub min_interval: Duration,
    /// Directory page size; a shorter page ends pagination
    pub page_size: usize,
    /// Delay between directory pages
    pub page_delay: Duration,
}

impl Default for EdgarConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            facts_url: DEFAULT_FACTS_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            min_interval: DEFAULT_MIN_INTERVAL,
            page_size: DIRECTORY_PAGE_SIZE,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }
}

impl EdgarConfig {
    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the company browser endpoint.
    #[must_use]
    pub fn with_directory_url(mut self, url: impl Into<String>) -> Self {
        self.directory_url = url.into();
        self
    }

    /// Sets the company facts base URL.
    #[must_use]
    pub fn with_facts_url(mut self, url: impl Into<String>) -> Self {
        self.facts_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the minimum interval between requests.
    #[must_use]
    pub const fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    /// Sets the delay between directory pages.
    #[must_use]
    pub const fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EdgarConfig::default();
        assert_eq!(config.page_size, 100);
        assert_eq!(config.page_delay, Duration::from_secs(1));
        assert_eq!(config.min_interval, Duration::from_millis(100));
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_builders() {
        let config = EdgarConfig::default()
            .with_user_agent("sicscan admin@example.com")
            .with_facts_url("http://localhost:8080/facts/")
            .with_page_delay(Duration::ZERO);

        assert_eq!(config.user_agent, "sicscan admin@example.com");
        assert_eq!(config.facts_url, "http://localhost:8080/facts");
        assert_eq!(config.page_delay, Duration::ZERO);
    }
}
