//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - A fixed delay before every request
//! - Per-request timeouts for crawl pages
//! - Error classification
//!
//! There is no retry logic: a failed request is reported once.

use crate::config::{Config, UserAgentConfig};
use crate::{FetchError, ScoutError};
use reqwest::Client;
use std::time::Duration;

/// What a fetched page is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// A page being crawled for links
    Page,
    /// A GitHub repository page being scraped for metadata
    Repository,
}

/// Source of page bodies for the crawler
///
/// [`HttpFetcher`] is the production implementation; tests substitute
/// in-memory fetchers.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Fetches `url` and returns the response body
    async fn fetch(&self, url: &str, kind: FetchKind) -> Result<String, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// No overall request timeout is set on the client; crawl-page requests
/// add their own (see [`HttpFetcher`]).
///
/// # Example
///
/// ```no_run
/// use repo_scout::config::UserAgentConfig;
/// use repo_scout::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Rate-limited HTTP fetcher
///
/// # Request Flow
///
/// 1. Sleep for the configured delay
/// 2. Send a GET with the identifying `User-Agent`
///    - `Page` fetches carry the page timeout; `Repository` fetches do not
/// 3. Classify the response
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | body text |
/// | any other status | `FetchError::Status` |
/// | timeout, connection or body error | `FetchError::Request` |
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    delay: Duration,
    page_timeout: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher
    ///
    /// # Arguments
    ///
    /// * `user_agent` - Identification sent with every request
    /// * `delay` - Pause before every request
    /// * `page_timeout` - Timeout for crawl-page requests
    pub fn new(
        user_agent: &UserAgentConfig,
        delay: Duration,
        page_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent)?,
            delay,
            page_timeout,
        })
    }

    /// Creates a fetcher from a configuration
    ///
    /// Fails with [`ScoutError::InvalidDelay`] when the delay is negative,
    /// not finite, or too large to represent as a [`Duration`].
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let delay = config.crawler.rate_limit_delay;
        let delay =
            Duration::try_from_secs_f64(delay).map_err(|_| ScoutError::InvalidDelay(delay))?;

        Ok(Self::new(
            &config.user_agent,
            delay,
            Duration::from_secs(config.crawler.page_timeout),
        )?)
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, kind: FetchKind) -> Result<String, FetchError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut request = self.client.get(url);
        if kind == FetchKind::Page {
            request = request.timeout(self.page_timeout);
        }

        let response = request.send().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })
    }
}
