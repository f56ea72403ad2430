//! Repo-Scout: a depth-bounded GitHub repository discoverer
//!
//! This crate crawls a seed page (and same-domain pages up to a depth bound),
//! collects every GitHub repository it links to, and enriches each repository
//! with the counts and metadata shown on its GitHub page.

pub mod config;
pub mod crawler;
pub mod output;
pub mod scrape;
pub mod state;
pub mod tool;
pub mod url;

use thiserror::Error;

/// Main error type for Repo-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid rate limit delay: {0}")]
    InvalidDelay(f64),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Failure to retrieve a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    /// The URL that could not be fetched
    pub fn url(&self) -> &str {
        match self {
            Self::Request { url, .. } | Self::Status { url, .. } => url,
        }
    }
}

/// Fetched content could not be turned into the expected structure
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("document is empty")]
    EmptyDocument,

    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// A candidate URL does not have the shape of a repository URL
#[derive(Debug, Error)]
#[error("not a repository URL: {url}")]
pub struct ValidationError {
    pub url: String,
}

/// Any failure while resolving a single candidate repository
#[derive(Debug, Error)]
pub enum CandidateError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type alias for Repo-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlOptions, Crawler, HttpFetcher, PageFetcher};
pub use state::{CrawlResult, Repository};

/// Crawls `seed_url` with default settings and an HTTP fetcher
///
/// `rate_limit_delay` is the pause, in seconds, taken before every request.
/// Per-URL failures end up in [`CrawlResult::errors`]. An `Err` is only
/// returned when the delay is not a representable duration
/// ([`ScoutError::InvalidDelay`]) or the HTTP client cannot be built.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> repo_scout::Result<()> {
/// let result = repo_scout::crawl("https://contribute.cncf.io/contributors/projects/", 0, 1.0).await?;
/// for repo in &result.repositories {
///     println!("{}/{}", repo.owner, repo.repo_name);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn crawl(seed_url: &str, max_depth: u32, rate_limit_delay: f64) -> Result<CrawlResult> {
    let mut config = Config::default();
    config.crawler.max_depth = max_depth;
    config.crawler.rate_limit_delay = rate_limit_delay;

    let fetcher = HttpFetcher::from_config(&config)?;

    let crawler = Crawler::new(fetcher, CrawlOptions::from_config(&config));
    Ok(crawler.crawl(seed_url, max_depth).await)
}
