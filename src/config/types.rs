use serde::Deserialize;

/// Main configuration structure for Repo-Scout
///
/// Every section and key is optional; missing values fall back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of same-domain hops from the seed URL
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Pause before every request (seconds)
    #[serde(rename = "rate-limit-delay")]
    pub rate_limit_delay: f64,

    /// Timeout applied to crawl-page requests (seconds)
    #[serde(rename = "page-timeout")]
    pub page_timeout: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 0,
            rate_limit_delay: 1.0,
            page_timeout: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "RepoScout".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/repo-scout".to_string(),
            contact_email: "repo-scout@example.com".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// How repository links are discovered on a crawled page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionStrategy {
    /// Anchors whose title or aria-label marks them as repository links
    Structural,
    /// Regex scan of the raw HTML for github.com/<owner>/<repo>
    Pattern,
    /// Structural, falling back to pattern when the page has no markers
    #[default]
    Auto,
}

/// Repository link discovery configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub strategy: ExtractionStrategy,

    /// Case-insensitive text an anchor's title/aria-label must contain
    #[serde(rename = "link-marker")]
    pub link_marker: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            strategy: ExtractionStrategy::Auto,
            link_marker: "repository".to_string(),
        }
    }
}

/// Rendering format for crawl results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable list
    #[default]
    Table,
    /// Pretty-printed JSON report
    Json,
    /// Markdown table, one row per repository
    Markdown,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,

    /// File to write the report to; stdout when absent
    pub path: Option<String>,
}
