//! Tool-invocation surface
//!
//! Exposes the crawler as a single `get_repos` tool taking `{ "url": string }`,
//! the shape LLM tool-use harnesses expect. The tool never fails: crawl
//! problems are logged and an empty list is returned.

use crate::crawler::{CrawlReporter, Crawler, PageFetcher};
use crate::state::Repository;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

/// Name the tool is registered under
pub const TOOL_NAME: &str = "get_repos";

/// Depth used by the tool; only the given page is crawled
const TOOL_MAX_DEPTH: u32 = 0;

/// Pause before every request made on behalf of the tool (seconds)
const TOOL_RATE_LIMIT_DELAY: f64 = 1.0;

/// Input accepted by the `get_repos` tool
#[derive(Debug, Clone, Deserialize)]
pub struct GetReposInput {
    /// The target URL to crawl for GitHub links
    pub url: String,
}

/// Crawls `input.url` with default settings and returns the repositories found
pub async fn get_repos(input: GetReposInput) -> Vec<Repository> {
    info!("{} invoked for {}", TOOL_NAME, input.url);

    match crate::crawl(&input.url, TOOL_MAX_DEPTH, TOOL_RATE_LIMIT_DELAY).await {
        Ok(result) => result.repositories,
        Err(e) => {
            error!("Error: {}", e);
            Vec::new()
        }
    }
}

/// Runs the tool against an already configured crawler
pub async fn get_repos_with<F, R>(crawler: &Crawler<F, R>, input: GetReposInput) -> Vec<Repository>
where
    F: PageFetcher,
    R: CrawlReporter,
{
    crawler.crawl(&input.url, TOOL_MAX_DEPTH).await.repositories
}

/// JSON definition of the tool: name, description and input schema
pub fn tool_definition() -> Value {
    json!({
        "name": TOOL_NAME,
        "description": "Crawls a webpage and extracts all GitHub repositories it links to, \
                        with stars, watchers, forks, open pull requests, open issues, \
                        description and last update time for each. Requests are rate limited.",
        "input_schema": {
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "The target URL to crawl for GitHub links"
                }
            },
            "required": ["url"]
        }
    })
}
