use crate::crawler::CrawlStats;
use crate::state::{CrawlResult, Repository};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A crawl result together with the parameters and timing of the run
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub seed_url: String,
    pub max_depth: u32,
    pub generated_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages_visited: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,

    pub repositories: Vec<Repository>,
    pub errors: Vec<String>,
}

impl CrawlReport {
    pub fn new(seed_url: &str, max_depth: u32, result: CrawlResult) -> Self {
        Self {
            seed_url: seed_url.to_string(),
            max_depth,
            generated_at: Utc::now(),
            pages_visited: None,
            duration_seconds: None,
            repositories: result.repositories,
            errors: result.errors,
        }
    }

    /// Adds the counters of the crawl that produced the result
    pub fn with_stats(mut self, stats: &CrawlStats) -> Self {
        self.pages_visited = Some(stats.pages_visited);
        self.duration_seconds = Some(stats.elapsed.as_secs_f64());
        self
    }

    /// Sum of stars over all repositories
    pub fn total_stars(&self) -> u64 {
        self.repositories.iter().map(|r| r.stars).sum()
    }
}
