//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties together:
//! - The depth-first work-list of pages
//! - Fetching and parsing each page
//! - Resolving repository candidates into enriched repositories
//! - Recording per-URL failures without aborting the crawl

use crate::config::{Config, ExtractionConfig};
use crate::crawler::parser::parse_document;
use crate::crawler::{CrawlReporter, FetchKind, PageFetcher, TracingReporter};
use crate::scrape::{parse_repo_page, Candidate, CandidateExtractor};
use crate::state::{CrawlResult, Repository, Traversal};
use crate::url::{normalize_page_url, validate_repo_url};
use crate::CandidateError;
use scraper::Html;
use std::time::{Duration, Instant};
use url::Url;

/// Settings that shape a crawl besides the fetcher
#[derive(Debug, Clone, Default)]
pub struct CrawlOptions {
    pub extraction: ExtractionConfig,
}

impl CrawlOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            extraction: config.extraction.clone(),
        }
    }
}

/// Counters describing how a crawl went
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStats {
    /// Pages handed to the fetcher
    pub pages_visited: usize,

    /// Pages fetched successfully
    pub pages_fetched: usize,

    /// Distinct repositories whose page was requested
    pub repositories_requested: usize,

    /// Whether the seed page itself was fetched
    pub seed_fetched: bool,

    pub elapsed: Duration,
}

/// Main crawler structure
///
/// Generic over the page source so the traversal can run against HTTP or
/// against fixed content, and over the reporter that receives progress
/// events.
pub struct Crawler<F, R = TracingReporter> {
    fetcher: F,
    extractor: CandidateExtractor,
    reporter: R,
}

impl<F: PageFetcher> Crawler<F> {
    /// Creates a crawler that reports through `tracing`
    pub fn new(fetcher: F, options: CrawlOptions) -> Self {
        Self {
            fetcher,
            extractor: CandidateExtractor::from_config(&options.extraction),
            reporter: TracingReporter,
        }
    }
}

impl<F: PageFetcher, R: CrawlReporter> Crawler<F, R> {
    /// Replaces the reporter
    pub fn with_reporter<R2: CrawlReporter>(self, reporter: R2) -> Crawler<F, R2> {
        Crawler {
            fetcher: self.fetcher,
            extractor: self.extractor,
            reporter,
        }
    }

    /// Crawls from `seed_url`, following same-domain links up to `max_depth` hops
    ///
    /// Never fails: per-page and per-repository problems are collected in
    /// [`CrawlResult::errors`].
    pub async fn crawl(&self, seed_url: &str, max_depth: u32) -> CrawlResult {
        self.crawl_with_stats(seed_url, max_depth).await.0
    }

    /// Like [`Crawler::crawl`], also returning crawl counters
    ///
    /// # Traversal
    ///
    /// 1. Pop `(url, depth)`; skip it if deeper than `max_depth` or visited
    /// 2. Mark visited and fetch; on failure log one error and drop the branch
    /// 3. Resolve every repository candidate on the page
    /// 4. If `depth < max_depth`, schedule same-domain links at `depth + 1`
    /// 5. Stop when the work-list is empty
    pub async fn crawl_with_stats(&self, seed_url: &str, max_depth: u32) -> (CrawlResult, CrawlStats) {
        let start = Instant::now();
        let mut stats = CrawlStats::default();

        tracing::info!("Starting crawl of {} (max depth {})", seed_url, max_depth);

        let mut traversal = match normalize_page_url(seed_url) {
            Some(seed) => Traversal::new(seed),
            None => {
                let mut traversal = Traversal::empty();
                self.record_error(
                    &mut traversal,
                    format!("Error crawling {}: not an absolute http(s) URL", seed_url),
                );
                traversal
            }
        };

        while let Some((url, depth)) = traversal.next_page(max_depth) {
            self.process_page(&mut traversal, &mut stats, &url, depth, max_depth)
                .await;
        }

        stats.pages_visited = traversal.visited_count();
        stats.elapsed = start.elapsed();

        let result = traversal.finish();
        self.reporter.finished(&result);

        (result, stats)
    }

    async fn process_page(
        &self,
        traversal: &mut Traversal,
        stats: &mut CrawlStats,
        url: &Url,
        depth: u32,
        max_depth: u32,
    ) {
        self.reporter.page_started(url, depth);

        let body = match self.fetcher.fetch(url.as_str(), FetchKind::Page).await {
            Ok(body) => body,
            Err(e) => {
                self.record_error(traversal, format!("Error crawling {}: {}", url, e));
                return;
            }
        };

        stats.pages_fetched += 1;
        if depth == 0 {
            stats.seed_fetched = true;
        }

        let parsed = {
            let document = Html::parse_document(&body);
            parse_document(&document, url).and_then(|page| {
                self.extractor
                    .extract_document(&document, &body, url)
                    .map(|candidates| (page, candidates))
            })
        };
        let (page, candidates) = match parsed {
            Ok(parsed) => parsed,
            Err(e) => {
                self.record_error(traversal, format!("Error parsing {}: {}", url, e));
                return;
            }
        };

        self.reporter
            .page_finished(url, page.title.as_deref(), candidates.len());

        for candidate in candidates {
            self.handle_candidate(traversal, stats, candidate).await;
        }

        if depth < max_depth {
            traversal.push_links(page.same_domain_links(url), depth + 1);
        }
    }

    async fn handle_candidate(
        &self,
        traversal: &mut Traversal,
        stats: &mut CrawlStats,
        candidate: Candidate,
    ) {
        if !traversal.claim_repository(&candidate.canonical_url) {
            tracing::debug!("Already requested {}", candidate.canonical_url);
            return;
        }
        stats.repositories_requested += 1;

        let full_url = candidate.canonical_url.clone();
        match self.resolve_candidate(candidate).await {
            Ok(repository) => {
                self.reporter.repository_found(&repository);
                traversal.record_repository(repository);
            }
            Err(e) => {
                self.record_error(
                    traversal,
                    format!("Error resolving repository {}: {}", full_url, e),
                );
            }
        }
    }

    /// Validates, fetches and parses one candidate
    async fn resolve_candidate(&self, candidate: Candidate) -> Result<Repository, CandidateError> {
        validate_repo_url(&candidate.canonical_url)?;

        let html = self
            .fetcher
            .fetch(&candidate.canonical_url, FetchKind::Repository)
            .await?;
        let metadata = parse_repo_page(&html)?;

        Ok(Repository::from_parts(candidate, metadata))
    }

    fn record_error(&self, traversal: &mut Traversal, message: String) {
        self.reporter.error(&message);
        traversal.record_error(message);
    }
}
