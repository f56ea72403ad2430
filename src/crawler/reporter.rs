//! Crawl progress reporting
//!
//! The crawler never configures logging itself. It reports progress to a
//! [`CrawlReporter`] supplied by the caller; [`TracingReporter`] forwards
//! everything to `tracing`.

use crate::state::{CrawlResult, Repository};
use url::Url;

/// Receives crawl progress events
///
/// Every method has an empty default, so implementors only override what
/// they need.
pub trait CrawlReporter {
    /// A page is about to be fetched
    fn page_started(&self, _url: &Url, _depth: u32) {}

    /// A page was fetched and parsed
    fn page_finished(&self, _url: &Url, _title: Option<&str>, _candidates: usize) {}

    /// A new repository entered the result
    fn repository_found(&self, _repository: &Repository) {}

    /// An error entry was appended to the result
    fn error(&self, _message: &str) {}

    /// The crawl is complete
    fn finished(&self, _result: &CrawlResult) {}
}

/// Reporter that emits `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl CrawlReporter for TracingReporter {
    fn page_started(&self, url: &Url, depth: u32) {
        tracing::debug!("Fetching page {} (depth {})", url, depth);
    }

    fn page_finished(&self, url: &Url, title: Option<&str>, candidates: usize) {
        tracing::debug!(
            "Parsed {} ({}): {} repository candidates",
            url,
            title.unwrap_or("untitled"),
            candidates
        );
    }

    fn repository_found(&self, repository: &Repository) {
        tracing::info!(
            "Found {} ({} stars)",
            repository.slug(),
            repository.stars
        );
    }

    fn error(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn finished(&self, result: &CrawlResult) {
        tracing::info!(
            "Crawl finished: {} repositories, {} errors",
            result.repositories.len(),
            result.errors.len()
        );
    }
}

/// Forwards to the referenced reporter
impl<R: CrawlReporter + ?Sized> CrawlReporter for &R {
    fn page_started(&self, url: &Url, depth: u32) {
        (**self).page_started(url, depth)
    }

    fn page_finished(&self, url: &Url, title: Option<&str>, candidates: usize) {
        (**self).page_finished(url, title, candidates)
    }

    fn repository_found(&self, repository: &Repository) {
        (**self).repository_found(repository)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }

    fn finished(&self, result: &CrawlResult) {
        (**self).finished(result)
    }
}
