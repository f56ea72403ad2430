use crate::state::{CrawlResult, Repository, RepositoryStore};
use std::collections::HashSet;
use url::Url;

/// Mutable state of one crawl
///
/// Holds the depth-first work-list of `(url, depth)` pairs, the set of page
/// URLs already handed to the fetcher, the set of repository URLs already
/// requested, the dedup store and the error log.
#[derive(Debug, Default)]
pub struct Traversal {
    frontier: Vec<(Url, u32)>,
    // Kept apart on purpose: a github.com URL reached as a same-domain link is
    // fetched once as a crawl page and, if it is also a candidate, once more
    // as a repository page.
    visited: HashSet<String>,
    attempted: HashSet<String>,
    store: RepositoryStore,
    errors: Vec<String>,
}

impl Traversal {
    /// Starts a traversal at `seed`, depth 0
    pub fn new(seed: Url) -> Self {
        Self {
            frontier: vec![(seed, 0)],
            ..Self::default()
        }
    }

    /// A traversal with nothing to visit
    pub fn empty() -> Self {
        Self::default()
    }

    /// Pops the next page to fetch and marks it visited
    ///
    /// Entries deeper than `max_depth` or already visited are discarded.
    pub fn next_page(&mut self, max_depth: u32) -> Option<(Url, u32)> {
        while let Some((url, depth)) = self.frontier.pop() {
            if depth > max_depth {
                continue;
            }
            if !self.visited.insert(url.as_str().to_string()) {
                continue;
            }
            return Some((url, depth));
        }
        None
    }

    /// Schedules the links of a page at `depth`
    ///
    /// Links are pushed in reverse so the first link on the page is the next
    /// one popped, giving the same visiting order as a recursive descent.
    pub fn push_links(&mut self, links: Vec<Url>, depth: u32) {
        self.frontier
            .extend(links.into_iter().rev().map(|link| (link, depth)));
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Claims a repository URL for fetching
    ///
    /// Returns false if the repository was already requested in this crawl,
    /// whether that request succeeded or not.
    pub fn claim_repository(&mut self, full_url: &str) -> bool {
        self.attempted.insert(full_url.to_string())
    }

    /// Adds a repository to the store; false if its URL was already stored
    pub fn record_repository(&mut self, repository: Repository) -> bool {
        self.store.insert(repository)
    }

    pub fn record_error(&mut self, message: String) {
        self.errors.push(message);
    }

    /// Consumes the traversal into its result
    pub fn finish(self) -> CrawlResult {
        CrawlResult {
            repositories: self.store.into_sorted(),
            errors: self.errors,
        }
    }
}
