use crate::scrape::{Candidate, RepoMetadata};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A GitHub repository discovered during a crawl
///
/// Identity is the canonical `full_url` alone: two values with the same URL
/// compare equal and hash alike whatever their counts. Ordering follows
/// `full_url` as well, which is the order of [`CrawlResult::repositories`].
///
/// The struct is flat so it serializes to one row per repository with one
/// column per field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub owner: String,
    pub repo_name: String,
    pub full_url: String,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub watchers: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub pull_requests: u64,
    #[serde(default)]
    pub issues: u64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl Repository {
    /// Combines a link candidate with the metadata scraped from its page
    pub fn from_parts(candidate: Candidate, metadata: RepoMetadata) -> Self {
        Self {
            owner: candidate.owner,
            repo_name: candidate.repo_name,
            full_url: candidate.canonical_url,
            stars: metadata.stars,
            watchers: metadata.watchers,
            forks: metadata.forks,
            pull_requests: metadata.pull_requests,
            issues: metadata.issues,
            description: metadata.description,
            last_updated: metadata.last_updated,
        }
    }

    /// `owner/repo_name`
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo_name)
    }
}

impl PartialEq for Repository {
    fn eq(&self, other: &Self) -> bool {
        self.full_url == other.full_url
    }
}

impl Eq for Repository {}

impl Hash for Repository {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.full_url.hash(state);
    }
}

impl Ord for Repository {
    fn cmp(&self, other: &Self) -> Ordering {
        self.full_url.cmp(&other.full_url)
    }
}

impl PartialOrd for Repository {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Outcome of one crawl
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlResult {
    /// Unique repositories, ascending by `full_url`
    pub repositories: Vec<Repository>,

    /// One human-readable entry per failed page or repository, in discovery order
    pub errors: Vec<String>,
}
