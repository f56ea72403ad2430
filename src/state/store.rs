use crate::state::Repository;
use std::collections::BTreeMap;

/// Repositories discovered in one crawl, keyed by canonical URL
///
/// The first repository inserted for a URL is kept; later inserts with the
/// same URL are ignored. Iteration is ascending by URL.
#[derive(Debug, Default)]
pub struct RepositoryStore {
    repositories: BTreeMap<String, Repository>,
}

impl RepositoryStore {
    /// Inserts a repository unless one with the same URL is present
    ///
    /// Returns true if the repository was added.
    pub fn insert(&mut self, repository: Repository) -> bool {
        if self.repositories.contains_key(&repository.full_url) {
            return false;
        }
        self.repositories
            .insert(repository.full_url.clone(), repository);
        true
    }

    /// Consumes the store, returning repositories sorted by `full_url`
    pub fn into_sorted(self) -> Vec<Repository> {
        self.repositories.into_values().collect()
    }
}
