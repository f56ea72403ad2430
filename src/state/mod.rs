//! State module for a single crawl
//!
//! # Components
//!
//! - `Repository`: A discovered repository, identified by its canonical URL
//! - `CrawlResult`: The sorted repositories plus the error log of one crawl
//! - `RepositoryStore`: First-insert-wins dedup store keyed by canonical URL
//! - `Traversal`: Work-list, visited set and accumulators threaded through the crawl

mod repository;
mod store;
mod traversal;

// Re-export main types
pub use repository::{CrawlResult, Repository};
pub use store::RepositoryStore;
pub use traversal::Traversal;
