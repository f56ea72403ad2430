//! Scraping of fetched HTML
//!
//! This module turns raw pages into structured data:
//! - Human-readable count normalization ("2.3k" -> 2300)
//! - Discovery of candidate GitHub repository links on a crawled page
//! - Extraction of counts and metadata from a repository page

mod count;
mod links;
mod metadata;

pub use count::parse_count;
pub use links::{extract_candidates, Candidate, CandidateExtractor};
pub use metadata::{parse_repo_page, RepoMetadata};

use crate::ParseError;
use scraper::Selector;

/// Compiles a CSS selector, reporting failures as a [`ParseError`]
pub(crate) fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}
