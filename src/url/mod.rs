//! URL handling module for Repo-Scout
//!
//! This module provides page-URL normalization for the visited set, the
//! same-domain check used during traversal, and the canonical form and shape
//! checks for GitHub repository URLs.

mod domain;
mod normalize;
mod repo;

// Re-export main functions
pub use domain::{extract_domain, is_github_host, same_origin};
pub use normalize::{normalize_page_url, resolve_page_url};
pub use repo::{
    canonical_repo_url, has_excluded_segment, repo_from_url, validate_repo_url, EXCLUDED_SEGMENTS,
    GITHUB_BASE,
};
