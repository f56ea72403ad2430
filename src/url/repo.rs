use crate::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Scheme and host every canonical repository URL starts with
pub const GITHUB_BASE: &str = "https://github.com";

/// Path fragments that mark a GitHub URL as something other than a repository root
pub const EXCLUDED_SEGMENTS: &[&str] = &[
    "issues", "pull", "wiki", "raw", "blob", "tree", "commits", "releases", "packages", "actions",
];

static REPO_URL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?:www\.)?github\.com/[\w-]+/[\w.-]+/?$")
        .expect("repository URL pattern is valid")
});

/// Returns true if the path contains any excluded segment (case-insensitive)
///
/// This is a substring test, so `/owner/tree-sitter` is rejected along with
/// `/owner/repo/tree/main`.
pub fn has_excluded_segment(path: &str) -> bool {
    let path = path.to_lowercase();
    EXCLUDED_SEGMENTS.iter().any(|segment| path.contains(segment))
}

/// Builds the canonical `https://github.com/<owner>/<repo>` form
pub fn canonical_repo_url(owner: &str, repo: &str) -> String {
    format!("{}/{}/{}", GITHUB_BASE, owner, repo)
}

/// Splits a github.com URL into `(owner, repo)`
///
/// Requires a `github.com`/`www.github.com` host and at least two path
/// segments. Deeper paths are cut to the first two segments and a trailing
/// `.git` is removed from the repository name.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use repo_scout::url::repo_from_url;
///
/// let url = Url::parse("https://www.github.com/rust-lang/cargo.git").unwrap();
/// assert_eq!(
///     repo_from_url(&url),
///     Some(("rust-lang".to_string(), "cargo".to_string()))
/// );
/// ```
pub fn repo_from_url(url: &Url) -> Option<(String, String)> {
    if !super::is_github_host(url.host_str()?) {
        return None;
    }

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    let owner = segments.next()?;
    let repo = segments.next()?;
    let repo = repo.strip_suffix(".git").unwrap_or(repo);

    if repo.is_empty() {
        return None;
    }

    Some((owner.to_string(), repo.to_string()))
}

/// Checks a candidate URL against the strict repository-URL shape
///
/// Accepts `http(s)://[www.]github.com/<owner>/<repo>` with an optional
/// trailing slash and nothing else.
pub fn validate_repo_url(url: &str) -> Result<(), ValidationError> {
    if REPO_URL_SHAPE.is_match(url) {
        Ok(())
    } else {
        Err(ValidationError {
            url: url.to_string(),
        })
    }
}
