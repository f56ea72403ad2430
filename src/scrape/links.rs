use crate::config::{ExtractionConfig, ExtractionStrategy};
use crate::scrape::selector;
use crate::url::{canonical_repo_url, has_excluded_segment, repo_from_url};
use crate::ParseError;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use std::collections::HashSet;
use url::Url;

static REPO_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:https?://)?(?:www\.)?github\.com/([a-z0-9](?:[a-z0-9-]{0,38}))/([a-z0-9._-]+)((?:/[^\s<>]*)?)",
    )
    .expect("repository link pattern is valid")
});

/// A repository reference found on a crawled page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub owner: String,
    pub repo_name: String,
    /// `https://github.com/<owner>/<repo>`
    pub canonical_url: String,
}

impl Candidate {
    fn new(owner: String, repo_name: String) -> Self {
        let canonical_url = canonical_repo_url(&owner, &repo_name);
        Self {
            owner,
            repo_name,
            canonical_url,
        }
    }
}

/// Finds repository candidates in a page with the default discovery settings
///
/// See [`CandidateExtractor`] for the rules.
pub fn extract_candidates(html: &str, base_url: &Url) -> Result<Vec<Candidate>, ParseError> {
    CandidateExtractor::from_config(&ExtractionConfig::default()).extract(html, base_url)
}

/// Discovers GitHub repository links on a crawled page
///
/// # Strategies
///
/// | Strategy | Source of candidates |
/// |----------|----------------------|
/// | Structural | `<a href>` whose `title` or `aria-label` contains the marker text |
/// | Pattern | every `github.com/<owner>/<repo>` occurrence in the raw HTML |
/// | Auto | Structural; Pattern only if no anchor carries the marker |
///
/// Either way, URLs whose path contains an excluded segment (`issues`,
/// `blob`, `tree`, ...) are dropped, the survivors are reduced to their
/// canonical `https://github.com/<owner>/<repo>` form, and duplicates are
/// removed keeping the first occurrence.
#[derive(Debug, Clone)]
pub struct CandidateExtractor {
    strategy: ExtractionStrategy,
    marker: String,
}

impl CandidateExtractor {
    pub fn new(strategy: ExtractionStrategy, marker: &str) -> Self {
        Self {
            strategy,
            marker: marker.to_lowercase(),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.strategy, &config.link_marker)
    }

    /// Returns the candidates found in `html`, in document order
    pub fn extract(&self, html: &str, base_url: &Url) -> Result<Vec<Candidate>, ParseError> {
        self.extract_document(&Html::parse_document(html), html, base_url)
    }

    /// Like [`CandidateExtractor::extract`], reusing an already parsed `document`
    ///
    /// `html` must be the text `document` was parsed from; the pattern
    /// strategy scans it directly.
    pub fn extract_document(
        &self,
        document: &Html,
        html: &str,
        base_url: &Url,
    ) -> Result<Vec<Candidate>, ParseError> {
        let found = match self.strategy {
            ExtractionStrategy::Structural => {
                self.structural(document, base_url)?.unwrap_or_default()
            }
            ExtractionStrategy::Pattern => pattern(html),
            ExtractionStrategy::Auto => match self.structural(document, base_url)? {
                Some(found) => found,
                None => {
                    tracing::debug!("No repository markers on {}, scanning raw HTML", base_url);
                    pattern(html)
                }
            },
        };

        Ok(dedup(found))
    }

    /// Returns None when no anchor on the page carries the marker
    fn structural(
        &self,
        document: &Html,
        base_url: &Url,
    ) -> Result<Option<Vec<Candidate>>, ParseError> {
        let anchors = selector("a[href]")?;

        let mut marked = false;
        let mut found = Vec::new();

        for element in document.select(&anchors) {
            let labelled = ["title", "aria-label"]
                .iter()
                .filter_map(|attr| element.value().attr(attr))
                .any(|label| label.to_lowercase().contains(&self.marker));
            if !labelled {
                continue;
            }
            marked = true;

            if let Some(candidate) = element
                .value()
                .attr("href")
                .and_then(|href| candidate_from_href(href, base_url))
            {
                found.push(candidate);
            }
        }

        Ok(marked.then_some(found))
    }
}

/// Resolves an anchor href into a candidate, if it names a repository root
fn candidate_from_href(href: &str, base_url: &Url) -> Option<Candidate> {
    let url = base_url.join(href.trim()).ok()?;
    if has_excluded_segment(url.path()) {
        return None;
    }
    let (owner, repo) = repo_from_url(&url)?;
    Some(Candidate::new(owner, repo))
}

/// Scans raw HTML for `github.com/<owner>/<repo>` references
fn pattern(html: &str) -> Vec<Candidate> {
    let mut found = Vec::new();

    for caps in REPO_PATTERN.captures_iter(html) {
        let whole = caps.get(0).map(|m| m.start()).unwrap_or(0);

        // Reject hosts that merely end in "github.com" (gist.github.com, notgithub.com)
        if let Some(prev) = html[..whole].chars().next_back() {
            if prev.is_ascii_alphanumeric() || prev == '.' || prev == '-' {
                continue;
            }
        }

        let path = format!("/{}/{}{}", &caps[1], &caps[2], &caps[3]);
        if has_excluded_segment(&path) {
            continue;
        }

        // Sentence punctuation directly after a bare link is not part of the name
        let repo = caps[2].trim_end_matches('.');
        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        if repo.is_empty() {
            continue;
        }

        found.push(Candidate::new(caps[1].to_string(), repo.to_string()));
    }

    found
}

fn dedup(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.canonical_url.clone()))
        .collect()
}
