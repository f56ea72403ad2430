use crate::scrape::{parse_count, selector};
use crate::ParseError;
use scraper::{ElementRef, Html};

/// Counts and descriptive fields scraped from a repository page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoMetadata {
    pub stars: u64,
    pub watchers: u64,
    pub forks: u64,
    pub issues: u64,
    pub pull_requests: u64,
    pub description: Option<String>,
    pub last_updated: Option<String>,
}

/// Parses a GitHub repository page
///
/// # Extraction Rules
///
/// | Field | Source |
/// |-------|--------|
/// | stars / watchers / forks | `a.Link.Link--muted` whose text contains "star", "watching" or "fork" |
/// | issues | `span.Counter` inside a link to `/issues` (not `pull`) |
/// | pull_requests | `span.Counter` inside a link to `/pulls` |
/// | description | first `p.f4`, trimmed |
/// | last_updated | `datetime` of the first `relative-time` or `time` element |
///
/// Elements that are missing leave counts at 0 and optional fields empty.
///
/// # Errors
///
/// Returns [`ParseError::EmptyDocument`] when the body has no content at all.
pub fn parse_repo_page(html: &str) -> Result<RepoMetadata, ParseError> {
    if html.trim().is_empty() {
        return Err(ParseError::EmptyDocument);
    }

    let document = Html::parse_document(html);
    let mut metadata = RepoMetadata::default();

    extract_social_counts(&document, &mut metadata)?;
    extract_issue_counts(&document, &mut metadata)?;
    metadata.description = extract_description(&document)?;
    metadata.last_updated = extract_last_updated(&document)?;

    Ok(metadata)
}

/// Joins the trimmed text pieces of an element
fn element_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

fn extract_social_counts(document: &Html, metadata: &mut RepoMetadata) -> Result<(), ParseError> {
    let links = selector("a.Link.Link--muted")?;

    for link in document.select(&links) {
        let text = element_text(link).to_lowercase();
        let value = parse_count(&text);

        if text.contains("star") {
            metadata.stars = value;
        } else if text.contains("watching") {
            metadata.watchers = value;
        } else if text.contains("fork") {
            metadata.forks = value;
        }
    }

    Ok(())
}

fn extract_issue_counts(document: &Html, metadata: &mut RepoMetadata) -> Result<(), ParseError> {
    let counters = selector("span.Counter")?;

    for counter in document.select(&counters) {
        let Some(href) = enclosing_link_href(counter) else {
            continue;
        };
        let value = parse_count(&element_text(counter));

        if href.contains("/issues") && !href.contains("pull") {
            metadata.issues = value;
        } else if href.contains("/pulls") {
            metadata.pull_requests = value;
        }
    }

    Ok(())
}

/// The href of the nearest `<a>` ancestor; empty when it has none
fn enclosing_link_href(element: ElementRef<'_>) -> Option<&str> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "a")
        .map(|link| link.value().attr("href").unwrap_or(""))
}

fn extract_description(document: &Html) -> Result<Option<String>, ParseError> {
    let lede = selector("p.f4")?;

    Ok(document
        .select(&lede)
        .next()
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty()))
}

fn extract_last_updated(document: &Html) -> Result<Option<String>, ParseError> {
    let time = selector("relative-time, time")?;

    Ok(document
        .select(&time)
        .next()
        .and_then(|el| el.value().attr("datetime"))
        .map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPO_PAGE: &str = r#"
        <html><body>
        <nav>
          <a href="/cncf/landscape/issues" class="UnderlineNav-item">
            Issues <span class="Counter">1,204</span>
          </a>
          <a href="/cncf/landscape/pulls" class="UnderlineNav-item">
            Pull requests <span class="Counter">2.3k</span>
          </a>
        </nav>
        <div class="BorderGrid">
          <p class="f4 my-3">
            The Cloud Native Interactive Landscape
          </p>
          <a href="/cncf/landscape/stargazers" class="Link Link--muted">
            <strong>8.7k</strong> stars
          </a>
          <a href="/cncf/landscape/watchers" class="Link Link--muted">
            <strong>312</strong> watching
          </a>
          <a href="/cncf/landscape/forks" class="Link Link--muted">
            <strong>1.1k</strong> forks
          </a>
          <relative-time datetime="2024-11-02T17:45:00Z">Nov 2, 2024</relative-time>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_full_page() {
        let metadata = parse_repo_page(REPO_PAGE).unwrap();

        assert_eq!(metadata.stars, 8700);
        assert_eq!(metadata.watchers, 312);
        assert_eq!(metadata.forks, 1100);
        assert_eq!(metadata.issues, 1204);
        assert_eq!(metadata.pull_requests, 2300);
        assert_eq!(
            metadata.description.as_deref(),
            Some("The Cloud Native Interactive Landscape")
        );
        assert_eq!(metadata.last_updated.as_deref(), Some("2024-11-02T17:45:00Z"));
    }

    #[test]
    fn test_missing_elements_default() {
        let metadata = parse_repo_page("<html><body><h1>Nothing here</h1></body></html>").unwrap();
        assert_eq!(metadata, RepoMetadata::default());
    }

    #[test]
    fn test_empty_document_is_error() {
        assert!(matches!(
            parse_repo_page("  \n "),
            Err(ParseError::EmptyDocument)
        ));
    }

    #[test]
    fn test_muted_link_without_keyword_ignored() {
        let html = r#"<a class="Link Link--muted" href="/x">42 contributors</a>"#;
        let metadata = parse_repo_page(html).unwrap();
        assert_eq!(metadata.stars, 0);
        assert_eq!(metadata.watchers, 0);
        assert_eq!(metadata.forks, 0);
    }

    #[test]
    fn test_link_must_carry_both_classes() {
        let html = r#"<a class="Link" href="/x/stargazers">99 stars</a>"#;
        let metadata = parse_repo_page(html).unwrap();
        assert_eq!(metadata.stars, 0);
    }

    #[test]
    fn test_counter_outside_link_ignored() {
        let html = r#"<div><span class="Counter">7</span></div>"#;
        let metadata = parse_repo_page(html).unwrap();
        assert_eq!(metadata.issues, 0);
        assert_eq!(metadata.pull_requests, 0);
    }

    #[test]
    fn test_issue_link_mentioning_pull_not_counted_as_issues() {
        let html = r#"<a href="/o/r/issues?q=is%3Apull"><span class="Counter">5</span></a>"#;
        let metadata = parse_repo_page(html).unwrap();
        assert_eq!(metadata.issues, 0);
        assert_eq!(metadata.pull_requests, 0);
    }

    #[test]
    fn test_counter_nested_deeper_in_link() {
        let html = r#"<a href="/o/r/pulls"><span><span class="Counter">14</span></span></a>"#;
        let metadata = parse_repo_page(html).unwrap();
        assert_eq!(metadata.pull_requests, 14);
    }

    #[test]
    fn test_blank_description_is_absent() {
        let html = r#"<p class="f4">   </p><p class="f4">second</p>"#;
        let metadata = parse_repo_page(html).unwrap();
        assert_eq!(metadata.description, None);
    }

    #[test]
    fn test_time_element_fallback() {
        let html = r#"<time datetime="2023-01-05T00:00:00Z">Jan 5</time>"#;
        let metadata = parse_repo_page(html).unwrap();
        assert_eq!(metadata.last_updated.as_deref(), Some("2023-01-05T00:00:00Z"));
    }
}
