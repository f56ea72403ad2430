//! HTML parser for extracting traversal links
//!
//! This module handles parsing crawl pages to extract:
//! - Links to follow (from <a> tags and canonical links)
//! - Page title, for logging

use crate::scrape::selector;
use crate::url::{resolve_page_url, same_origin};
use crate::ParseError;
use scraper::Html;
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// All links found on the page (absolute URLs, fragments removed)
    pub links: Vec<Url>,
}

impl ParsedPage {
    /// Links that stay on the same host and port as `page`
    pub fn same_domain_links(&self, page: &Url) -> Vec<Url> {
        self.links
            .iter()
            .filter(|link| same_origin(link, page))
            .cloned()
            .collect()
    }
}

/// Parses HTML content and extracts links and metadata
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags anywhere in the document
/// - `<link rel="canonical" href="...">`
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs and fragment-only links
/// - Anything that does not resolve to HTTP(S)
///
/// # Example
///
/// ```
/// use repo_scout::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url).unwrap();
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.links[0].as_str(), "https://example.com/page");
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> Result<ParsedPage, ParseError> {
    parse_document(&Html::parse_document(html), base_url)
}

/// Like [`parse_html`], for a document that is already parsed
pub fn parse_document(document: &Html, base_url: &Url) -> Result<ParsedPage, ParseError> {
    let title = extract_title(document)?;
    let links = extract_links(document, base_url)?;

    Ok(ParsedPage { title, links })
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Result<Option<String>, ParseError> {
    let title_selector = selector("title")?;

    Ok(document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Extracts all valid links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Result<Vec<Url>, ParseError> {
    let mut links = Vec::new();

    for element in document.select(&selector("a[href]")?) {
        if element.value().attr("download").is_some() {
            continue;
        }

        if let Some(link) = element
            .value()
            .attr("href")
            .and_then(|href| resolve_page_url(href, base_url))
        {
            links.push(link);
        }
    }

    for element in document.select(&selector("link[rel='canonical'][href]")?) {
        if let Some(link) = element
            .value()
            .attr("href")
            .and_then(|href| resolve_page_url(href, base_url))
        {
            links.push(link);
        }
    }

    Ok(links)
}
