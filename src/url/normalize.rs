use url::Url;

/// Normalizes a crawl-page URL for the visited set
///
/// Only HTTP(S) URLs with a host are accepted. The fragment is dropped so
/// that `page#a` and `page#b` are fetched once; everything else (path case,
/// query string, trailing slash) is kept as the site serves it.
///
/// # Examples
///
/// ```
/// use repo_scout::url::normalize_page_url;
///
/// let url = normalize_page_url("https://example.com/projects#top").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/projects");
/// ```
pub fn normalize_page_url(url_str: &str) -> Option<Url> {
    let url = Url::parse(url_str.trim()).ok()?;
    into_page_url(url)
}

/// Resolves an href found on `base` into a normalized page URL
///
/// Returns None for empty and fragment-only hrefs, `javascript:`, `mailto:`,
/// `tel:` and `data:` links, and anything that does not resolve to HTTP(S).
pub fn resolve_page_url(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        return None;
    }

    base.join(href).ok().and_then(into_page_url)
}

fn into_page_url(mut url: Url) -> Option<Url> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.host_str()?;
    url.set_fragment(None);
    Some(url)
}
