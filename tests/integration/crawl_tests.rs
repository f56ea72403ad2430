//! Integration tests for the crawler
//!
//! These tests use wiremock to serve both the crawled site and the GitHub
//! repository pages, and run the full crawl cycle end-to-end over HTTP.

use repo_scout::config::{parse_config, Config, OutputFormat};
use repo_scout::crawler::{CrawlOptions, Crawler, FetchKind, HttpFetcher, PageFetcher};
use repo_scout::output::{render, CrawlReport};
use repo_scout::FetchError;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GITHUB_PREFIX: &str = "https://github.com/";

/// HTTP fetcher that serves `https://github.com/...` from a mock server
///
/// Canonical repository URLs always point at github.com; this maps them onto
/// the mock so repository pages are fetched over real HTTP too.
struct GithubRedirect {
    inner: HttpFetcher,
    github_base: String,
}

impl PageFetcher for GithubRedirect {
    async fn fetch(&self, url: &str, kind: FetchKind) -> Result<String, FetchError> {
        match url.strip_prefix(GITHUB_PREFIX) {
            Some(rest) => {
                let mapped = format!("{}/{}", self.github_base, rest);
                self.inner.fetch(&mapped, kind).await
            }
            None => self.inner.fetch(url, kind).await,
        }
    }
}

/// Creates a test configuration with no delay and a short page timeout
fn create_test_config(max_depth: u32) -> Config {
    let mut config = Config::default();
    config.crawler.max_depth = max_depth;
    config.crawler.rate_limit_delay = 0.0;
    config.crawler.page_timeout = 2;
    config.user_agent.crawler_name = "TestBot".to_string();
    config.user_agent.crawler_version = "1.0.0".to_string();
    config
}

fn create_crawler(config: &Config, github: &MockServer) -> Crawler<GithubRedirect> {
    let fetcher = GithubRedirect {
        inner: HttpFetcher::from_config(config).expect("Failed to build fetcher"),
        github_base: github.uri(),
    };
    Crawler::new(fetcher, CrawlOptions::from_config(config))
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

fn repo_page(stars: &str, forks: &str, issues: &str, description: &str) -> String {
    format!(
        r#"<html><body>
        <a href="/o/r/issues">Issues <span class="Counter">{issues}</span></a>
        <a href="/o/r/pulls">Pull requests <span class="Counter">0</span></a>
        <p class="f4 my-3">{description}</p>
        <a class="Link Link--muted" href="/o/r/stargazers"><strong>{stars}</strong> stars</a>
        <a class="Link Link--muted" href="/o/r/forks"><strong>{forks}</strong> forks</a>
        <relative-time datetime="2024-05-01T12:00:00Z"></relative-time>
        </body></html>"#
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_page() {
    let site = MockServer::start().await;
    let github = MockServer::start().await;

    mount_page(
        &site,
        "/",
        r#"<html><head><title>Projects</title></head><body>
            <a href="https://github.com/cncf/landscape" title="Repository">Landscape</a>
            <a href="https://github.com/etcd-io/etcd.git" aria-label="etcd repository">etcd</a>
            <a href="https://github.com/cncf/landscape/" title="Repository">again</a>
            <a href="/about">About</a>
            </body></html>"#
            .to_string(),
    )
    .await;
    mount_page(&github, "/cncf/landscape", repo_page("8.7k", "1.1k", "40", "Landscape")).await;
    mount_page(&github, "/etcd-io/etcd", repo_page("47k", "9.6k", "120", "Key-value store")).await;

    // Depth 0: the about page is never requested
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html(String::new()))
        .expect(0)
        .mount(&site)
        .await;

    let config = create_test_config(0);
    let crawler = create_crawler(&config, &github);
    let (result, stats) = crawler.crawl_with_stats(&format!("{}/", site.uri()), 0).await;

    assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);
    assert_eq!(result.repositories.len(), 2);
    assert_eq!(stats.pages_visited, 1);
    assert!(stats.seed_fetched);

    let landscape = &result.repositories[0];
    assert_eq!(landscape.full_url, "https://github.com/cncf/landscape");
    assert_eq!(landscape.stars, 8700);
    assert_eq!(landscape.forks, 1100);
    assert_eq!(landscape.issues, 40);
    assert_eq!(landscape.description.as_deref(), Some("Landscape"));
    assert_eq!(
        landscape.last_updated.as_deref(),
        Some("2024-05-01T12:00:00Z")
    );

    let etcd = &result.repositories[1];
    assert_eq!(etcd.owner, "etcd-io");
    assert_eq!(etcd.repo_name, "etcd");
    assert_eq!(etcd.stars, 47000);
}

#[tokio::test]
async fn test_depth_one_follows_same_domain_links() {
    let site = MockServer::start().await;
    let github = MockServer::start().await;

    mount_page(
        &site,
        "/",
        r#"<a href="/projects">Projects</a>
           <a href="https://elsewhere.example.org/page">Off-site</a>"#
            .to_string(),
    )
    .await;
    mount_page(
        &site,
        "/projects",
        r#"<a href="https://github.com/o/r" title="Repository">r</a>
           <a href="/deeper">Deeper</a>"#
            .to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/deeper"))
        .respond_with(html(String::new()))
        .expect(0)
        .mount(&site)
        .await;
    mount_page(&github, "/o/r", repo_page("5", "1", "2", "Demo")).await;

    let config = create_test_config(1);
    let crawler = create_crawler(&config, &github);
    let (result, stats) = crawler.crawl_with_stats(&format!("{}/", site.uri()), 1).await;

    assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);
    assert_eq!(result.repositories.len(), 1);
    assert_eq!(result.repositories[0].stars, 5);
    assert_eq!(stats.pages_visited, 2);
}

#[tokio::test]
async fn test_missing_repository_is_isolated() {
    let site = MockServer::start().await;
    let github = MockServer::start().await;

    mount_page(
        &site,
        "/",
        r#"<a href="https://github.com/o/alive" title="Repository">alive</a>
           <a href="https://github.com/o/gone" title="Repository">gone</a>"#
            .to_string(),
    )
    .await;
    mount_page(&github, "/o/alive", repo_page("1", "0", "0", "Alive")).await;
    Mock::given(method("GET"))
        .and(path("/o/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&github)
        .await;

    let config = create_test_config(0);
    let crawler = create_crawler(&config, &github);
    let result = crawler.crawl(&format!("{}/", site.uri()), 0).await;

    assert_eq!(result.repositories.len(), 1);
    assert_eq!(result.repositories[0].repo_name, "alive");
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("Error resolving repository https://github.com/o/gone"));
}

#[tokio::test]
async fn test_seed_failure_yields_single_error() {
    let site = MockServer::start().await;
    let github = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&site)
        .await;

    let config = create_test_config(2);
    let crawler = create_crawler(&config, &github);
    let seed = format!("{}/", site.uri());
    let (result, stats) = crawler.crawl_with_stats(&seed, 2).await;

    assert!(result.repositories.is_empty());
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with(&format!("Error crawling {}", seed)));
    assert!(!stats.seed_fetched);
}

#[tokio::test]
async fn test_user_agent_sent_on_every_request() {
    let site = MockServer::start().await;
    let github = MockServer::start().await;

    let config = create_test_config(0);
    let expected = config.user_agent.header_value();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", expected.as_str()))
        .respond_with(html(
            r#"<a href="https://github.com/o/r" title="Repository">r</a>"#.to_string(),
        ))
        .expect(1)
        .mount(&site)
        .await;
    Mock::given(method("GET"))
        .and(path("/o/r"))
        .and(header("user-agent", expected.as_str()))
        .respond_with(html(repo_page("1", "1", "1", "r")))
        .expect(1)
        .mount(&github)
        .await;

    let crawler = create_crawler(&config, &github);
    let result = crawler.crawl(&format!("{}/", site.uri()), 0).await;

    assert_eq!(result.repositories.len(), 1);
}

#[tokio::test]
async fn test_config_file_drives_crawl_and_report() {
    let site = MockServer::start().await;
    let github = MockServer::start().await;

    // No title/aria-label markers: only the pattern scan finds the link
    mount_page(
        &site,
        "/",
        r#"<p>Source lives at https://github.com/o/r.</p>"#.to_string(),
    )
    .await;
    mount_page(&github, "/o/r", repo_page("12", "3", "4", "Found by pattern")).await;

    let config = parse_config(
        r#"
[crawler]
max-depth = 0
rate-limit-delay = 0.0
page-timeout = 2

[extraction]
strategy = "pattern"

[output]
format = "json"
"#,
    )
    .expect("valid config");

    let crawler = create_crawler(&config, &github);
    let seed = format!("{}/", site.uri());
    let (result, stats) = crawler
        .crawl_with_stats(&seed, config.crawler.max_depth)
        .await;

    assert_eq!(result.repositories.len(), 1);

    let report = CrawlReport::new(&seed, config.crawler.max_depth, result).with_stats(&stats);
    assert_eq!(config.output.format, OutputFormat::Json);
    let rendered = render(&report, config.output.format).expect("render");
    let value: serde_json::Value = serde_json::from_str(&rendered).expect("json");

    assert_eq!(value["seed_url"], seed.as_str());
    assert_eq!(value["repositories"][0]["full_url"], "https://github.com/o/r");
    assert_eq!(value["repositories"][0]["stars"], 12);
    assert_eq!(value["pages_visited"], 1);
}

#[tokio::test]
async fn test_delay_paces_requests() {
    let site = MockServer::start().await;
    let github = MockServer::start().await;

    mount_page(
        &site,
        "/",
        r#"<a href="https://github.com/o/r" title="Repository">r</a>"#.to_string(),
    )
    .await;
    mount_page(&github, "/o/r", repo_page("1", "1", "1", "r")).await;

    let mut config = create_test_config(0);
    config.crawler.rate_limit_delay = 0.2;

    let crawler = create_crawler(&config, &github);
    let (result, stats) = crawler.crawl_with_stats(&format!("{}/", site.uri()), 0).await;

    assert_eq!(result.repositories.len(), 1);
    // Two requests, each preceded by the delay
    assert!(stats.elapsed >= Duration::from_millis(400));
}
