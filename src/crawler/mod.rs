//! Crawler module for discovering repositories
//!
//! This module contains the core crawling logic, including:
//! - Rate-limited HTTP fetching
//! - Outbound link extraction for traversal
//! - Depth-first crawl orchestration
//! - Progress reporting through an injected reporter

mod coordinator;
mod fetcher;
mod parser;
mod reporter;

pub use coordinator::{CrawlOptions, CrawlStats, Crawler};
pub use fetcher::{build_http_client, FetchKind, HttpFetcher, PageFetcher};
pub use parser::{parse_document, parse_html, ParsedPage};
pub use reporter::{CrawlReporter, TracingReporter};
