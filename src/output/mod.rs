//! Output module for rendering crawl results
//!
//! This module handles:
//! - Wrapping a crawl result with run metadata into a report
//! - Rendering the report as a plain list, JSON, or a markdown table
//! - Writing the rendered report to a file or stdout

mod markdown;
mod report;
mod text;

pub use markdown::format_markdown;
pub use report::CrawlReport;
pub use text::format_table;

use crate::config::OutputFormat;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Renders a report in the requested format
pub fn render(report: &CrawlReport, format: OutputFormat) -> OutputResult<String> {
    match format {
        OutputFormat::Table => Ok(format_table(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)? + "\n"),
        OutputFormat::Markdown => Ok(format_markdown(report)),
    }
}

/// Writes rendered output to `path`, or to stdout when no path is given
pub fn write_report(rendered: &str, path: Option<&Path>) -> OutputResult<()> {
    match path {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(rendered.as_bytes())?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
