//! Repo-Scout main entry point
//!
//! This is the command-line interface for the Repo-Scout repository discoverer.

use anyhow::Context;
use clap::Parser;
use repo_scout::config::{load_config, validate, Config, ExtractionStrategy, OutputFormat};
use repo_scout::crawler::{CrawlOptions, Crawler, HttpFetcher};
use repo_scout::output::{render, write_report, CrawlReport};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Repo-Scout: a depth-bounded GitHub repository discoverer
///
/// Repo-Scout crawls a seed page, follows same-domain links up to a depth
/// bound, and reports every GitHub repository it finds together with the
/// stars, forks, and other counts shown on the repository's page.
#[derive(Parser, Debug)]
#[command(name = "repo-scout")]
#[command(version)]
#[command(about = "A depth-bounded GitHub repository discoverer", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of same-domain hops from the seed
    #[arg(short, long)]
    depth: Option<u32>,

    /// Pause before every request, in seconds
    #[arg(long)]
    delay: Option<f64>,

    /// How repository links are discovered
    #[arg(long, value_enum)]
    strategy: Option<ExtractionStrategy>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;

    let seed_fetched = handle_crawl(&cli.url, &config).await?;
    if !seed_fetched {
        tracing::error!("Seed page {} could not be crawled", cli.url);
        std::process::exit(1);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so a report written to stdout stays clean.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("repo_scout=info,warn"),
            1 => EnvFilter::new("repo_scout=debug,info"),
            2 => EnvFilter::new("repo_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any) and applies command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if let Some(delay) = cli.delay {
        config.crawler.rate_limit_delay = delay;
    }
    if let Some(strategy) = cli.strategy {
        config.extraction.strategy = strategy;
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if let Some(output) = &cli.output {
        config.output.path = Some(output.display().to_string());
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Handles the main crawl operation
///
/// Returns whether the seed page was fetched.
async fn handle_crawl(seed_url: &str, config: &Config) -> anyhow::Result<bool> {
    tracing::info!(
        "Max depth: {}, delay: {}s, strategy: {:?}",
        config.crawler.max_depth,
        config.crawler.rate_limit_delay,
        config.extraction.strategy
    );

    let fetcher = HttpFetcher::from_config(config).context("Failed to build HTTP client")?;
    let crawler = Crawler::new(fetcher, CrawlOptions::from_config(config));

    let (result, stats) = crawler
        .crawl_with_stats(seed_url, config.crawler.max_depth)
        .await;

    tracing::info!(
        "Crawl complete: {} pages, {} repositories, {} errors in {:.1}s",
        stats.pages_visited,
        result.repositories.len(),
        result.errors.len(),
        stats.elapsed.as_secs_f64()
    );

    let report = CrawlReport::new(seed_url, config.crawler.max_depth, result).with_stats(&stats);
    let rendered = render(&report, config.output.format)?;

    let path = config.output.path.as_deref().map(Path::new);
    write_report(&rendered, path)?;
    if let Some(path) = path {
        tracing::info!("Report written to: {}", path.display());
    }

    Ok(stats.seed_fetched)
}
