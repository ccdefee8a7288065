//! Sitemap-SEO main entry point
//!
//! This is the command-line interface for the sitemap SEO scraper.

use anyhow::Context;
use clap::Parser;
use sitemap_seo::config::{load_config_with_hash, validate, validate_seed_url, Config, OutputFormat};
use sitemap_seo::output::{print_statistics, write_records, CrawlStatistics};
use sitemap_seo::SitemapScraper;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Sitemap-SEO: scrape SEO metadata from every page in a sitemap
///
/// Walks the sitemap tree rooted at SEED_URL, then fetches every listed
/// page and extracts its title, first heading, meta description and HTTP
/// status.
#[derive(Parser, Debug)]
#[command(name = "sitemap-seo")]
#[command(version = "1.0.0")]
#[command(about = "Scrape SEO metadata from every page in a sitemap", long_about = None)]
struct Cli {
    /// URL of the root sitemap or sitemap index
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of page fetches in flight
    #[arg(short = 'j', long)]
    concurrency: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Write records to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Discover page URLs and print them without scraping
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Print summary statistics after the crawl
    #[arg(long)]
    stats: bool,

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

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    validate_seed_url(&cli.seed)?;

    let scraper = SitemapScraper::new(&config).context("Failed to build HTTP client")?;

    if cli.dry_run {
        handle_dry_run(&scraper, &cli.seed).await;
        return Ok(());
    }

    handle_crawl(&scraper, &config, &cli).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemap_seo=info,warn"),
            1 => EnvFilter::new("sitemap_seo=debug,info"),
            2 => EnvFilter::new("sitemap_seo=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so records on stdout stay machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file (if any) and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(concurrency) = cli.concurrency {
        config.crawler.concurrency = concurrency;
    }
    if let Some(timeout) = cli.timeout {
        config.crawler.request_timeout_secs = timeout;
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

/// Handles the --dry-run mode: discovers pages and prints their URLs
async fn handle_dry_run(scraper: &SitemapScraper, seed: &str) {
    let pages = scraper.discover_only(seed).await;

    for page in &pages {
        println!("{}", page);
    }

    tracing::info!("Dry run complete: {} page URL(s) discovered", pages.len());
}

/// Handles the main crawl operation
async fn handle_crawl(scraper: &SitemapScraper, config: &Config, cli: &Cli) -> anyhow::Result<()> {
    tracing::info!(
        "Concurrency: {}, request timeout: {}s",
        config.crawler.concurrency,
        config.crawler.request_timeout_secs
    );

    let report = scraper.run(&cli.seed).await;

    write_records(
        &report.records,
        config.output.format,
        config.output.path.as_deref().map(Path::new),
        &report.seed,
    )
    .context("Failed to write records")?;

    if let Some(path) = &config.output.path {
        tracing::info!("Wrote {} record(s) to {}", report.records.len(), path);
    }

    if cli.stats {
        let stats = CrawlStatistics::from_records(&report.records);
        print_statistics(&stats, report.pages_discovered);
    }

    Ok(())
}
