//! Crawl coordinator - wires discovery into scraping
//!
//! The coordinator owns the fetcher, the parser and the crawl limits, and
//! runs the two phases back to back:
//! 1. Discover page URLs from the sitemap tree
//! 2. Scrape every discovered page under the concurrency limit

use crate::config::{Config, CrawlerConfig};
use crate::crawler::discovery::discover;
use crate::crawler::fetcher::{Fetch, HttpFetcher};
use crate::crawler::parser::{DefaultParser, SeoParser};
use crate::crawler::scraper::scrape;
use crate::{CrawlError, SeoRecord};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Outcome of a complete crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The seed sitemap URL
    pub seed: String,
    /// When discovery started
    pub started_at: DateTime<Utc>,
    /// When scraping finished
    pub finished_at: DateTime<Utc>,
    /// Number of page URLs found during discovery
    pub pages_discovered: usize,
    /// Records for every page that was scraped successfully
    pub records: Vec<SeoRecord>,
}

impl CrawlReport {
    /// Wall-clock duration of the crawl
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Number of discovered pages that produced no record
    pub fn pages_failed(&self) -> usize {
        self.pages_discovered.saturating_sub(self.records.len())
    }
}

/// Runs sitemap discovery followed by bounded scraping
pub struct SitemapScraper {
    fetcher: Arc<dyn Fetch>,
    parser: Arc<dyn SeoParser>,
    concurrency: usize,
    phase_timeout: Option<Duration>,
}

impl SitemapScraper {
    /// Creates a scraper with an HTTP fetcher built from the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(SitemapScraper)` - Ready to run
    /// * `Err(CrawlError)` - The HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::from_config(&config.crawler, &config.user_agent)?;
        Ok(Self::with_fetcher(Arc::new(fetcher), &config.crawler))
    }

    /// Creates a scraper around an existing fetcher
    pub fn with_fetcher(fetcher: Arc<dyn Fetch>, crawler: &CrawlerConfig) -> Self {
        Self {
            fetcher,
            parser: Arc::new(DefaultParser),
            concurrency: crawler.concurrency,
            phase_timeout: crawler.phase_timeout(),
        }
    }

    /// Replaces the record extraction strategy
    pub fn with_parser(mut self, parser: Arc<dyn SeoParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Overrides the concurrency limit of the scrape phase
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Runs discovery only and returns the page URLs found
    pub async fn discover_only(&self, seed: &str) -> Vec<String> {
        discover(Arc::clone(&self.fetcher), seed, self.phase_timeout).await
    }

    /// Runs a complete crawl from the seed sitemap
    ///
    /// Individual fetch and parse failures are logged and skipped, so this
    /// always completes; a total outage just yields an empty report.
    pub async fn run(&self, seed: &str) -> CrawlReport {
        let started_at = Utc::now();
        tracing::info!("Starting sitemap discovery from {}", seed);

        let pages = discover(Arc::clone(&self.fetcher), seed, self.phase_timeout).await;
        let pages_discovered = pages.len();

        tracing::info!(
            "Scraping {} page(s) with concurrency {}",
            pages_discovered,
            self.concurrency
        );

        let records = scrape(
            Arc::clone(&self.fetcher),
            pages,
            Arc::clone(&self.parser),
            self.concurrency,
            self.phase_timeout,
        )
        .await;

        let report = CrawlReport {
            seed: seed.to_string(),
            started_at,
            finished_at: Utc::now(),
            pages_discovered,
            records,
        };

        tracing::info!(
            "Crawl completed: {} record(s) from {} page(s) in {}ms",
            report.records.len(),
            report.pages_discovered,
            report.duration().num_milliseconds()
        );

        report
    }
}

/// Scrapes every page listed under a sitemap tree
///
/// Uses the default HTTP fetcher (random browser user agent, 10s timeout).
///
/// # Arguments
///
/// * `seed` - URL of the root sitemap
/// * `parser` - Record extraction strategy
/// * `concurrency_limit` - Maximum page fetches in flight
///
/// # Returns
///
/// * `Ok(Vec<SeoRecord>)` - One record per successfully scraped page
/// * `Err(CrawlError)` - The HTTP client could not be built
///
/// # Example
///
/// ```no_run
/// use sitemap_seo::{scrape_sitemap, DefaultParser};
///
/// # async fn example() -> Result<(), sitemap_seo::CrawlError> {
/// let records = scrape_sitemap("https://example.com/sitemap.xml", DefaultParser, 10).await?;
/// for record in records {
///     println!("{} -> {}", record.url, record.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn scrape_sitemap<P>(
    seed: &str,
    parser: P,
    concurrency_limit: usize,
) -> Result<Vec<SeoRecord>, CrawlError>
where
    P: SeoParser + 'static,
{
    let fetcher = HttpFetcher::new()?;
    let scraper = SitemapScraper::with_fetcher(Arc::new(fetcher), &CrawlerConfig::default())
        .with_parser(Arc::new(parser))
        .with_concurrency(concurrency_limit);

    Ok(scraper.run(seed).await.records)
}
