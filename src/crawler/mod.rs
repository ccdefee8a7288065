//! Crawler module for sitemap discovery and page scraping
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with user agent rotation
//! - Sitemap `<loc>` extraction and SEO record parsing
//! - Sitemap vs page classification
//! - The worklist that drives both fan-out phases
//! - Overall crawl coordination

mod classifier;
mod coordinator;
mod discovery;
mod fetcher;
mod parser;
mod scraper;
mod worklist;

pub use classifier::{classify, is_sitemap_url};
pub use coordinator::{scrape_sitemap, CrawlReport, SitemapScraper};
pub use discovery::discover;
pub use fetcher::{build_http_client, Fetch, FetchedPage, HttpFetcher, DEFAULT_REQUEST_TIMEOUT};
pub use parser::{extract_locs, DefaultParser, SeoParser};
pub use scraper::scrape;
pub use worklist::Worklist;
