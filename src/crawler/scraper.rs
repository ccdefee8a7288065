//! Concurrency-bounded page scraping
//!
//! Every page gets its own task, but a task must hold a token from a
//! fixed-size pool while its fetch is in flight. Tokens are released as soon
//! as the response body has been read, before parsing, so slow parsers never
//! hold back network work.

use crate::crawler::fetcher::Fetch;
use crate::crawler::parser::SeoParser;
use crate::crawler::worklist::Worklist;
use crate::SeoRecord;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Messages exchanged between the scrape loop and its tasks
#[derive(Debug)]
enum ScrapeMessage {
    /// URLs to scrape
    Urls(Vec<String>),
    /// A task finished, with its record if it succeeded
    Done(Option<SeoRecord>),
}

impl Default for ScrapeMessage {
    fn default() -> Self {
        Self::Done(None)
    }
}

/// Scrapes every URL with at most `concurrency_limit` fetches in flight
///
/// Empty URLs are skipped without spawning a task. Failed fetches and parse
/// errors are logged and dropped; the result holds one record per page that
/// was fetched and parsed successfully, in completion order.
///
/// # Arguments
///
/// * `fetcher` - The fetcher used for every page request
/// * `urls` - Page URLs to scrape
/// * `parser` - Extracts a record from each fetched page
/// * `concurrency_limit` - Size of the token pool (0 is treated as 1)
/// * `phase_timeout` - Optional upper bound on the whole phase
pub async fn scrape(
    fetcher: Arc<dyn Fetch>,
    urls: Vec<String>,
    parser: Arc<dyn SeoParser>,
    concurrency_limit: usize,
    phase_timeout: Option<Duration>,
) -> Vec<SeoRecord> {
    let tokens = Arc::new(Semaphore::new(concurrency_limit.max(1)));
    let mut worklist = Worklist::new(phase_timeout);
    let mut records = Vec::new();
    let mut failed = 0usize;

    worklist.seed(ScrapeMessage::Urls(urls));

    while let Some(message) = worklist.next().await {
        match message {
            ScrapeMessage::Urls(urls) => {
                for url in urls {
                    if url.trim().is_empty() {
                        continue;
                    }

                    let fetcher = Arc::clone(&fetcher);
                    let parser = Arc::clone(&parser);
                    let tokens = Arc::clone(&tokens);
                    worklist.spawn(async move {
                        ScrapeMessage::Done(
                            scrape_page(fetcher.as_ref(), parser.as_ref(), &tokens, &url).await,
                        )
                    });
                }
            }
            ScrapeMessage::Done(Some(record)) => records.push(record),
            ScrapeMessage::Done(None) => failed += 1,
        }
    }

    tracing::info!(
        "Scrape complete: {} record(s), {} page(s) failed",
        records.len(),
        failed
    );

    records
}

/// Fetches one page under a token and extracts its record
async fn scrape_page(
    fetcher: &dyn Fetch,
    parser: &dyn SeoParser,
    tokens: &Semaphore,
    url: &str,
) -> Option<SeoRecord> {
    let fetched = {
        let _token = match tokens.acquire().await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Could not acquire fetch token for {}: {}", url, e);
                return None;
            }
        };

        tracing::debug!("Requesting URL: {}", url);
        fetcher.fetch(url).await
    };

    let page = match fetched {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!("Encountered error, URL: {}: {}", url, e);
            return None;
        }
    };

    match parser.extract_record(&page) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!("Failed to extract record, URL: {}: {}", url, e);
            None
        }
    }
}
