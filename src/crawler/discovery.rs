//! Sitemap tree discovery
//!
//! Walks a sitemap index tree breadth-first. Every sitemap file gets its own
//! task; fan-out is unbounded because sitemap trees are shallow and narrow
//! compared to the number of pages they list. The page count is bounded in
//! the scrape phase instead.

use crate::crawler::classifier::classify;
use crate::crawler::fetcher::Fetch;
use crate::crawler::parser::extract_locs;
use crate::crawler::worklist::Worklist;
use crate::url::visit_key;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// URLs reported back by one expanded sitemap
#[derive(Debug, Default)]
struct SitemapBatch {
    /// Nested sitemaps still to expand
    sitemaps: Vec<String>,
    /// Leaf page URLs
    pages: Vec<String>,
}

/// Discovers every page URL reachable from a seed sitemap
///
/// Sitemaps that fail to download or parse are logged and contribute no
/// URLs. Each sitemap is fetched at most once, keyed by its normalized URL,
/// so cyclic references terminate. Page URLs are returned in discovery
/// order, which depends on fetch timing.
///
/// # Arguments
///
/// * `fetcher` - The fetcher used for every sitemap request
/// * `seed` - URL of the root sitemap (or sitemap index)
/// * `phase_timeout` - Optional upper bound on the whole phase
pub async fn discover(
    fetcher: Arc<dyn Fetch>,
    seed: &str,
    phase_timeout: Option<Duration>,
) -> Vec<String> {
    let mut worklist = Worklist::new(phase_timeout);
    let mut visited: HashSet<String> = HashSet::new();
    let mut pages = Vec::new();

    worklist.seed(SitemapBatch {
        sitemaps: vec![seed.to_string()],
        pages: Vec::new(),
    });

    while let Some(batch) = worklist.next().await {
        pages.extend(batch.pages);

        for sitemap in batch.sitemaps {
            if sitemap.trim().is_empty() {
                continue;
            }

            if !visited.insert(visit_key(&sitemap)) {
                tracing::debug!("Skipping already visited sitemap: {}", sitemap);
                continue;
            }

            let fetcher = Arc::clone(&fetcher);
            worklist.spawn(async move { expand_sitemap(fetcher.as_ref(), &sitemap).await });
        }
    }

    tracing::info!(
        "Discovery complete: {} sitemap(s) fetched, {} page URL(s) found",
        worklist.spawned(),
        pages.len()
    );

    pages
}

/// Fetches one sitemap and splits its entries into sitemaps and pages
async fn expand_sitemap(fetcher: &dyn Fetch, url: &str) -> SitemapBatch {
    let page = match fetcher.fetch(url).await {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!("Error retrieving sitemap {}: {}", url, e);
            return SitemapBatch::default();
        }
    };

    if !(200..300).contains(&page.status_code) {
        tracing::warn!("Sitemap {} answered with HTTP {}", url, page.status_code);
    }

    let locs = match extract_locs(&page) {
        Ok(locs) => locs,
        Err(e) => {
            tracing::warn!("{}", e);
            return SitemapBatch::default();
        }
    };

    tracing::debug!("Sitemap {} listed {} URL(s)", url, locs.len());

    let (sitemaps, pages) = classify(locs);
    SitemapBatch { sitemaps, pages }
}
