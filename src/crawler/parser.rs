//! Document parsing for sitemaps and pages
//!
//! This module handles parsing fetched bodies to extract:
//! - Nested URLs from sitemap `<loc>` elements
//! - SEO records (title, first heading, meta description) from pages
//!
//! Sitemaps are parsed with the same html5ever-based parser as pages; it
//! accepts unknown elements, so `<loc>` can be selected like any tag.

use crate::crawler::fetcher::FetchedPage;
use crate::{CrawlError, SeoRecord};
use scraper::{Html, Selector};

/// Extracts an SEO record from a fetched page
///
/// Implementations are selected once per crawl and shared by every scrape
/// task, so they must be thread-safe.
pub trait SeoParser: Send + Sync {
    fn extract_record(&self, page: &FetchedPage) -> Result<SeoRecord, CrawlError>;
}

/// Reads `<title>`, the first `<h1>` and `<meta name="description">`
///
/// Missing elements produce empty fields; only a body that is not a
/// document at all is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultParser;

impl SeoParser for DefaultParser {
    fn extract_record(&self, page: &FetchedPage) -> Result<SeoRecord, CrawlError> {
        let document = parse_document(page).map_err(|message| CrawlError::Parse {
            url: page.final_url.clone(),
            message,
        })?;

        Ok(SeoRecord {
            url: page.final_url.clone(),
            title: first_text(&document, "title"),
            h1: first_text(&document, "h1"),
            meta_description: first_attr(&document, r#"meta[name^="description"]"#, "content"),
            status_code: page.status_code,
        })
    }
}

/// Extracts the text of every `<loc>` element in a sitemap body
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Trimmed, non-empty `<loc>` values in document order
/// * `Err(CrawlError::Extraction)` - The body is not a document
///
/// # Example
///
/// ```
/// use sitemap_seo::crawler::{extract_locs, FetchedPage};
///
/// let page = FetchedPage {
///     final_url: "https://example.com/sitemap.xml".to_string(),
///     status_code: 200,
///     content_type: Some("application/xml".to_string()),
///     body: "<urlset><url><loc>https://example.com/a</loc></url></urlset>".to_string(),
/// };
/// let locs = extract_locs(&page).unwrap();
/// assert_eq!(locs, vec!["https://example.com/a".to_string()]);
/// ```
pub fn extract_locs(page: &FetchedPage) -> Result<Vec<String>, CrawlError> {
    let document = parse_document(page).map_err(|message| CrawlError::Extraction {
        url: page.final_url.clone(),
        message,
    })?;

    let selector = Selector::parse("loc").map_err(|e| CrawlError::Extraction {
        url: page.final_url.clone(),
        message: e.to_string(),
    })?;

    Ok(document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|loc| !loc.is_empty())
        .collect())
}

fn parse_document(page: &FetchedPage) -> Result<Html, String> {
    if page.body.trim().is_empty() {
        return Err("empty response body".to_string());
    }

    Ok(Html::parse_document(&page.body))
}

/// Returns the trimmed text of the first element matching `selector`
fn first_text(document: &Html, selector: &str) -> String {
    let Ok(selector) = Selector::parse(selector) else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Returns the trimmed `attr` value of the first element matching `selector`
fn first_attr(document: &Html, selector: &str, attr: &str) -> String {
    let Ok(selector) = Selector::parse(selector) else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}
