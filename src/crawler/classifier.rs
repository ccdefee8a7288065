//! Sitemap vs page classification
//!
//! A URL is considered a sitemap when it contains the substring `xml`
//! anywhere. This is a name heuristic, not a content-type check: a page URL
//! such as `/docs/xml-guide` lands in the sitemap bucket. Kept as-is so the
//! set of discovered pages matches what existing users expect.

/// Partitions URLs into `(sitemaps, pages)`, preserving input order
pub fn classify(urls: Vec<String>) -> (Vec<String>, Vec<String>) {
    let (sitemaps, pages): (Vec<String>, Vec<String>) =
        urls.into_iter().partition(|url| is_sitemap_url(url));

    for sitemap in &sitemaps {
        tracing::info!("Found sitemap: {}", sitemap);
    }

    (sitemaps, pages)
}

/// Returns true if the URL looks like a sitemap file
pub fn is_sitemap_url(url: &str) -> bool {
    url.contains("xml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_classify_mixed() {
        let (sitemaps, pages) = classify(strings(&["a.xml", "b.html", "c/sitemap.xml?x=1"]));
        assert_eq!(sitemaps, strings(&["a.xml", "c/sitemap.xml?x=1"]));
        assert_eq!(pages, strings(&["b.html"]));
    }

    #[test]
    fn test_classify_empty() {
        let (sitemaps, pages) = classify(vec![]);
        assert!(sitemaps.is_empty());
        assert!(pages.is_empty());
    }

    #[test]
    fn test_substring_anywhere_counts() {
        // Known limitation of the heuristic
        assert!(is_sitemap_url("https://example.com/docs/xml-guide"));
        assert!(is_sitemap_url("https://example.com/sitemap.xml.gz"));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert!(!is_sitemap_url("https://example.com/SITEMAP.XML"));
    }

    #[test]
    fn test_plain_pages() {
        let (sitemaps, pages) = classify(strings(&[
            "https://example.com/",
            "https://example.com/blog/post-1",
        ]));
        assert!(sitemaps.is_empty());
        assert_eq!(pages.len(), 2);
    }
}
