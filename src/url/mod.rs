//! URL handling module
//!
//! Normalization used to key the set of sitemaps already visited during
//! discovery, so that one sitemap reachable under several spellings is only
//! fetched once.

mod normalize;

pub use normalize::normalize_url;

/// Returns the visited-set key for a URL
///
/// Falls back to the trimmed raw string when the URL cannot be normalized,
/// so malformed entries still deduplicate against themselves.
pub fn visit_key(url: &str) -> String {
    match normalize_url(url) {
        Ok(normalized) => normalized.to_string(),
        Err(_) => url.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visit_key_equivalent_spellings() {
        assert_eq!(
            visit_key("https://WWW.Example.com/sitemap.xml#top"),
            visit_key("https://example.com/sitemap.xml")
        );
    }

    #[test]
    fn test_visit_key_keeps_scheme() {
        assert_ne!(
            visit_key("http://example.com/sitemap.xml"),
            visit_key("https://example.com/sitemap.xml")
        );
    }

    #[test]
    fn test_visit_key_malformed() {
        assert_eq!(visit_key("  not a url "), "not a url");
    }
}
