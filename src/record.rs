//! Extracted SEO records

use serde::Serialize;

/// SEO metadata extracted from one page
///
/// Produced once per successfully scraped page. Fields the page does not
/// carry are left empty rather than treated as errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SeoRecord {
    /// Final URL of the page (after redirects)
    pub url: String,

    /// Text of the first `<title>` element
    pub title: String,

    /// Text of the first `<h1>` element
    pub h1: String,

    /// `content` of the first `<meta name="description...">` element
    pub meta_description: String,

    /// HTTP status code of the response
    pub status_code: u16,
}

impl SeoRecord {
    /// Returns true if the page answered with a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Returns true if any of the text fields came back empty
    pub fn has_missing_fields(&self) -> bool {
        self.title.is_empty() || self.h1.is_empty() || self.meta_description.is_empty()
    }
}
