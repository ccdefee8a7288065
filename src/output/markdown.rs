//! Markdown report generation
//!
//! This module renders a human-readable report of a crawl: a short summary
//! followed by one table row per record.

use crate::output::stats::CrawlStatistics;
use crate::output::traits::RecordSink;
use crate::{OutputResult, SeoRecord};
use std::io::Write;

/// Writes records as a markdown report
pub struct MarkdownSink<W: Write> {
    writer: W,
    seed: Option<String>,
}

impl<W: Write> MarkdownSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, seed: None }
    }

    /// Names the seed sitemap in the report header
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for MarkdownSink<W> {
    fn write_records(&mut self, records: &[SeoRecord]) -> OutputResult<()> {
        let markdown = format_markdown_report(records, self.seed.as_deref());
        self.writer.write_all(markdown.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Formats records as a markdown report
///
/// # Arguments
///
/// * `records` - The records to render
/// * `seed` - The seed sitemap, if it should be named in the header
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown_report(records: &[SeoRecord], seed: Option<&str>) -> String {
    let stats = CrawlStatistics::from_records(records);
    let mut md = String::new();

    md.push_str("# Sitemap SEO Report\n\n");
    if let Some(seed) = seed {
        md.push_str(&format!("- **Sitemap**: {}\n\n", seed));
    }

    md.push_str("## Summary\n\n");
    md.push_str(&format!("- **Pages**: {}\n", stats.total_records));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n",
        stats.success_rate()
    ));
    md.push_str(&format!("- **Missing Title**: {}\n", stats.missing_title));
    md.push_str(&format!("- **Missing H1**: {}\n", stats.missing_h1));
    md.push_str(&format!(
        "- **Missing Meta Description**: {}\n\n",
        stats.missing_meta_description
    ));

    if records.is_empty() {
        md.push_str("_No pages were scraped._\n");
        return md;
    }

    md.push_str("## Pages\n\n");
    md.push_str("| URL | Status | Title | H1 | Meta Description |\n");
    md.push_str("|-----|--------|-------|----|------------------|\n");

    for record in records {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            escape_cell(&record.url),
            record.status_code,
            escape_cell(&record.title),
            escape_cell(&record.h1),
            escape_cell(&record.meta_description)
        ));
    }

    md
}

/// Escapes a value for use inside a table cell
fn escape_cell(value: &str) -> String {
    value
        .replace('|', "\\|")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
