//! Output module for writing scraped records
//!
//! This module handles:
//! - The `RecordSink` interface records are written through
//! - JSON, markdown and plain text renderings
//! - Summary statistics over a record set

mod json;
mod markdown;
pub mod stats;
mod text;
mod traits;

pub use json::JsonSink;
pub use markdown::{format_markdown_report, MarkdownSink};
pub use stats::{print_statistics, CrawlStatistics};
pub use text::TextSink;
pub use traits::{MemorySink, RecordSink};

use crate::config::OutputFormat;
use crate::{OutputResult, SeoRecord};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Builds a sink for the given format around a writer
pub fn sink_for<'a, W: Write + 'a>(
    format: OutputFormat,
    writer: W,
    seed: &str,
) -> Box<dyn RecordSink + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonSink::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownSink::new(writer).with_seed(seed)),
        OutputFormat::Text => Box::new(TextSink::new(writer)),
    }
}

/// Writes records to a file, or to stdout when no path is given
///
/// # Arguments
///
/// * `records` - The records to write
/// * `format` - Output format
/// * `path` - Destination file; stdout when `None`
/// * `seed` - The seed sitemap, named in report headers
pub fn write_records(
    records: &[SeoRecord],
    format: OutputFormat,
    path: Option<&Path>,
    seed: &str,
) -> OutputResult<()> {
    match path {
        Some(path) => {
            let file = BufWriter::new(File::create(path)?);
            sink_for(format, file, seed).write_records(records)
        }
        None => {
            let stdout = io::stdout();
            sink_for(format, stdout.lock(), seed).write_records(records)
        }
    }
}
