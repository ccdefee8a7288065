//! Statistics over scraped records
//!
//! This module summarizes a record set: status code classes and how many
//! pages lack each SEO field.

use crate::SeoRecord;
use std::collections::{BTreeMap, HashMap};

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    /// Number of records
    pub total_records: u64,

    /// Count of records per status class (2 for 2xx, 4 for 4xx, ...)
    pub by_status_class: BTreeMap<u16, u64>,

    /// Records with an empty title
    pub missing_title: u64,

    /// Records with an empty first heading
    pub missing_h1: u64,

    /// Records with an empty meta description
    pub missing_meta_description: u64,

    /// Records whose non-empty title is shared with another record
    pub duplicate_titles: u64,
}

impl CrawlStatistics {
    /// Computes statistics for a record set
    pub fn from_records(records: &[SeoRecord]) -> Self {
        let mut stats = Self {
            total_records: records.len() as u64,
            ..Self::default()
        };
        let mut titles: HashMap<&str, u64> = HashMap::new();

        for record in records {
            *stats
                .by_status_class
                .entry(record.status_code / 100)
                .or_insert(0) += 1;

            if record.title.is_empty() {
                stats.missing_title += 1;
            } else {
                *titles.entry(record.title.as_str()).or_insert(0) += 1;
            }
            if record.h1.is_empty() {
                stats.missing_h1 += 1;
            }
            if record.meta_description.is_empty() {
                stats.missing_meta_description += 1;
            }
        }

        stats.duplicate_titles = titles.values().filter(|&&count| count > 1).sum();
        stats
    }

    /// Returns the share of 2xx records as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_records == 0 {
            return 0.0;
        }
        let ok = self.by_status_class.get(&2).copied().unwrap_or(0);
        (ok as f64 / self.total_records as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
/// * `pages_discovered` - Number of page URLs discovery produced
pub fn print_statistics(stats: &CrawlStatistics, pages_discovered: usize) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Pages discovered: {}", pages_discovered);
    println!("  Records extracted: {}", stats.total_records);
    println!(
        "  Pages without a record: {}",
        (pages_discovered as u64).saturating_sub(stats.total_records)
    );
    println!();

    if !stats.by_status_class.is_empty() {
        println!("Records by Status:");
        for (class, count) in &stats.by_status_class {
            println!("  {}xx: {}", class, count);
        }
        println!();
    }

    println!("Missing Fields:");
    println!("  Title: {}", stats.missing_title);
    println!("  H1: {}", stats.missing_h1);
    println!("  Meta description: {}", stats.missing_meta_description);
    println!("  Duplicate titles: {}", stats.duplicate_titles);
    println!();

    println!("Success Rate: {:.1}%", stats.success_rate());
}
