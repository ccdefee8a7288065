//! Record sink trait
//!
//! A sink accepts the records of one crawl and writes them somewhere. Sinks
//! are generic over `std::io::Write` so the CLI can target stdout or a file
//! and tests can target a `Vec<u8>`.

use crate::{OutputResult, SeoRecord};

/// Destination for extracted records
pub trait RecordSink {
    /// Writes all records of a crawl
    ///
    /// # Arguments
    ///
    /// * `records` - Records in the order they were produced
    fn write_records(&mut self, records: &[SeoRecord]) -> OutputResult<()>;
}

/// Collects records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<SeoRecord>,
}

impl RecordSink for MemorySink {
    fn write_records(&mut self, records: &[SeoRecord]) -> OutputResult<()> {
        self.records.extend_from_slice(records);
        Ok(())
    }
}
