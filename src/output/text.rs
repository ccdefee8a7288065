//! Plain text output, one line per record

use crate::output::traits::RecordSink;
use crate::{OutputResult, SeoRecord};
use std::io::Write;

/// Writes each record on its own line
pub struct TextSink<W: Write> {
    writer: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for TextSink<W> {
    fn write_records(&mut self, records: &[SeoRecord]) -> OutputResult<()> {
        for record in records {
            writeln!(
                self.writer,
                "{} [{}] title={:?} h1={:?} description={:?}",
                record.url, record.status_code, record.title, record.h1, record.meta_description
            )?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
