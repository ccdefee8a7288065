//! JSON output

use crate::output::traits::RecordSink;
use crate::{OutputResult, SeoRecord};
use std::io::Write;

/// Writes records as a pretty-printed JSON array
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonSink<W> {
    fn write_records(&mut self, records: &[SeoRecord]) -> OutputResult<()> {
        serde_json::to_writer_pretty(&mut self.writer, records)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_fields() {
        let record = SeoRecord {
            url: "https://example.com/".to_string(),
            title: "Home".to_string(),
            h1: "Welcome".to_string(),
            meta_description: "The \"best\" page".to_string(),
            status_code: 200,
        };

        let mut sink = JsonSink::new(Vec::new());
        sink.write_records(&[record]).unwrap();
        let output = String::from_utf8(sink.into_inner()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["url"], "https://example.com/");
        assert_eq!(parsed[0]["title"], "Home");
        assert_eq!(parsed[0]["h1"], "Welcome");
        assert_eq!(parsed[0]["meta_description"], "The \"best\" page");
        assert_eq!(parsed[0]["status_code"], 200);
    }

    #[test]
    fn test_empty_records_is_empty_array() {
        let mut sink = JsonSink::new(Vec::new());
        sink.write_records(&[]).unwrap();
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output.trim(), "[]");
    }
}
