//! Record output (CSV, JSON lines)

use canaero_decoder::{DecoderError, OutputRecord, RecordSink};
use std::io::Write;

/// Writes one CSV row per record, header first
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    /// Create the sink and write the header row immediately, so an empty
    /// capture still yields a valid CSV file
    pub fn new(inner: W) -> csv::Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(inner);
        writer.write_record(OutputRecord::COLUMNS)?;
        Ok(Self { writer })
    }

    pub fn finish(mut self) -> std::io::Result<W> {
        self.writer.flush()?;
        self.writer
            .into_inner()
            .map_err(|e| std::io::Error::new(e.error().kind(), e.to_string()))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn accept(&mut self, record: OutputRecord) -> canaero_decoder::Result<()> {
        self.writer
            .serialize(record.to_row())
            .map_err(|e| DecoderError::SinkError(e.to_string()))
    }
}

/// Writes one JSON object per line
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn finish(mut self) -> std::io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn accept(&mut self, record: OutputRecord) -> canaero_decoder::Result<()> {
        serde_json::to_writer(&mut self.writer, &record.to_row())
            .map_err(|e| DecoderError::SinkError(e.to_string()))?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}
