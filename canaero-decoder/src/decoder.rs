//! Main decoder API
//!
//! This module provides the primary interface for the decoder library.
//! The Decoder struct owns the type table, the parameter catalog and the
//! configuration, and drives capture lines through extraction, header
//! decomposition, payload decoding and record assembly.

use crate::config::DecoderConfig;
use crate::datatypes::{ParameterCatalog, TypeTable};
use crate::formats::CandumpParser;
use crate::header::{self, FrameTooShort};
use crate::payload_decoder::PayloadDecoder;
use crate::record::RecordAssembler;
use crate::types::{DecodedPayload, OutputRecord, Result};
use std::io::BufRead;

/// Destination for assembled records
///
/// Sinks receive records one at a time in input order. A sink error stops
/// the pipeline and is returned to the caller.
pub trait RecordSink {
    fn accept(&mut self, record: OutputRecord) -> Result<()>;
}

impl RecordSink for Vec<OutputRecord> {
    fn accept(&mut self, record: OutputRecord) -> Result<()> {
        self.push(record);
        Ok(())
    }
}

/// What happened to one input line
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// A record was produced
    Record(OutputRecord),
    /// The line does not follow the capture grammar
    NoMatch,
    /// The frame has fewer bytes than the CANaerospace header
    TooShort(FrameTooShort),
    /// The frame's CAN identifier is not in the filter set
    Filtered(u32),
}

/// Per-outcome line counts for one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub lines: usize,
    pub records: usize,
    pub no_match: usize,
    pub too_short: usize,
    pub filtered: usize,
    /// Records emitted with an unknown/decode_error/raw status
    pub fallbacks: usize,
}

impl PipelineStats {
    fn record(&mut self, outcome: &LineOutcome) {
        self.lines += 1;
        match outcome {
            LineOutcome::Record(record) => {
                self.records += 1;
                if record.status.is_fallback() {
                    self.fallbacks += 1;
                }
            }
            LineOutcome::NoMatch => self.no_match += 1,
            LineOutcome::TooShort(_) => self.too_short += 1,
            LineOutcome::Filtered(_) => self.filtered += 1,
        }
    }

    /// Lines that produced no record
    pub fn dropped(&self) -> usize {
        self.no_match + self.too_short + self.filtered
    }
}

/// The main decoder struct - entry point for all decoding operations
pub struct Decoder {
    type_table: TypeTable,
    catalog: ParameterCatalog,
    config: DecoderConfig,
}

impl Decoder {
    /// Create a decoder with the standard tables and default configuration
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    /// Create a decoder with the standard tables
    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            type_table: TypeTable::standard(),
            catalog: ParameterCatalog::standard(),
            config,
        }
    }

    /// Replace the parameter catalog
    ///
    /// # Example
    /// ```
    /// use canaero_decoder::{Decoder, ParameterCatalog};
    ///
    /// let catalog = ParameterCatalog::standard().with_entry(0x7D0, "Test Voltage", "V");
    /// let decoder = Decoder::new().with_catalog(catalog);
    /// assert_eq!(decoder.catalog().lookup(0x7D0).unit, "V");
    /// ```
    pub fn with_catalog(mut self, catalog: ParameterCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn type_table(&self) -> &TypeTable {
        &self.type_table
    }

    pub fn catalog(&self) -> &ParameterCatalog {
        &self.catalog
    }

    /// Decode a payload (frame bytes after the header) with the configured raw mode
    pub fn decode_payload(&self, payload: &[u8], data_type_code: u8) -> DecodedPayload {
        PayloadDecoder::new(&self.type_table).decode(payload, data_type_code, self.config.raw_mode)
    }

    /// Run one capture line through the pipeline
    pub fn decode_line(&self, line: &str) -> LineOutcome {
        let Some(frame) = CandumpParser::parse_line(line) else {
            log::trace!("No match: {:?}", line.trim_end());
            return LineOutcome::NoMatch;
        };

        let (header, payload) = match header::decompose(&frame.data) {
            Ok(parts) => parts,
            Err(e) => {
                log::trace!("Dropping frame 0x{:X}: {}", frame.can_id, e);
                return LineOutcome::TooShort(e);
            }
        };

        if !self.config.should_process_id(frame.can_id) {
            return LineOutcome::Filtered(frame.can_id);
        }

        let decoded = self.decode_payload(payload, header.data_type_code);
        let record = RecordAssembler::new(&self.catalog, self.config.timestamp_format)
            .assemble(&frame, header, decoded);

        LineOutcome::Record(record)
    }

    /// Lazily decode a sequence of lines, one outcome per line
    pub fn decode_lines<I, L>(&self, lines: I) -> DecodingIterator<'_, I::IntoIter>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        DecodingIterator {
            lines: lines.into_iter(),
            decoder: self,
        }
    }

    /// Decode every line and hand each record to the sink, in input order
    ///
    /// Malformed lines never stop the run; only a sink error does.
    pub fn process<I, L, S>(&self, lines: I, sink: &mut S) -> Result<PipelineStats>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
        S: RecordSink + ?Sized,
    {
        self.run(lines.into_iter().map(Ok), sink)
    }

    /// Like [`process`](Self::process), streaming lines from a reader
    ///
    /// Stops with an error only if reading fails or the sink rejects a record.
    pub fn process_reader<R, S>(&self, reader: R, sink: &mut S) -> Result<PipelineStats>
    where
        R: BufRead,
        S: RecordSink + ?Sized,
    {
        self.run(CandumpParser::lines(reader), sink)
    }

    fn run<I, L, S>(&self, lines: I, sink: &mut S) -> Result<PipelineStats>
    where
        I: Iterator<Item = std::io::Result<L>>,
        L: AsRef<str>,
        S: RecordSink + ?Sized,
    {
        let mut stats = PipelineStats::default();

        for line in lines {
            let outcome = self.decode_line(line?.as_ref());
            stats.record(&outcome);
            if let LineOutcome::Record(record) = outcome {
                sink.accept(record)?;
            }
        }

        log::info!(
            "Processed {} lines: {} records, {} dropped ({} no match, {} too short, {} filtered)",
            stats.lines,
            stats.records,
            stats.dropped(),
            stats.no_match,
            stats.too_short,
            stats.filtered
        );
        Ok(stats)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator that turns capture lines into line outcomes
pub struct DecodingIterator<'a, I> {
    lines: I,
    decoder: &'a Decoder,
}

impl<'a, I, L> Iterator for DecodingIterator<'a, I>
where
    I: Iterator<Item = L>,
    L: AsRef<str>,
{
    type Item = LineOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        Some(self.decoder.decode_line(line.as_ref()))
    }
}
