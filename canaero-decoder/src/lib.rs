//! CANaerospace Log Decoder Library
//!
//! A stateless, reusable library for decoding CANaerospace frames from text
//! capture logs (candump format) into typed, human-readable records.
//!
//! # Architecture
//!
//! Each capture line goes through a fixed sequence of steps:
//! - Extract timestamp, CAN identifier and frame bytes from the line
//! - Split the 4-byte CANaerospace header (node id, data type, service, message code)
//! - Decode the payload according to the data-type table
//! - Assemble an output record, naming the identifier from the parameter catalog
//!
//! Malformed lines and short frames are dropped; unknown data types and short
//! payloads still produce a record, tagged with a fallback status. Nothing in
//! the per-line path returns an error.
//!
//! The library does NOT:
//! - Parse command lines or configuration files
//! - Serialize records (CSV, JSON, ...)
//! - Correct or resynchronize timestamps
//!
//! All of that is in the application layer (canaero-cli).
//!
//! # Example Usage
//!
//! ```
//! use canaero_decoder::{Decoder, DecoderConfig, OutputRecord, TimestampFormat};
//!
//! let config = DecoderConfig::new()
//!     .with_timestamp_format(TimestampFormat::Seconds)
//!     .add_id_filter(0x154);
//! let decoder = Decoder::with_config(config);
//!
//! let lines = [
//!     "(1690000000.000000) can0 154#0A0200003F800000",
//!     "(1690000000.010000) can0 150#0A0200003F800000",
//! ];
//!
//! let mut records: Vec<OutputRecord> = Vec::new();
//! let stats = decoder.process(lines, &mut records).unwrap();
//!
//! assert_eq!(stats.records, 1);
//! assert_eq!(records[0].name, "Flaps position");
//! assert_eq!(records[0].value.to_string(), "1.0");
//! ```

// Public modules
pub mod config;
pub mod datatypes;
pub mod decoder;
pub mod formats;
pub mod header;
pub mod payload_decoder;
pub mod record;
pub mod types;

// Re-export main types for convenience
pub use config::{parse_can_id, DecoderConfig, TimestampFormat};
pub use datatypes::{DecodeRule, ParameterCatalog, ParameterInfo, TypeTable};
pub use decoder::{Decoder, DecodingIterator, LineOutcome, PipelineStats, RecordSink};
pub use header::{FrameHeader, FrameTooShort};
pub use types::{
    DecodeStatus, DecodedPayload, DecodedValue, DecoderError, OutputRecord, RawFrame,
    RecordRow, Result, Scalar,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
