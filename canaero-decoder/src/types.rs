//! Core types for the CANaerospace decoder library
//!
//! This module defines the fundamental types that flow through the decoder:
//! raw frames extracted from capture lines, decoded payload values with their
//! status, and the normalized output record handed to sinks.

use serde::Serialize;
use std::fmt;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, DecoderError>;

/// Raw frame extracted from one capture log line
///
/// This represents a single CAN frame as read from the log line,
/// before the CANaerospace header is split off.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFrame {
    /// Capture timestamp in seconds since the Unix epoch
    pub timestamp: f64,
    /// CAN identifier
    pub can_id: u32,
    /// Frame data bytes (header + payload)
    pub data: Vec<u8>,
}

impl RawFrame {
    /// Get the data length code (DLC) - number of data bytes
    pub fn dlc(&self) -> usize {
        self.data.len()
    }
}

/// Errors that can occur while running the pipeline
///
/// Malformed lines and undecodable payloads are not errors; they are reported
/// through [`LineOutcome`](crate::LineOutcome) and [`DecodeStatus`].
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("Invalid CAN identifier: {0}")]
    InvalidCanId(String),

    #[error("Record sink error: {0}")]
    SinkError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A single numeric element unpacked from a payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    /// Signed integer (CHAR, SHORT, LONG families)
    Signed(i64),
    /// Unsigned integer (UCHAR, USHORT, ULONG families and tags)
    Unsigned(u64),
    /// IEEE-754 single precision
    Float32(f32),
    /// IEEE-754 double precision
    Float64(f64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Signed(v) => write!(f, "{}", v),
            Scalar::Unsigned(v) => write!(f, "{}", v),
            // Debug keeps the shortest round-trip form and the trailing ".0"
            Scalar::Float32(v) => write!(f, "{:?}", v),
            Scalar::Float64(v) => write!(f, "{:?}", v),
        }
    }
}

/// Decoded payload value
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    /// Exactly one element was unpacked
    Scalar(Scalar),
    /// Several elements, rendered comma-joined in payload order
    Sequence(Vec<Scalar>),
    /// Uppercase hex of the bytes that could not (or were not meant to) be unpacked
    Hex(String),
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Scalar(v) => write!(f, "{}", v),
            DecodedValue::Sequence(values) => {
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", v)?;
                }
                Ok(())
            }
            DecodedValue::Hex(s) => f.write_str(s),
        }
    }
}

/// Outcome of decoding one payload
///
/// Decoding never fails; every fallback is represented here instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStatus {
    /// Decoded with the rule carrying this tag (or hex of a skip-only rule)
    Decoded(&'static str),
    /// Raw mode was requested; the table was not consulted
    Raw(u8),
    /// No rule exists for this data-type code
    Unknown(u8),
    /// The payload did not fit the rule carrying this tag
    DecodeError(&'static str),
}

impl DecodeStatus {
    /// True for every status other than a successful rule decode
    pub fn is_fallback(&self) -> bool {
        !matches!(self, DecodeStatus::Decoded(_))
    }
}

impl fmt::Display for DecodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeStatus::Decoded(tag) => f.write_str(tag),
            DecodeStatus::Raw(code) => write!(f, "raw_0x{:02X}", code),
            DecodeStatus::Unknown(code) => write!(f, "unknown_0x{:02X}", code),
            DecodeStatus::DecodeError(tag) => write!(f, "decode_error_{}", tag),
        }
    }
}

/// A decoded payload value paired with its status
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPayload {
    pub value: DecodedValue,
    pub status: DecodeStatus,
}

/// Normalized output record - the primary output of the decoder
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    /// Timestamp rendered per the configured [`TimestampFormat`](crate::TimestampFormat)
    pub timestamp: String,
    /// CAN identifier
    pub can_id: u32,
    /// Parameter name from the catalog ("Unknown" if not listed)
    pub name: String,
    /// Engineering unit from the catalog (empty if not listed)
    pub unit: String,
    pub node_id: u8,
    pub service_code: u8,
    pub message_code: u8,
    pub data_type_code: u8,
    /// Data-type tag or fallback status
    pub status: DecodeStatus,
    pub value: DecodedValue,
    /// Full frame bytes as captured (header included)
    pub raw: Vec<u8>,
}

impl OutputRecord {
    /// Column names, in serialization order
    pub const COLUMNS: [&'static str; 11] = [
        "timestamp",
        "can_id",
        "can_id descr",
        "unit",
        "node_id",
        "service_code",
        "message_code",
        "data_type_code",
        "data_type",
        "decoded_value",
        "raw_data_hex",
    ];

    /// Render the record into its serialized column form
    pub fn to_row(&self) -> RecordRow {
        RecordRow {
            timestamp: self.timestamp.clone(),
            can_id: format!("0x{:X} ({})", self.can_id, self.can_id),
            name: self.name.clone(),
            unit: self.unit.clone(),
            node_id: self.node_id,
            service_code: self.service_code,
            message_code: self.message_code,
            data_type_code: format!("0x{:02X}", self.data_type_code),
            data_type: self.status.to_string(),
            decoded_value: self.value.to_string(),
            raw_data_hex: hex::encode_upper(&self.raw),
        }
    }
}

/// Serialized form of an [`OutputRecord`]
///
/// Field order matches [`OutputRecord::COLUMNS`] and is the contract for
/// every output medium.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordRow {
    pub timestamp: String,
    pub can_id: String,
    #[serde(rename = "can_id descr")]
    pub name: String,
    pub unit: String,
    pub node_id: u8,
    pub service_code: u8,
    pub message_code: u8,
    pub data_type_code: String,
    pub data_type: String,
    pub decoded_value: String,
    pub raw_data_hex: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DecoderError::InvalidCanId("0xZZ".into()).to_string(),
            "Invalid CAN identifier: 0xZZ"
        );
        assert_eq!(
            DecoderError::SinkError("closed".into()).to_string(),
            "Record sink error: closed"
        );
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        assert_eq!(DecoderError::from(io).to_string(), "IO error: pipe");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(DecodeStatus::Decoded("FLOAT").to_string(), "FLOAT");
        assert_eq!(DecodeStatus::Raw(0x02).to_string(), "raw_0x02");
        assert_eq!(DecodeStatus::Unknown(0xFF).to_string(), "unknown_0xFF");
        assert_eq!(DecodeStatus::DecodeError("SHORT2").to_string(), "decode_error_SHORT2");
        assert!(DecodeStatus::Unknown(0x63).is_fallback());
        assert!(!DecodeStatus::Decoded("UDEF").is_fallback());
    }

    #[test]
    fn test_value_display() {
        assert_eq!(DecodedValue::Scalar(Scalar::Float32(1.0)).to_string(), "1.0");
        assert_eq!(DecodedValue::Scalar(Scalar::Float64(-2.5)).to_string(), "-2.5");
        assert_eq!(DecodedValue::Scalar(Scalar::Signed(-7)).to_string(), "-7");
        assert_eq!(
            DecodedValue::Sequence(vec![Scalar::Unsigned(1), Scalar::Unsigned(2), Scalar::Unsigned(255)])
                .to_string(),
            "1,2,255"
        );
        assert_eq!(DecodedValue::Hex("FC00".into()).to_string(), "FC00");
        assert_eq!(DecodedValue::Hex(String::new()).to_string(), "");
    }

    #[test]
    fn test_record_row_rendering() {
        let record = OutputRecord {
            timestamp: "1690000000.000000".into(),
            can_id: 0x154,
            name: "Flaps position".into(),
            unit: "deg".into(),
            node_id: 10,
            service_code: 0,
            message_code: 7,
            data_type_code: 0x02,
            status: DecodeStatus::Decoded("FLOAT"),
            value: DecodedValue::Scalar(Scalar::Float32(1.0)),
            raw: vec![0x0A, 0x02, 0x00, 0x07, 0x3F, 0x80, 0x00, 0x00],
        };

        let row = record.to_row();
        assert_eq!(row.can_id, "0x154 (340)");
        assert_eq!(row.data_type_code, "0x02");
        assert_eq!(row.data_type, "FLOAT");
        assert_eq!(row.decoded_value, "1.0");
        assert_eq!(row.raw_data_hex, "0A0200073F800000");
    }
}
