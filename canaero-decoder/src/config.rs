//! Decoder configuration types
//!
//! This module defines the configuration consumed by the decoder library:
//! identifier filtering, raw mode and timestamp rendering. Argument parsing
//! and file loading are handled by the application layer.

use crate::types::{DecoderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How the Record Assembler renders capture timestamps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampFormat {
    /// Seconds since the epoch with six decimals, as captured
    Seconds,
    /// UTC RFC 3339 with millisecond precision
    #[default]
    Iso8601,
}

/// Configuration for the decoder library
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Skip the type table and emit payloads as hex
    #[serde(default)]
    pub raw_mode: bool,

    /// Optional: only emit records for these CAN identifiers
    #[serde(default)]
    pub id_filter: Option<BTreeSet<u32>>,

    /// Timestamp rendering for output records
    #[serde(default)]
    pub timestamp_format: TimestampFormat,
}

impl DecoderConfig {
    /// Create a new decoder configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: enable or disable raw mode
    pub fn with_raw_mode(mut self, enabled: bool) -> Self {
        self.raw_mode = enabled;
        self
    }

    /// Builder method: set identifier filter
    pub fn with_id_filter(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.id_filter = Some(ids.into_iter().collect());
        self
    }

    /// Builder method: add one identifier to the filter
    pub fn add_id_filter(mut self, can_id: u32) -> Self {
        self.id_filter.get_or_insert_with(BTreeSet::new).insert(can_id);
        self
    }

    /// Builder method: set timestamp rendering
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Check if a CAN identifier should be emitted
    pub fn should_process_id(&self, can_id: u32) -> bool {
        match &self.id_filter {
            Some(ids) => ids.contains(&can_id),
            None => true,
        }
    }
}

/// Parse a hexadecimal CAN identifier such as `0x154` or `154`
pub fn parse_can_id(s: &str) -> Result<u32> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    u32::from_str_radix(digits, 16).map_err(|_| DecoderError::InvalidCanId(s.to_string()))
}
