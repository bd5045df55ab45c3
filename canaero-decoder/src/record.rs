//! Record assembly
//!
//! Merges the extracted frame, its header, the decoded payload and the
//! catalog entry into one [`OutputRecord`].

use crate::config::TimestampFormat;
use crate::datatypes::ParameterCatalog;
use crate::header::FrameHeader;
use crate::types::{DecodedPayload, OutputRecord, RawFrame};
use chrono::{DateTime, SecondsFormat};

/// Builds output records; holds no state besides the shared catalog
pub struct RecordAssembler<'a> {
    catalog: &'a ParameterCatalog,
    timestamp_format: TimestampFormat,
}

impl<'a> RecordAssembler<'a> {
    pub fn new(catalog: &'a ParameterCatalog, timestamp_format: TimestampFormat) -> Self {
        Self {
            catalog,
            timestamp_format,
        }
    }

    /// Assemble one record from its parts
    pub fn assemble(
        &self,
        frame: &RawFrame,
        header: FrameHeader,
        payload: DecodedPayload,
    ) -> OutputRecord {
        let info = self.catalog.lookup(frame.can_id);

        OutputRecord {
            timestamp: render_timestamp(frame.timestamp, self.timestamp_format),
            can_id: frame.can_id,
            name: info.name.to_string(),
            unit: info.unit.to_string(),
            node_id: header.node_id,
            service_code: header.service_code,
            message_code: header.message_code,
            data_type_code: header.data_type_code,
            status: payload.status,
            value: payload.value,
            raw: frame.data.clone(),
        }
    }
}

/// Render a capture timestamp in seconds
///
/// The ISO-8601 rendering rounds to whole microseconds (candump's resolution)
/// before truncating to milliseconds. Timestamps outside chrono's range fall
/// back to the seconds rendering.
pub fn render_timestamp(secs: f64, format: TimestampFormat) -> String {
    match format {
        TimestampFormat::Seconds => format!("{:.6}", secs),
        TimestampFormat::Iso8601 => {
            let mut whole = secs.floor();
            let mut micros = ((secs - whole) * 1_000_000.0).round();
            if micros >= 1_000_000.0 {
                whole += 1.0;
                micros = 0.0;
            }
            let nanos = micros as u32 * 1_000;
            match DateTime::from_timestamp(whole as i64, nanos) {
                Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, false),
                None => format!("{:.6}", secs),
            }
        }
    }
}
