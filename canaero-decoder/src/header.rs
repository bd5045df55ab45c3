//! CANaerospace header decomposition
//!
//! Every CANaerospace frame starts with a 4-byte header:
//!
//! | byte | field          |
//! |------|----------------|
//! | 0    | node id        |
//! | 1    | data-type code |
//! | 2    | service code   |
//! | 3    | message code   |
//!
//! The remaining bytes are the typed payload.

/// Header size in bytes
pub const HEADER_LEN: usize = 4;

/// The 4-byte CANaerospace header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub node_id: u8,
    pub data_type_code: u8,
    pub service_code: u8,
    pub message_code: u8,
}

/// Frame data shorter than the header; the frame is dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("frame too short: {len} bytes, header needs 4")]
pub struct FrameTooShort {
    pub len: usize,
}

/// Split frame data into header and payload
pub fn decompose(data: &[u8]) -> Result<(FrameHeader, &[u8]), FrameTooShort> {
    match data {
        [node_id, data_type_code, service_code, message_code, payload @ ..] => Ok((
            FrameHeader {
                node_id: *node_id,
                data_type_code: *data_type_code,
                service_code: *service_code,
                message_code: *message_code,
            },
            payload,
        )),
        _ => Err(FrameTooShort { len: data.len() }),
    }
}
