//! Payload Decoding Engine
//!
//! Interprets the bytes following the CANaerospace header according to the
//! rule bound to the frame's data-type code. Handles byte order, element
//! width/signedness and multi-element layouts.
//!
//! Decoding never fails: unknown codes, short payloads and raw mode all
//! produce a hex rendering plus a [`DecodeStatus`] describing why.

use crate::datatypes::{ByteOrder, ElementKind, Layout, TypeTable};
use crate::types::{DecodeStatus, DecodedPayload, DecodedValue, Scalar};
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io;

/// Payload decoder - applies type table rules to payload bytes
pub struct PayloadDecoder<'a> {
    table: &'a TypeTable,
}

impl<'a> PayloadDecoder<'a> {
    pub fn new(table: &'a TypeTable) -> Self {
        Self { table }
    }

    /// Decode a payload for the given data-type code
    ///
    /// # Arguments
    /// * `payload` - Frame bytes after the 4-byte header
    /// * `data_type_code` - Header byte 1
    /// * `raw_mode` - Skip the table and return the payload as hex
    pub fn decode(&self, payload: &[u8], data_type_code: u8, raw_mode: bool) -> DecodedPayload {
        if raw_mode {
            return DecodedPayload {
                value: DecodedValue::Hex(hex::encode_upper(payload)),
                status: DecodeStatus::Raw(data_type_code),
            };
        }

        let Some(rule) = self.table.get(data_type_code) else {
            log::debug!("No rule for data type 0x{:02X}", data_type_code);
            return DecodedPayload {
                value: DecodedValue::Hex(hex::encode_upper(payload)),
                status: DecodeStatus::Unknown(data_type_code),
            };
        };

        // Never read past the rule's length; shorter payloads go through as-is
        let slice = &payload[..payload.len().min(rule.byte_len)];

        let Some(layout) = rule.layout else {
            return DecodedPayload {
                value: DecodedValue::Hex(hex::encode_upper(slice)),
                status: DecodeStatus::Decoded(rule.tag),
            };
        };

        match Self::unpack(slice, rule.byte_order, layout) {
            Ok(mut values) => {
                let value = if values.len() == 1 {
                    DecodedValue::Scalar(values.remove(0))
                } else {
                    DecodedValue::Sequence(values)
                };
                DecodedPayload {
                    value,
                    status: DecodeStatus::Decoded(rule.tag),
                }
            }
            Err(e) => {
                log::debug!(
                    "Rule {} needs {} bytes but payload only has {}: {}",
                    rule.tag,
                    rule.byte_len,
                    slice.len(),
                    e
                );
                DecodedPayload {
                    value: DecodedValue::Hex(hex::encode_upper(slice)),
                    status: DecodeStatus::DecodeError(rule.tag),
                }
            }
        }
    }

    /// Unpack `layout.count` elements from the slice
    fn unpack(slice: &[u8], byte_order: ByteOrder, layout: Layout) -> io::Result<Vec<Scalar>> {
        let mut reader = slice;
        (0..layout.count)
            .map(|_| match byte_order {
                ByteOrder::BigEndian => read_element::<BigEndian>(&mut reader, layout.kind),
                ByteOrder::LittleEndian => read_element::<LittleEndian>(&mut reader, layout.kind),
            })
            .collect()
    }
}

/// Read one element of `kind` with byte order `B`
fn read_element<B: byteorder::ByteOrder>(reader: &mut &[u8], kind: ElementKind) -> io::Result<Scalar> {
    let value = match kind {
        ElementKind::I8 => Scalar::Signed(i64::from(reader.read_i8()?)),
        ElementKind::U8 => Scalar::Unsigned(u64::from(reader.read_u8()?)),
        ElementKind::I16 => Scalar::Signed(i64::from(reader.read_i16::<B>()?)),
        ElementKind::U16 => Scalar::Unsigned(u64::from(reader.read_u16::<B>()?)),
        ElementKind::I32 => Scalar::Signed(i64::from(reader.read_i32::<B>()?)),
        ElementKind::U32 => Scalar::Unsigned(u64::from(reader.read_u32::<B>()?)),
        ElementKind::F32 => Scalar::Float32(reader.read_f32::<B>()?),
        ElementKind::F64 => Scalar::Float64(reader.read_f64::<B>()?),
    };
    Ok(value)
}
