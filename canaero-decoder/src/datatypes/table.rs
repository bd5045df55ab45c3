//! CANaerospace data-type table
//!
//! Maps the one-byte data-type code carried in every frame header to the
//! binary layout of the payload that follows it.

use std::fmt;

/// Byte order for element extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian (Intel format)
    LittleEndian,
    /// Big-endian (Motorola format)
    BigEndian,
}

/// Width, signedness and format of one payload element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
    F64,
}

impl ElementKind {
    /// Element width in bytes
    pub const fn width(self) -> usize {
        match self {
            ElementKind::I8 | ElementKind::U8 => 1,
            ElementKind::I16 | ElementKind::U16 => 2,
            ElementKind::I32 | ElementKind::U32 | ElementKind::F32 => 4,
            ElementKind::F64 => 8,
        }
    }
}

/// Active numeric layout of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub kind: ElementKind,
    pub count: usize,
}

/// Decode rule bound to a data-type code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeRule {
    /// Semantic tag (e.g. "FLOAT", "UCHAR4")
    pub tag: &'static str,
    pub byte_order: ByteOrder,
    /// None for skip-only rules, which render their slice as hex
    pub layout: Option<Layout>,
    /// Number of payload bytes the rule consumes
    pub byte_len: usize,
}

impl DecodeRule {
    /// Big-endian rule with `count` elements of `kind`
    pub const fn packed(tag: &'static str, kind: ElementKind, count: usize) -> Self {
        Self::with_order(tag, ByteOrder::BigEndian, kind, count)
    }

    pub const fn with_order(
        tag: &'static str,
        byte_order: ByteOrder,
        kind: ElementKind,
        count: usize,
    ) -> Self {
        Self {
            tag,
            byte_order,
            layout: Some(Layout { kind, count }),
            byte_len: kind.width() * count,
        }
    }

    /// Skip-only rule: `byte_len` bytes, no numeric interpretation
    pub const fn opaque(tag: &'static str, byte_len: usize) -> Self {
        Self {
            tag,
            byte_order: ByteOrder::BigEndian,
            layout: None,
            byte_len,
        }
    }
}

impl fmt::Display for DecodeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.layout {
            Some(layout) => write!(
                f,
                "{} ({} x {:?}, {:?}, {} bytes)",
                self.tag, layout.count, layout.kind, self.byte_order, self.byte_len
            ),
            None => write!(f, "{} (opaque, {} bytes)", self.tag, self.byte_len),
        }
    }
}

/// Tag of the catch-all rule for codes 0x20-0x62
pub const RESERVED_TAG: &str = "RESVD";
/// Tag of the catch-all rule for codes 0x64-0xFE
pub const USER_DEFINED_TAG: &str = "UDEF";

/// Individually defined rules for codes 0x00-0x1F, indexed by code
const STANDARD_RULES: [DecodeRule; 32] = {
    use ElementKind::*;
    [
        DecodeRule::opaque("NODATA", 0),
        DecodeRule::packed("ERROR", U32, 1),
        DecodeRule::packed("FLOAT", F32, 1),
        DecodeRule::packed("LONG", I32, 1),
        DecodeRule::packed("ULONG", U32, 1),
        DecodeRule::packed("BLONG", U32, 1),
        DecodeRule::packed("SHORT", I16, 1),
        DecodeRule::packed("USHORT", U16, 1),
        DecodeRule::packed("BSHORT", U16, 1),
        DecodeRule::packed("CHAR", I8, 1),
        DecodeRule::packed("UCHAR", U8, 1),
        DecodeRule::packed("BCHAR", U8, 1),
        DecodeRule::packed("SHORT2", I16, 2),
        DecodeRule::packed("USHORT2", U16, 2),
        DecodeRule::packed("BSHORT2", U16, 2),
        DecodeRule::packed("CHAR4", I8, 4),
        DecodeRule::packed("UCHAR4", U8, 4),
        DecodeRule::packed("BCHAR4", U8, 4),
        DecodeRule::packed("CHAR2", I8, 2),
        DecodeRule::packed("UCHAR2", U8, 2),
        DecodeRule::packed("BCHAR2", U8, 2),
        DecodeRule::packed("MEMID", U32, 1),
        DecodeRule::packed("CHKSUM", U32, 1),
        DecodeRule::packed("ACHAR", U8, 1),
        DecodeRule::packed("ACHAR2", U8, 2),
        DecodeRule::packed("ACHAR4", U8, 4),
        DecodeRule::packed("CHAR3", I8, 3),
        DecodeRule::packed("UCHAR3", U8, 3),
        DecodeRule::packed("BCHAR3", U8, 3),
        // Same layout and tag as 0x0F; both codes are on the wire
        DecodeRule::packed("CHAR4", I8, 4),
        DecodeRule::packed("DOUBLEH", F64, 1),
        DecodeRule::with_order("DOUBLEL", ByteOrder::LittleEndian, F64, 1),
    ]
};

/// Immutable table of decode rules, one slot per data-type code
///
/// Built once before processing and shared by reference with the payload
/// decoder. Codes 0x63 and 0xFF have no rule.
#[derive(Debug, Clone)]
pub struct TypeTable {
    rules: Vec<Option<DecodeRule>>,
}

impl TypeTable {
    /// Build the standard CANaerospace table
    pub fn standard() -> Self {
        let rules = (0..=u8::MAX)
            .map(|code| match code {
                0x00..=0x1F => Some(STANDARD_RULES[code as usize]),
                0x20..=0x62 => Some(DecodeRule::opaque(RESERVED_TAG, 4)),
                0x64..=0xFE => Some(DecodeRule::opaque(USER_DEFINED_TAG, 4)),
                _ => None,
            })
            .collect();

        Self { rules }
    }

    /// Look up the rule for a data-type code
    pub fn get(&self, code: u8) -> Option<&DecodeRule> {
        self.rules.get(code as usize).and_then(Option::as_ref)
    }

    /// Number of codes with a rule
    pub fn len(&self) -> usize {
        self.rules.iter().filter(|r| r.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over (code, rule) pairs in code order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &DecodeRule)> {
        self.rules
            .iter()
            .enumerate()
            .filter_map(|(code, rule)| rule.as_ref().map(|r| (code as u8, r)))
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::standard()
    }
}
