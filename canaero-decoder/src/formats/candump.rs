//! candump capture log parser
//!
//! Parses the text log format written by `candump -l`:
//!
//! ```text
//! (1690000000.000000) can0 154#0A020000B6F3FC00
//! ```
//!
//! One frame per line: parenthesized timestamp in seconds, interface token,
//! hex CAN identifier, `#`, hex frame data. Lines that do not follow this
//! grammar exactly are rejected without error.

use crate::types::RawFrame;
use regex::Regex;
use std::io::BufRead;
use std::sync::LazyLock;

static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(([0-9.]+)\)\s+can[0-9]+\s+([0-9A-Fa-f]+)#([0-9A-Fa-f]*)\s*$")
        .expect("candump line pattern is valid")
});

/// candump line parser
pub struct CandumpParser;

impl CandumpParser {
    /// Parse one capture line into a raw frame
    ///
    /// Returns None on any grammar mismatch, unparsable timestamp,
    /// identifier wider than 32 bits, or malformed (odd-length) data hex.
    pub fn parse_line(line: &str) -> Option<RawFrame> {
        let caps = LINE_PATTERN.captures(line)?;

        let timestamp: f64 = caps[1].parse().ok()?;
        let can_id = u32::from_str_radix(&caps[2], 16).ok()?;
        let data = hex::decode(&caps[3]).ok()?;

        Some(RawFrame {
            timestamp,
            can_id,
            data,
        })
    }

    /// Iterate over the lines of a capture stream
    ///
    /// Invalid UTF-8 is replaced rather than reported, so a corrupted line
    /// simply fails to parse instead of aborting the stream.
    pub fn lines<R: BufRead>(reader: R) -> CandumpLines<R> {
        CandumpLines {
            reader,
            buf: Vec::new(),
        }
    }
}

/// Iterator over capture lines (see [`CandumpParser::lines`])
pub struct CandumpLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> Iterator for CandumpLines<R> {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => Some(Ok(String::from_utf8_lossy(&self.buf).into_owned())),
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_valid_line() {
        let frame = CandumpParser::parse_line("(1690000000.000000) can0 154#0A02B6F3FC00").unwrap();
        assert_eq!(frame.timestamp, 1690000000.0);
        assert_eq!(frame.can_id, 0x154);
        assert_eq!(frame.data, vec![0x0A, 0x02, 0xB6, 0xF3, 0xFC, 0x00]);
        assert_eq!(frame.dlc(), 6);
    }

    #[test]
    fn test_parse_tolerates_line_terminator() {
        let frame = CandumpParser::parse_line("(1.5) can12 3f4#0102030405060708\r\n").unwrap();
        assert_eq!(frame.timestamp, 1.5);
        assert_eq!(frame.can_id, 0x3F4);
        assert_eq!(frame.dlc(), 8);
    }

    #[test]
    fn test_parse_empty_payload() {
        let frame = CandumpParser::parse_line("(1.0) can0 154#").unwrap();
        assert!(frame.data.is_empty());
    }

    #[test]
    fn test_parse_rejects_mismatches() {
        let rejected = [
            "",
            "garbage",
            "1690000000.0 can0 154#0A020000",
            "(1690000000.0) vcan0 154#0A020000",
            "(1690000000.0) can 154#0A020000",
            "(1690000000.0) can0 154 0A020000",
            "(1690000000.0) can0 #0A020000",
            "can0 (1690000000.0) 154#0A020000",
            "(1690000000.0) can0 154#0A020000 trailing",
            "(1690000000.0) can0 154#R",
            "(-1.0) can0 154#0A020000",
        ];
        for line in rejected {
            assert!(CandumpParser::parse_line(line).is_none(), "accepted {:?}", line);
        }
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        // odd-length data hex
        assert!(CandumpParser::parse_line("(1.0) can0 154#0A020").is_none());
        // unparsable timestamp
        assert!(CandumpParser::parse_line("(1.0.0) can0 154#0A020000").is_none());
        // identifier wider than 32 bits
        assert!(CandumpParser::parse_line("(1.0) can0 1FFFFFFFFF#0A020000").is_none());
    }

    #[test]
    fn test_lines_lossy() {
        let input: &[u8] = b"(1.0) can0 154#0A020000\n\xFF\xFE\n(2.0) can0 155#0A020000";
        let lines: Vec<String> = CandumpParser::lines(Cursor::new(input))
            .collect::<std::io::Result<_>>()
            .unwrap();

        assert_eq!(lines.len(), 3);
        assert!(CandumpParser::parse_line(&lines[0]).is_some());
        assert!(CandumpParser::parse_line(&lines[1]).is_none());
        assert_eq!(CandumpParser::parse_line(&lines[2]).unwrap().can_id, 0x155);
    }
}
