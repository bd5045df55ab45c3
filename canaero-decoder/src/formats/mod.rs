//! Capture log format parsers
//!
//! This module contains parsers for text capture formats. Each parser turns
//! one line into a [`RawFrame`](crate::types::RawFrame) or rejects it.

pub mod candump;

// Re-export parser types
pub use candump::{CandumpLines, CandumpParser};
