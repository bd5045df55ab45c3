//! Data-type table and parameter catalog
//!
//! The two static lookup tables the decoder consults: data-type code to
//! decode rule, and CAN identifier to parameter name/unit.

pub mod catalog;
pub mod table;

// Re-export key types for convenience
pub use catalog::{ParameterCatalog, ParameterInfo};
pub use table::{
    ByteOrder, DecodeRule, ElementKind, Layout, TypeTable, RESERVED_TAG, USER_DEFINED_TAG,
};
