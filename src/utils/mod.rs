//! Utility modules for SAW ranking
//!
//! Shared functionality used across the pipeline:
//! - Encoding: categorical/boolean criteria to numbers
//! - Normalization: benefit/cost scaling onto 0-1
//! - Frame helpers: column validation and projection

pub mod encoding;
pub mod normalization;
pub mod frame_helpers;

// Re-export commonly used items
pub use encoding::{encode_column, label_encode, EncodedColumn, Encoding};
pub use normalization::normalize_column;
pub use frame_helpers::{column_as_strings, require_columns, select_present};
