//! Error types for the SAW ranking engine

use polars::prelude::PolarsError;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SawError>;

/// Why a column cannot be normalized
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DegenerateReason {
    /// Benefit column whose maximum is 0 (division by zero for every row)
    ZeroMaximum,
    /// Cost column containing a 0 at `row`
    ZeroValue { row: usize },
    /// Negative raw value at `row`
    NegativeValue { row: usize },
    /// NaN or infinite raw value at `row`
    NonFinite { row: usize },
}

impl fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaximum => write!(f, "column maximum is 0"),
            Self::ZeroValue { row } => write!(f, "zero value at row {row} in a cost column"),
            Self::NegativeValue { row } => write!(f, "negative value at row {row}"),
            Self::NonFinite { row } => write!(f, "non-finite value at row {row}"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SawError {
    #[error("Invalid criterion configuration (total weight {total:.3}): {reason}")]
    InvalidConfig { total: f64, reason: String },

    #[error("Column '{column}' cannot be normalized: {reason}")]
    DegenerateColumn {
        column: String,
        reason: DegenerateReason,
    },

    #[error("No records to rank")]
    EmptyInput,

    #[error("Criterion column not found: {0}")]
    MissingColumn(String),

    #[error("Missing value in column '{column}' at row {row}")]
    MissingValue { column: String, row: usize },

    #[error("Column '{column}' has unsupported type {dtype}")]
    UnsupportedColumnType { column: String, dtype: String },

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}
