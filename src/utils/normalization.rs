//! Normalization Utilities
//!
//! Maps raw criterion values onto a common 0-1 scale:
//! - benefit: value / max(column)
//! - cost:    min(column) / value
//!
//! A column that would divide by zero is reported as degenerate instead of
//! producing NaN or infinity. Negative and non-finite values are rejected too,
//! since they would push results outside the unit interval.

use crate::criteria::Direction;
use crate::error::{DegenerateReason, Result, SawError};

/// Normalize one column according to its direction
pub fn normalize_column(column: &str, values: &[f64], direction: Direction) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(SawError::EmptyInput);
    }

    let degenerate = |reason| SawError::DegenerateColumn {
        column: column.to_string(),
        reason,
    };

    for (row, &v) in values.iter().enumerate() {
        if !v.is_finite() {
            return Err(degenerate(DegenerateReason::NonFinite { row }));
        }
        if v < 0.0 {
            return Err(degenerate(DegenerateReason::NegativeValue { row }));
        }
    }

    match direction {
        Direction::Benefit => {
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if max == 0.0 {
                return Err(degenerate(DegenerateReason::ZeroMaximum));
            }
            Ok(values.iter().map(|v| v / max).collect())
        }
        Direction::Cost => {
            // A zero anywhere is a division by zero for that row, and makes the
            // column minimum 0 for every other row
            if let Some(row) = values.iter().position(|&v| v == 0.0) {
                return Err(degenerate(DegenerateReason::ZeroValue { row }));
            }
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            Ok(values.iter().map(|v| min / v).collect())
        }
    }
}
