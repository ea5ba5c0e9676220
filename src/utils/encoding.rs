//! Categorical Encoding
//!
//! Turns a criterion column of any supported type into raw f64 values:
//! - numeric columns are cast as-is
//! - boolean columns (and strings that only hold true/false style tokens) become 0/1
//! - other strings get a label code: distinct values sorted, code = position + 1
//!
//! Codes start at 1 so a label column never holds a 0. A single-category column
//! encodes to all 1s and normalizes to a uniform 1.0 in either direction.
//!
//! Label codes are only a numeric stand-in for normalization. The mapping is
//! built from the values of this one column in this one run, so the same
//! category can get a different code for a different input table.

use crate::error::{Result, SawError};
use polars::prelude::*;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

/// How a column was turned into numbers
#[derive(Debug, Clone, PartialEq)]
pub enum Encoding {
    Numeric,
    Flag,
    /// Sorted distinct categories; a category's code is its index + 1
    Label(Vec<String>),
}

/// Encoded criterion column
#[derive(Debug, Clone)]
pub struct EncodedColumn {
    pub name: String,
    pub values: Vec<f64>,
    pub encoding: Encoding,
}

impl EncodedColumn {
    /// Code assigned to `category` in this run (label-encoded columns only)
    pub fn code_of(&self, category: &str) -> Option<usize> {
        match &self.encoding {
            Encoding::Label(categories) => {
                categories.iter().position(|c| c == category).map(|i| i + 1)
            }
            _ => None,
        }
    }
}

/// Encode one column of the record table
pub fn encode_column(column: &Column) -> Result<EncodedColumn> {
    let name = column.name().to_string();

    match column.dtype() {
        DataType::Boolean => {
            let values = column
                .bool()?
                .into_iter()
                .enumerate()
                .map(|(row, v)| {
                    v.map(|b| if b { 1.0 } else { 0.0 })
                        .ok_or_else(|| missing(&name, row))
                })
                .collect::<Result<Vec<f64>>>()?;

            Ok(EncodedColumn {
                name,
                values,
                encoding: Encoding::Flag,
            })
        }
        DataType::String => encode_strings(&name, column),
        dt if dt.is_float() || dt.is_integer() => {
            let casted = column.cast(&DataType::Float64)?;
            let values = casted
                .f64()?
                .into_iter()
                .enumerate()
                .map(|(row, v)| v.ok_or_else(|| missing(&name, row)))
                .collect::<Result<Vec<f64>>>()?;

            Ok(EncodedColumn {
                name,
                values,
                encoding: Encoding::Numeric,
            })
        }
        DataType::Categorical(..) | DataType::Enum(..) => {
            let as_str = column.cast(&DataType::String)?;
            encode_strings(&name, &as_str)
        }
        other => Err(SawError::UnsupportedColumnType {
            column: name,
            dtype: other.to_string(),
        }),
    }
}

fn encode_strings(name: &str, column: &Column) -> Result<EncodedColumn> {
    let raw: Vec<&str> = column
        .str()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.ok_or_else(|| missing(name, row)))
        .collect::<Result<Vec<&str>>>()?;

    if let Some(values) = parse_flags(&raw) {
        return Ok(EncodedColumn {
            name: name.to_string(),
            values,
            encoding: Encoding::Flag,
        });
    }

    let (values, categories) = label_encode(&raw);
    tracing::debug!(
        column = name,
        categories = categories.len(),
        "label-encoded categorical criterion"
    );

    Ok(EncodedColumn {
        name: name.to_string(),
        values,
        encoding: Encoding::Label(categories),
    })
}

/// Map category values to their 1-based position among the sorted distinct values
pub fn label_encode(raw: &[&str]) -> (Vec<f64>, Vec<String>) {
    let distinct: BTreeSet<&str> = raw.iter().copied().collect();
    let codes: FxHashMap<&str, usize> = distinct
        .iter()
        .enumerate()
        .map(|(i, &category)| (category, i + 1))
        .collect();

    let values = raw.iter().map(|v| codes[v] as f64).collect();
    let categories = distinct.into_iter().map(str::to_string).collect();
    (values, categories)
}

/// 0/1 values if every entry is a boolean-like token
fn parse_flags(raw: &[&str]) -> Option<Vec<f64>> {
    raw.iter()
        .map(|v| match v.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(1.0),
            "false" | "no" | "0" => Some(0.0),
            _ => None,
        })
        .collect()
}

fn missing(column: &str, row: usize) -> SawError {
    SawError::MissingValue {
        column: column.to_string(),
        row,
    }
}
