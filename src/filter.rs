//! Record filtering by categorical columns
//!
//! Equality constraints on descriptive columns such as crop, region and soil
//! type. The value `All` stands for "no constraint" so selection lists can
//! offer it next to the real categories.

use crate::criteria::columns;
use crate::error::Result;
use crate::utils::column_as_strings;
use polars::prelude::*;
use std::collections::BTreeSet;

/// Selection value meaning "any category"
pub const ALL: &str = "All";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    constraints: Vec<(String, String)>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `column == value`; `All` leaves the filter unchanged
    pub fn with(mut self, column: &str, value: &str) -> Self {
        if value != ALL {
            self.constraints.push((column.to_string(), value.to_string()));
        }
        self
    }

    /// Crop / region / soil type selection
    pub fn crop_region_soil(crop: &str, region: &str, soil: &str) -> Self {
        Self::new()
            .with(columns::CROP, crop)
            .with(columns::REGION, region)
            .with(columns::SOIL_TYPE, soil)
    }

    pub fn constraints(&self) -> &[(String, String)] {
        &self.constraints
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Rows matching every constraint
    pub fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        if self.is_empty() {
            return Ok(df.clone());
        }

        let mut keep = vec![true; df.height()];
        for (column, value) in &self.constraints {
            let values = column_as_strings(df, column)?;
            for (flag, v) in keep.iter_mut().zip(values) {
                *flag = *flag && v.as_deref() == Some(value.as_str());
            }
        }

        let mask = BooleanChunked::from_slice("mask".into(), &keep);
        let filtered = df.filter(&mask)?;

        tracing::debug!(
            constraints = self.constraints.len(),
            rows = filtered.height(),
            "filtered records"
        );
        Ok(filtered)
    }
}

/// Sorted distinct non-null values of a column
pub fn distinct_values(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let values: BTreeSet<String> = column_as_strings(df, column)?
        .into_iter()
        .flatten()
        .collect();
    Ok(values.into_iter().collect())
}

/// Selection list for a column: `All` followed by its sorted distinct values
pub fn options(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let mut out = vec![ALL.to_string()];
    out.extend(distinct_values(df, column)?);
    Ok(out)
}
