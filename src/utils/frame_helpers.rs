//! DataFrame column helpers with validation
//!
//! Explicit column checks so a missing criterion or display column is reported
//! by name instead of surfacing as a generic polars error deep in the pipeline.

use crate::error::{Result, SawError};
use polars::prelude::*;
use rustc_hash::FxHashSet;

/// Fail with `MissingColumn` for the first name not present in `df`
///
/// # Example
/// ```rust,ignore
/// require_columns(&df, &["Crop", "Days_to_Harvest"], "summary")?;
/// ```
pub fn require_columns(df: &DataFrame, columns: &[&str], context: &str) -> Result<()> {
    let actual: FxHashSet<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    for &expected in columns {
        if !actual.contains(expected) {
            tracing::debug!("{}: missing column '{}'", context, expected);
            return Err(SawError::MissingColumn(expected.to_string()));
        }
    }

    Ok(())
}

/// Project `df` onto the requested columns that exist, keeping request order
pub fn select_present(df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
    let present: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|name| df.column(name).is_ok())
        .collect();

    Ok(df.select(present)?)
}

/// Read a column as display strings (any dtype), one per row
pub fn column_as_strings(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df
        .column(name)
        .map_err(|_| SawError::MissingColumn(name.to_string()))?;
    let as_str = column.cast(&DataType::String)?;

    Ok(as_str
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_columns_success() {
        let df = df![
            "Crop" => &["Rice", "Maize"],
            "Days_to_Harvest" => &[100, 120],
        ]
        .unwrap();

        assert!(require_columns(&df, &["Crop", "Days_to_Harvest"], "test").is_ok());
    }

    #[test]
    fn test_require_columns_missing() {
        let df = df![
            "Crop" => &["Rice"],
        ]
        .unwrap();

        match require_columns(&df, &["Crop", "Rainfall_mm"], "test") {
            Err(SawError::MissingColumn(name)) => assert_eq!(name, "Rainfall_mm"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_select_present_skips_unknown() {
        let df = df![
            "Crop" => &["Rice"],
            "Region" => &["North"],
            "extra" => &[1],
        ]
        .unwrap();

        let projected = select_present(&df, &["Region", "Soil_Type", "Crop"]).unwrap();
        let names: Vec<String> = projected
            .get_column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["Region".to_string(), "Crop".to_string()]);
    }

    #[test]
    fn test_column_as_strings_casts() {
        let df = df![
            "Days_to_Harvest" => &[100i64, 120],
        ]
        .unwrap();

        let values = column_as_strings(&df, "Days_to_Harvest").unwrap();
        assert_eq!(values, vec![Some("100".to_string()), Some("120".to_string())]);
    }
}
