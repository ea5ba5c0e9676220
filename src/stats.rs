//! Descriptive statistics over the record table
//!
//! Column summaries (count, mean, std, quartiles), null counts and per-group
//! means. Group means feed both the fastest-group fact of the summary and the
//! per-crop averages a display layer charts.

use crate::error::Result;
use crate::utils::{column_as_strings, require_columns};
use polars::prelude::*;
use serde::Serialize;

const MEAN_ALIAS: &str = "__group_mean";

/// Summary of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub name: String,
    /// Non-null values
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` below two values
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Mean of a value column within one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean {
    pub group: String,
    pub mean: f64,
}

/// (rows, columns)
pub fn dimensions(df: &DataFrame) -> (usize, usize) {
    (df.height(), df.width())
}

/// Null count of every column, in table order
pub fn null_counts(df: &DataFrame) -> Vec<(String, usize)> {
    df.get_columns()
        .iter()
        .map(|c| (c.name().to_string(), c.null_count()))
        .collect()
}

/// Statistics for every integer or float column
///
/// Columns without a single non-null value are left out.
pub fn describe(df: &DataFrame) -> Result<Vec<ColumnStats>> {
    let mut out = Vec::new();

    for column in df.get_columns() {
        let dtype = column.dtype();
        if !(dtype.is_float() || dtype.is_integer()) {
            continue;
        }

        let casted = column.cast(&DataType::Float64)?;
        let mut values: Vec<f64> = casted.f64()?.into_iter().flatten().collect();
        if values.is_empty() {
            continue;
        }
        values.sort_by(f64::total_cmp);

        out.push(column_stats(column.name().as_str(), &values));
    }

    Ok(out)
}

/// Stats of already sorted, non-empty values
fn column_stats(name: &str, sorted: &[f64]) -> ColumnStats {
    let count = sorted.len();
    let mean = sorted.iter().sum::<f64>() / count as f64;
    let std = (count > 1).then(|| {
        let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    });

    ColumnStats {
        name: name.to_string(),
        count,
        mean,
        std,
        min: sorted[0],
        q25: quantile(sorted, 0.25),
        median: quantile(sorted, 0.5),
        q75: quantile(sorted, 0.75),
        max: sorted[count - 1],
    }
}

/// Linear-interpolation quantile of sorted, non-empty values
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Mean of `value_col` per distinct `group_col` value
///
/// Sorted by mean descending, then group name. Null groups and groups without
/// a defined mean are dropped.
pub fn group_means(df: &DataFrame, group_col: &str, value_col: &str) -> Result<Vec<GroupMean>> {
    require_columns(df, &[group_col, value_col], "group means")?;

    let grouped = df
        .clone()
        .lazy()
        .group_by([col(group_col)])
        .agg([col(value_col)
            .cast(DataType::Float64)
            .mean()
            .alias(MEAN_ALIAS)])
        .collect()?;

    let groups = column_as_strings(&grouped, group_col)?;
    let means = grouped.column(MEAN_ALIAS)?.f64()?;

    let mut out: Vec<GroupMean> = groups
        .into_iter()
        .zip(means.into_iter())
        .filter_map(|(group, mean)| match (group, mean) {
            (Some(group), Some(mean)) if mean.is_finite() => Some(GroupMean { group, mean }),
            _ => None,
        })
        .collect();

    out.sort_by(|a, b| {
        b.mean
            .total_cmp(&a.mean)
            .then_with(|| a.group.cmp(&b.group))
    });

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_describe_numeric_columns_only() {
        let df = df![
            "Crop" => &["Rice", "Maize", "Wheat", "Barley"],
            "Rainfall_mm" => &[100.0, 200.0, 300.0, 400.0],
            "Days_to_Harvest" => &[Some(60i64), None, Some(90), Some(120)],
            "Irrigation_Used" => &[true, false, true, true],
        ]
        .unwrap();

        let stats = describe(&df).unwrap();
        assert_eq!(stats.len(), 2);

        let rain = &stats[0];
        assert_eq!(rain.name, "Rainfall_mm");
        assert_eq!(rain.count, 4);
        assert_relative_eq!(rain.mean, 250.0);
        assert_relative_eq!(rain.std.unwrap(), 129.0994, epsilon = 1e-4);
        assert_relative_eq!(rain.min, 100.0);
        assert_relative_eq!(rain.q25, 175.0);
        assert_relative_eq!(rain.median, 250.0);
        assert_relative_eq!(rain.q75, 325.0);
        assert_relative_eq!(rain.max, 400.0);

        let days = &stats[1];
        assert_eq!(days.count, 3);
        assert_relative_eq!(days.median, 90.0);
    }

    #[test]
    fn test_single_value_has_no_std() {
        let df = df![
            "Yield_tons_per_hectare" => &[5.0],
        ]
        .unwrap();

        let stats = describe(&df).unwrap();
        assert_eq!(stats[0].std, None);
        assert_relative_eq!(stats[0].q75, 5.0);
    }

    #[test]
    fn test_null_counts_and_dimensions() {
        let df = df![
            "Crop" => &[Some("Rice"), None, Some("Maize")],
            "Rainfall_mm" => &[Some(1.0), Some(2.0), None],
        ]
        .unwrap();

        assert_eq!(dimensions(&df), (3, 2));
        assert_eq!(
            null_counts(&df),
            vec![("Crop".to_string(), 1), ("Rainfall_mm".to_string(), 1)]
        );
    }

    #[test]
    fn test_group_means_sorted_descending() {
        let df = df![
            "Crop" => &["Rice", "Maize", "Rice", "Wheat", "Maize"],
            "Yield_tons_per_hectare" => &[4.0, 8.0, 6.0, 3.0, 2.0],
        ]
        .unwrap();

        let means = group_means(&df, "Crop", "Yield_tons_per_hectare").unwrap();
        let groups: Vec<&str> = means.iter().map(|m| m.group.as_str()).collect();
        // Rice and Maize both average 5.0, tie resolved by name
        assert_eq!(groups, vec!["Maize", "Rice", "Wheat"]);
        assert_relative_eq!(means[2].mean, 3.0);
    }
}
