//! Summary facts derived from a ranking run
//!
//! - the top record(s): every record holding rank 1
//! - the fastest group: category with the lowest mean harvest time
//! - the heaviest criterion: largest configured weight

use crate::criteria::{columns, CriterionConfig};
use crate::error::{Result, SawError};
use crate::scorer::RankingResult;
use crate::stats::{group_means, GroupMean};
use crate::utils::column_as_strings;
use serde::{Deserialize, Serialize};

/// Which columns the summary reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryOptions {
    /// Column naming a record in the report (e.g. the crop)
    pub identifier_column: String,
    /// Category column for the fastest-group search
    pub group_column: String,
    /// Duration column where lower is faster
    pub time_column: String,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            identifier_column: columns::CROP.to_string(),
            group_column: columns::CROP.to_string(),
            time_column: columns::DAYS_TO_HARVEST.to_string(),
        }
    }
}

/// A rank-1 record
#[derive(Debug, Clone, PartialEq)]
pub struct TopRecord {
    pub row: usize,
    /// Value of the identifier column, if the table has one
    pub identifier: Option<String>,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaviestCriterion {
    pub name: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Every record with rank 1, in input order
    pub top_records: Vec<TopRecord>,
    /// `None` when no group has a defined mean duration
    pub fastest_group: Option<GroupMean>,
    pub heaviest_criterion: HeaviestCriterion,
}

impl Summary {
    /// The reported top record: the first rank-1 record in input order
    pub fn top_record(&self) -> Option<&TopRecord> {
        self.top_records.first()
    }
}

/// Derive the summary facts from a finished ranking
pub fn summarize(
    result: &RankingResult,
    config: &CriterionConfig,
    options: &SummaryOptions,
) -> Result<Summary> {
    if result.is_empty() {
        return Err(SawError::EmptyInput);
    }

    let identifiers = match column_as_strings(&result.table, &options.identifier_column) {
        Ok(values) => Some(values),
        Err(SawError::MissingColumn(_)) => None,
        Err(e) => return Err(e),
    };

    let top_records = result
        .top_records()
        .into_iter()
        .map(|r| TopRecord {
            row: r.row,
            identifier: identifiers
                .as_ref()
                .and_then(|ids| ids.get(r.row).cloned().flatten()),
            score: r.score,
        })
        .collect();

    let fastest_group = fastest_group(result, options)?;

    let heaviest = config.heaviest().ok_or_else(|| SawError::InvalidConfig {
        total: 0.0,
        reason: "no criteria configured".to_string(),
    })?;

    Ok(Summary {
        top_records,
        fastest_group,
        heaviest_criterion: HeaviestCriterion {
            name: heaviest.name.clone(),
            weight: heaviest.weight,
        },
    })
}

/// Group with the lowest mean duration; ties go to the smaller group name
fn fastest_group(result: &RankingResult, options: &SummaryOptions) -> Result<Option<GroupMean>> {
    let means = group_means(&result.table, &options.group_column, &options.time_column)?;

    Ok(means.into_iter().min_by(|a, b| {
        a.mean
            .total_cmp(&b.mean)
            .then_with(|| a.group.cmp(&b.group))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::Criterion;
    use crate::scorer::SawEngine;
    use approx::assert_relative_eq;
    use polars::prelude::*;

    fn crops() -> DataFrame {
        df![
            "Crop" => &["Rice", "Maize", "Rice", "Wheat", "Maize"],
            "Yield_tons_per_hectare" => &[4.0, 8.0, 6.0, 8.0, 2.0],
            "Days_to_Harvest" => &[100, 80, 120, 90, 70],
        ]
        .unwrap()
    }

    fn config() -> CriterionConfig {
        CriterionConfig::new(vec![
            Criterion::benefit("Yield_tons_per_hectare", 0.7),
            Criterion::cost("Days_to_Harvest", 0.3),
        ])
    }

    #[test]
    fn test_summary_facts() {
        let (result, summary) = SawEngine::default()
            .rank_and_summarize(&crops(), &config())
            .unwrap();

        // Row 1: 0.7 * 1.0 + 0.3 * 70/80
        let top = summary.top_record().unwrap();
        assert_eq!(top.row, 1);
        assert_eq!(top.identifier.as_deref(), Some("Maize"));
        assert_relative_eq!(top.score, result.scored[1].score);

        // Maize (80 + 70) / 2 = 75 beats Wheat 90 and Rice 110
        let fastest = summary.fastest_group.unwrap();
        assert_eq!(fastest.group, "Maize");
        assert_relative_eq!(fastest.mean, 75.0);

        assert_eq!(summary.heaviest_criterion.name, "Yield_tons_per_hectare");
        assert_relative_eq!(summary.heaviest_criterion.weight, 0.7);
    }

    #[test]
    fn test_all_rank_one_records_reported() {
        let df = df![
            "Crop" => &["Rice", "Maize", "Wheat"],
            "Yield_tons_per_hectare" => &[8.0, 4.0, 8.0],
            "Days_to_Harvest" => &[100, 100, 100],
        ]
        .unwrap();

        let (_, summary) = SawEngine::default().rank_and_summarize(&df, &config()).unwrap();
        let rows: Vec<usize> = summary.top_records.iter().map(|t| t.row).collect();
        assert_eq!(rows, vec![0, 2]);
        assert_eq!(summary.top_record().unwrap().row, 0);
    }

    #[test]
    fn test_fastest_group_tie_uses_name() {
        let df = df![
            "Crop" => &["Wheat", "Barley"],
            "Yield_tons_per_hectare" => &[1.0, 2.0],
            "Days_to_Harvest" => &[90, 90],
        ]
        .unwrap();

        let (_, summary) = SawEngine::default().rank_and_summarize(&df, &config()).unwrap();
        assert_eq!(summary.fastest_group.unwrap().group, "Barley");
    }

    #[test]
    fn test_missing_identifier_column() {
        let df = crops();
        let options = SummaryOptions {
            identifier_column: "Variety".to_string(),
            ..SummaryOptions::default()
        };

        let (_, summary) = SawEngine::new(options).rank_and_summarize(&df, &config()).unwrap();
        assert_eq!(summary.top_record().unwrap().identifier, None);
    }

    #[test]
    fn test_missing_time_column_is_an_error() {
        let df = crops();
        let options = SummaryOptions {
            time_column: "Growing_Days".to_string(),
            ..SummaryOptions::default()
        };

        assert!(matches!(
            SawEngine::new(options).rank_and_summarize(&df, &config()),
            Err(SawError::MissingColumn(_))
        ));
    }
}
