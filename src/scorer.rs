//! SAW Scorer - main coordinator for ranking crop records
//!
//! Runs the full Simple Additive Weighting pipeline over a record table:
//! validate weights, encode criterion columns, normalize by direction,
//! weighted sum, competition ranking.
//!
//! The engine keeps no state between calls. Every `rank` call works on the
//! table and configuration it is given, so running it twice on the same input
//! yields the same scores and ranks.

use crate::criteria::{CriterionConfig, Direction};
use crate::error::{Result, SawError};
use crate::ranking::{competition_ranks, rank_order};
use crate::summary::{summarize, Summary, SummaryOptions};
use crate::utils::{encode_column, normalize_column, require_columns, select_present, Encoding};
use polars::prelude::*;

/// Column holding the weighted sum
pub const SCORE_COLUMN: &str = "SAW_Score";

/// Column holding the competition rank (1 = best)
pub const RANK_COLUMN: &str = "Rank";

/// Columns shown in the top-N view
pub const DEFAULT_DISPLAY_COLUMNS: [&str; 6] = [
    "Crop",
    "Region",
    "Soil_Type",
    "Yield_tons_per_hectare",
    SCORE_COLUMN,
    RANK_COLUMN,
];

/// One normalized criterion column
#[derive(Debug, Clone)]
pub struct NormalizedCriterion {
    pub name: String,
    pub direction: Direction,
    pub weight: f64,
    pub encoding: Encoding,
    /// Normalized value per row, in input order
    pub values: Vec<f64>,
}

/// A record's score and rank; `row` indexes the input table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRecord {
    pub row: usize,
    pub score: f64,
    pub rank: u32,
}

/// SAW score of a single record
///
/// `normalized` and `weights` are parallel slices, one entry per criterion.
pub fn record_score(normalized: &[f64], weights: &[f64]) -> f64 {
    normalized.iter().zip(weights).map(|(v, w)| v * w).sum()
}

/// SAW score of every row
pub fn score_records(criteria: &[NormalizedCriterion], n_rows: usize) -> Vec<f64> {
    let weights: Vec<f64> = criteria.iter().map(|c| c.weight).collect();

    (0..n_rows)
        .map(|row| {
            let normalized: Vec<f64> = criteria.iter().map(|c| c.values[row]).collect();
            record_score(&normalized, &weights)
        })
        .collect()
}

/// Output of one ranking run
#[derive(Debug, Clone)]
pub struct RankingResult {
    /// One entry per input row, in input order
    pub scored: Vec<ScoredRecord>,
    /// Normalized columns of the active criteria, in configuration order
    pub normalized: Vec<NormalizedCriterion>,
    /// Input table plus `SAW_Score` and `Rank`, in input order
    pub table: DataFrame,
}

impl RankingResult {
    pub fn len(&self) -> usize {
        self.scored.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scored.is_empty()
    }

    pub fn scores(&self) -> Vec<f64> {
        self.scored.iter().map(|r| r.score).collect()
    }

    pub fn ranks(&self) -> Vec<u32> {
        self.scored.iter().map(|r| r.rank).collect()
    }

    /// Records sorted by score descending
    pub fn ordered(&self) -> Vec<ScoredRecord> {
        rank_order(&self.scores())
            .into_iter()
            .map(|row| self.scored[row])
            .collect()
    }

    /// All records sharing rank 1, in input order
    pub fn top_records(&self) -> Vec<ScoredRecord> {
        self.scored.iter().copied().filter(|r| r.rank == 1).collect()
    }

    /// The annotated table sorted by score descending
    pub fn ordered_table(&self) -> Result<DataFrame> {
        let order: Vec<IdxSize> = rank_order(&self.scores())
            .into_iter()
            .map(|row| row as IdxSize)
            .collect();
        let idx = IdxCa::from_vec("order".into(), order);
        Ok(self.table.take(&idx)?)
    }

    /// First `n` rows of the ordered table, projected onto `columns`
    ///
    /// Requested columns missing from the table are skipped.
    pub fn top_n(&self, n: usize, columns: &[&str]) -> Result<DataFrame> {
        let ordered = self.ordered_table()?;
        let head = ordered.head(Some(n));
        select_present(&head, columns)
    }
}

/// Coordinator for ranking runs
#[derive(Debug, Clone, Default)]
pub struct SawEngine {
    summary_options: SummaryOptions,
}

impl SawEngine {
    pub fn new(summary_options: SummaryOptions) -> Self {
        Self { summary_options }
    }

    pub fn summary_options(&self) -> &SummaryOptions {
        &self.summary_options
    }

    /// Score and rank every record of `records`
    ///
    /// Errors, in the order they are checked:
    /// - `InvalidConfig` before any data is looked at
    /// - `EmptyInput` for a table without rows
    /// - `MissingColumn` for an active criterion absent from the table
    /// - `MissingValue` / `UnsupportedColumnType` while encoding
    /// - `DegenerateColumn` for the first column that cannot be normalized
    pub fn rank(&self, records: &DataFrame, config: &CriterionConfig) -> Result<RankingResult> {
        config.validate()?;

        let n_rows = records.height();
        if n_rows == 0 {
            return Err(SawError::EmptyInput);
        }

        let active: Vec<&str> = config.active().map(|c| c.name.as_str()).collect();
        require_columns(records, &active, "ranking")?;

        tracing::info!(
            records = n_rows,
            criteria = active.len(),
            "Ranking records with SAW"
        );

        let mut normalized = Vec::with_capacity(active.len());
        for criterion in config.active() {
            let encoded = encode_column(records.column(&criterion.name)?)?;
            let values = normalize_column(&criterion.name, &encoded.values, criterion.direction)?;

            tracing::debug!(
                criterion = %criterion.name,
                direction = criterion.direction.label(),
                weight = criterion.weight,
                "normalized criterion"
            );

            normalized.push(NormalizedCriterion {
                name: criterion.name.clone(),
                direction: criterion.direction,
                weight: criterion.weight,
                encoding: encoded.encoding,
                values,
            });
        }

        let scores = score_records(&normalized, n_rows);
        let ranks = competition_ranks(&scores);

        let mut table = records.clone();
        table.with_column(Series::new(SCORE_COLUMN.into(), scores.clone()))?;
        table.with_column(Series::new(RANK_COLUMN.into(), ranks.clone()))?;

        let scored = scores
            .into_iter()
            .zip(ranks)
            .enumerate()
            .map(|(row, (score, rank))| ScoredRecord { row, score, rank })
            .collect();

        Ok(RankingResult {
            scored,
            normalized,
            table,
        })
    }

    /// Rank and derive the summary facts in one call
    pub fn rank_and_summarize(
        &self,
        records: &DataFrame,
        config: &CriterionConfig,
    ) -> Result<(RankingResult, Summary)> {
        let result = self.rank(records, config)?;
        let summary = summarize(&result, config, &self.summary_options)?;
        Ok((result, summary))
    }
}
