//! Crop SAW Ranker
//!
//! Multi-criteria ranking of agricultural records (crop, region, soil, yield,
//! weather, harvest time) with Simple Additive Weighting.
//!
//! Module layout:
//! - `criteria`: per-criterion direction and weight, weight validation
//! - `utils/`: categorical encoding, benefit/cost normalization, column helpers
//! - `scorer`: weighted sum and the `SawEngine` pipeline
//! - `ranking`: competition ranking (ties share the minimum rank)
//! - `summary`: top record, fastest group, heaviest criterion
//! - `stats`, `filter`: descriptive statistics and categorical filtering
//!
//! ```rust,ignore
//! let engine = SawEngine::default();
//! let config = CriterionConfig::default_crop_criteria();
//! let (result, summary) = engine.rank_and_summarize(&records, &config)?;
//! let top10 = result.top_n(10, &DEFAULT_DISPLAY_COLUMNS)?;
//! ```

pub mod criteria;
pub mod error;
pub mod filter;
pub mod ranking;
pub mod scorer;
pub mod stats;
pub mod summary;
pub mod utils;

// Re-export commonly used types
pub use criteria::{columns, Criterion, CriterionConfig, Direction, WeightCheck, WEIGHT_TOLERANCE};
pub use error::{DegenerateReason, Result, SawError};
pub use filter::RecordFilter;
pub use ranking::competition_ranks;
pub use scorer::{
    RankingResult, SawEngine, ScoredRecord, DEFAULT_DISPLAY_COLUMNS, RANK_COLUMN, SCORE_COLUMN,
};
pub use stats::{ColumnStats, GroupMean};
pub use summary::{Summary, SummaryOptions};
