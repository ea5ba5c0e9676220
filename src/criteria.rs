//! Criterion Configuration
//!
//! Per-criterion direction (benefit/cost) and weight, plus the weight validator.
//!
//! A configuration is a plain value handed to every ranking call. Callers that
//! let users adjust weights build a new `CriterionConfig` and pass it in; the
//! engine never keeps one around between runs.

use crate::error::{Result, SawError};
use anyhow::Context;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Allowed deviation of the weight total from 1.0
pub const WEIGHT_TOLERANCE: f64 = 0.001;

/// Column names of the crop yield dataset
pub mod columns {
    pub const CROP: &str = "Crop";
    pub const REGION: &str = "Region";
    pub const SOIL_TYPE: &str = "Soil_Type";
    pub const RAINFALL: &str = "Rainfall_mm";
    pub const TEMPERATURE: &str = "Temperature_Celsius";
    pub const FERTILIZER_USED: &str = "Fertilizer_Used";
    pub const IRRIGATION_USED: &str = "Irrigation_Used";
    pub const WEATHER_CONDITION: &str = "Weather_Condition";
    pub const DAYS_TO_HARVEST: &str = "Days_to_Harvest";
    pub const YIELD: &str = "Yield_tons_per_hectare";
}

/// Whether higher (benefit) or lower (cost) raw values are better
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Benefit,
    Cost,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Benefit => "Benefit",
            Direction::Cost => "Cost",
        }
    }
}

/// One scored column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    pub direction: Direction,
    pub weight: f64,
}

impl Criterion {
    pub fn new(name: impl Into<String>, direction: Direction, weight: f64) -> Self {
        Self {
            name: name.into(),
            direction,
            weight,
        }
    }

    pub fn benefit(name: impl Into<String>, weight: f64) -> Self {
        Self::new(name, Direction::Benefit, weight)
    }

    pub fn cost(name: impl Into<String>, weight: f64) -> Self {
        Self::new(name, Direction::Cost, weight)
    }

    /// Criteria with zero weight take no part in normalization or scoring
    pub fn is_active(&self) -> bool {
        self.weight > 0.0
    }
}

/// Outcome of the weight check
#[derive(Debug, Clone, PartialEq)]
pub struct WeightCheck {
    pub valid: bool,
    /// Sum of all configured weights, for diagnostics
    pub total: f64,
    /// Criteria whose weight lies outside [0, 1] or is not finite
    pub out_of_range: Vec<String>,
}

/// Ordered criterion configuration
///
/// Order matters: it is the order criteria are normalized in and the
/// tie-break order when looking for the heaviest criterion.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CriterionConfig {
    criteria: Vec<Criterion>,
}

impl CriterionConfig {
    pub fn new(criteria: Vec<Criterion>) -> Self {
        Self { criteria }
    }

    /// Defaults of the crop yield application
    pub fn default_crop_criteria() -> Self {
        use columns::*;
        Self::new(vec![
            Criterion::benefit(RAINFALL, 0.15),
            Criterion::benefit(TEMPERATURE, 0.15),
            Criterion::benefit(FERTILIZER_USED, 0.10),
            Criterion::benefit(IRRIGATION_USED, 0.10),
            Criterion::cost(DAYS_TO_HARVEST, 0.20),
            Criterion::benefit(YIELD, 0.30),
        ])
    }

    /// Load configuration from a JSON file
    ///
    /// Expected shape:
    /// `{"criteria": [{"name": "Rainfall_mm", "direction": "benefit", "weight": 0.15}, ...]}`
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read criteria file: {:?}", path))?;

        let config: CriterionConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse criteria JSON: {:?}", path))?;

        tracing::debug!("Loaded {} criteria from {:?}", config.len(), path);
        Ok(config)
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn get(&self, name: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Criteria that contribute to the score, in configuration order
    pub fn active(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter().filter(|c| c.is_active())
    }

    pub fn total_weight(&self) -> f64 {
        self.criteria.iter().map(|c| c.weight).sum()
    }

    /// Copy of this configuration with one weight replaced
    pub fn with_weight(&self, name: &str, weight: f64) -> Self {
        let mut next = self.clone();
        if let Some(c) = next.criteria.iter_mut().find(|c| c.name == name) {
            c.weight = weight;
        }
        next
    }

    /// Copy of this configuration with one direction replaced
    pub fn with_direction(&self, name: &str, direction: Direction) -> Self {
        let mut next = self.clone();
        if let Some(c) = next.criteria.iter_mut().find(|c| c.name == name) {
            c.direction = direction;
        }
        next
    }

    /// Check every weight is in [0, 1] and the total is 1.0 within tolerance
    pub fn check_weights(&self) -> WeightCheck {
        let total = self.total_weight();
        let out_of_range: Vec<String> = self
            .criteria
            .iter()
            .filter(|c| !c.weight.is_finite() || !(0.0..=1.0).contains(&c.weight))
            .map(|c| c.name.clone())
            .collect();

        let valid = out_of_range.is_empty() && (total - 1.0).abs() <= WEIGHT_TOLERANCE;

        WeightCheck {
            valid,
            total,
            out_of_range,
        }
    }

    /// Reject configurations that must not be used for a ranking
    pub fn validate(&self) -> Result<()> {
        let check = self.check_weights();
        let invalid = |reason: String| SawError::InvalidConfig {
            total: check.total,
            reason,
        };

        if self.criteria.is_empty() {
            return Err(invalid("no criteria configured".to_string()));
        }

        let mut seen = FxHashSet::default();
        for c in &self.criteria {
            if !seen.insert(c.name.as_str()) {
                return Err(invalid(format!("duplicate criterion '{}'", c.name)));
            }
        }

        if !check.out_of_range.is_empty() {
            return Err(invalid(format!(
                "weights outside [0, 1]: {}",
                check.out_of_range.join(", ")
            )));
        }

        if !check.valid {
            return Err(invalid(format!(
                "weights must sum to 1.0 (±{WEIGHT_TOLERANCE})"
            )));
        }

        Ok(())
    }

    /// Criterion with the largest weight; the first one wins on ties
    pub fn heaviest(&self) -> Option<&Criterion> {
        self.criteria
            .iter()
            .fold(None, |best: Option<&Criterion>, c| match best {
                Some(b) if b.weight >= c.weight => Some(b),
                _ => Some(c),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_criteria_are_valid() {
        let config = CriterionConfig::default_crop_criteria();
        let check = config.check_weights();
        assert!(check.valid);
        assert_relative_eq!(check.total, 1.0, epsilon = 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_total_within_tolerance_passes() {
        let config = CriterionConfig::new(vec![
            Criterion::benefit("a", 0.3335),
            Criterion::benefit("b", 0.3335),
            Criterion::cost("c", 0.3335),
        ]);
        // 1.0005 is inside the ±0.001 band
        assert!(config.check_weights().valid);
    }

    #[test]
    fn test_total_too_high_reports_total() {
        let config = CriterionConfig::new(vec![
            Criterion::benefit("a", 0.6),
            Criterion::benefit("b", 0.6),
        ]);
        let check = config.check_weights();
        assert!(!check.valid);
        assert_relative_eq!(check.total, 1.2, epsilon = 1e-9);

        match config.validate() {
            Err(SawError::InvalidConfig { total, .. }) => assert_relative_eq!(total, 1.2, epsilon = 1e-9),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_total_too_low_reports_total() {
        let config = CriterionConfig::new(vec![
            Criterion::benefit("a", 0.25),
            Criterion::cost("b", 0.25),
        ]);
        let check = config.check_weights();
        assert!(!check.valid);
        assert_relative_eq!(check.total, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_weight_out_of_range() {
        let config = CriterionConfig::new(vec![
            Criterion::benefit("a", 1.5),
            Criterion::benefit("b", -0.5),
        ]);
        let check = config.check_weights();
        // Total is exactly 1.0 but the individual weights are invalid
        assert!(!check.valid);
        assert_eq!(check.out_of_range, vec!["a".to_string(), "b".to_string()]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_and_empty_rejected() {
        let dup = CriterionConfig::new(vec![
            Criterion::benefit("a", 0.5),
            Criterion::cost("a", 0.5),
        ]);
        assert!(matches!(dup.validate(), Err(SawError::InvalidConfig { .. })));

        let empty = CriterionConfig::default();
        assert!(matches!(empty.validate(), Err(SawError::InvalidConfig { .. })));
    }

    #[test]
    fn test_check_does_not_mutate() {
        let config = CriterionConfig::default_crop_criteria();
        let before = config.clone();
        let _ = config.check_weights();
        assert_eq!(config, before);
    }

    #[test]
    fn test_heaviest_first_on_ties() {
        let config = CriterionConfig::new(vec![
            Criterion::benefit("a", 0.2),
            Criterion::benefit("b", 0.4),
            Criterion::cost("c", 0.4),
        ]);
        assert_eq!(config.heaviest().unwrap().name, "b");

        let defaults = CriterionConfig::default_crop_criteria();
        let heaviest = defaults.heaviest().unwrap();
        assert_eq!(heaviest.name, columns::YIELD);
        assert_relative_eq!(heaviest.weight, 0.30);
    }

    #[test]
    fn test_with_weight_returns_new_value() {
        let config = CriterionConfig::default_crop_criteria();
        let adjusted = config
            .with_weight(columns::YIELD, 0.25)
            .with_weight(columns::RAINFALL, 0.20)
            .with_direction(columns::TEMPERATURE, Direction::Cost);

        assert_relative_eq!(config.get(columns::YIELD).unwrap().weight, 0.30);
        assert_relative_eq!(adjusted.get(columns::YIELD).unwrap().weight, 0.25);
        assert_eq!(adjusted.get(columns::TEMPERATURE).unwrap().direction, Direction::Cost);
        assert!(adjusted.validate().is_ok());
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{
            "criteria": [
                {"name": "Yield_tons_per_hectare", "direction": "benefit", "weight": 0.7},
                {"name": "Days_to_Harvest", "direction": "cost", "weight": 0.3}
            ]
        }"#;

        let config: CriterionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.len(), 2);
        assert_eq!(config.criteria()[1].direction, Direction::Cost);
        assert!(config.validate().is_ok());
    }
}
