// SAW ranking of a crop yield table
//
// Usage: cargo run --bin saw_rank
//
// Configuration from environment variables:
//   DATA_PATH      crop table, .csv or .parquet (default: data/crop_yield.csv)
//   CRITERIA_PATH  criteria JSON (default: built-in crop criteria)
//   TOP_N          rows in the top view (default: 10)
//   GROUP_COLUMN   category for the fastest-group fact (default: Crop)
//   TIME_COLUMN    duration column for the fastest-group fact (default: Days_to_Harvest)
//   FILTER_CROP / FILTER_REGION / FILTER_SOIL   optional selection, "All" = any

use anyhow::{Context, Result};
use crop_saw_ranker::filter::RecordFilter;
use crop_saw_ranker::stats::{describe, dimensions, null_counts};
use crop_saw_ranker::{
    CriterionConfig, SawEngine, SummaryOptions, DEFAULT_DISPLAY_COLUMNS,
};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Load the record table from CSV or Parquet
fn load_records(path: &Path) -> Result<DataFrame> {
    let is_parquet = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"));

    if is_parquet {
        LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to scan parquet: {:?}", path))?
            .collect()
            .with_context(|| format!("Failed to load parquet: {:?}", path))
    } else {
        CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(PathBuf::from(path)))
            .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
            .finish()
            .with_context(|| format!("Failed to load CSV: {:?}", path))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_saw_ranker=info,saw_rank=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_path = PathBuf::from(env_or("DATA_PATH", "data/crop_yield.csv"));
    let top_n: usize = std::env::var("TOP_N")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    let defaults = SummaryOptions::default();
    let summary_options = SummaryOptions {
        group_column: env_or("GROUP_COLUMN", &defaults.group_column),
        time_column: env_or("TIME_COLUMN", &defaults.time_column),
        ..defaults
    };

    let config = match std::env::var("CRITERIA_PATH") {
        Ok(path) => CriterionConfig::load(Path::new(&path))?,
        Err(_) => CriterionConfig::default_crop_criteria(),
    };

    tracing::info!("Configuration:");
    tracing::info!("  DATA_PATH: {:?}", data_path);
    tracing::info!("  TOP_N: {}", top_n);
    tracing::info!("  Criteria: {}", config.len());

    let records = load_records(&data_path)?;

    let (rows, cols) = dimensions(&records);
    println!("\n=== DATASET ===\n");
    println!("Dimensions: {} rows × {} columns", rows, cols);

    println!("\nDescriptive statistics:");
    for s in describe(&records)? {
        println!(
            "  {:<24} n={:<6} mean={:>10.3} std={:>10.3} min={:>9.2} 50%={:>9.2} max={:>9.2}",
            s.name,
            s.count,
            s.mean,
            s.std.unwrap_or(f64::NAN),
            s.min,
            s.median,
            s.max,
        );
    }

    println!("\nMissing values:");
    for (name, nulls) in null_counts(&records) {
        println!("  {:<24} {}", name, nulls);
    }

    let filter = RecordFilter::crop_region_soil(
        &env_or("FILTER_CROP", "All"),
        &env_or("FILTER_REGION", "All"),
        &env_or("FILTER_SOIL", "All"),
    );
    if !filter.is_empty() {
        let filtered = filter.apply(&records)?;
        println!("\nFilter {:?} matches {} records", filter.constraints(), filtered.height());
    }

    let check = config.check_weights();
    if !check.valid {
        tracing::warn!("Total weight must equal 1.0, currently {:.2}", check.total);
    }

    let engine = SawEngine::new(summary_options);
    let (result, summary) = engine
        .rank_and_summarize(&records, &config)
        .context("SAW ranking failed")?;

    println!("\n=== CRITERIA ===\n");
    for c in config.criteria() {
        println!("  {:<24} {:<8} {:.2}", c.name, c.direction.label(), c.weight);
    }

    println!("\n=== TOP {} BY SAW SCORE ===\n", top_n);
    println!("{}", result.top_n(top_n, &DEFAULT_DISPLAY_COLUMNS)?);

    println!("\n=== CONCLUSION ===\n");
    if let Some(top) = summary.top_record() {
        println!(
            "  Highest SAW score: {} ({:.4})",
            top.identifier.as_deref().unwrap_or("<unnamed>"),
            top.score
        );
        if summary.top_records.len() > 1 {
            println!("  ({} records share rank 1)", summary.top_records.len());
        }
    }
    if let Some(fastest) = &summary.fastest_group {
        println!(
            "  Fastest average harvest: {} ({:.1} days)",
            fastest.group, fastest.mean
        );
    }
    println!(
        "  Most important criterion: {} (weight {:.2})",
        summary.heaviest_criterion.name, summary.heaviest_criterion.weight
    );

    Ok(())
}
