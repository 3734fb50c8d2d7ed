//! Typed records and CSV I/O for every pipeline stage
//!
//! All tables are flat CSV files with uppercase column names matching the
//! upstream data warehouse exports. Lag and rolling columns are empty for
//! warm-up rows and deserialize to `None`; feature engineering drops those
//! rows before modelling.

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Columns that must be present in the raw training dataset
pub const REQUIRED_TRAINING_COLUMNS: [&str; 13] = [
    "DATE",
    "COUNTRY",
    "ECONOMIC_INDEX",
    "INFLATION_RATE",
    "UNEMPLOYMENT_RATE",
    "BASELINE_DEMAND",
    "TOTAL_SPEND",
    "TOTAL_CHANNEL_RESPONSE",
    "TOTAL_PRODUCT_DEMAND",
    "SPEND_LAG_7",
    "SPEND_LAG_14",
    "DEMAND_ROLLING_7",
    "DEMAND_ROLLING_14",
];

/// Columns that must be present in the predictions table
pub const REQUIRED_PREDICTION_COLUMNS: [&str; 4] =
    ["DATE", "COUNTRY", "ACTUAL_DEMAND", "BASELINE_PREDICTION"];

/// One row of the model-ready training dataset, keyed by (DATE, COUNTRY)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandRecord {
    #[serde(rename = "DATE")]
    pub date: NaiveDate,
    #[serde(rename = "COUNTRY")]
    pub country: String,
    #[serde(rename = "ECONOMIC_INDEX")]
    pub economic_index: f64,
    #[serde(rename = "INFLATION_RATE")]
    pub inflation_rate: f64,
    #[serde(rename = "UNEMPLOYMENT_RATE")]
    pub unemployment_rate: f64,
    #[serde(rename = "BASELINE_DEMAND")]
    pub baseline_demand: f64,
    #[serde(rename = "TOTAL_SPEND")]
    pub total_spend: f64,
    #[serde(rename = "TOTAL_CHANNEL_RESPONSE")]
    pub total_channel_response: f64,
    #[serde(rename = "TOTAL_PRODUCT_DEMAND")]
    pub total_product_demand: f64,
    /// Spend 7 days earlier; empty during the warm-up window
    #[serde(rename = "SPEND_LAG_7")]
    pub spend_lag_7: Option<f64>,
    #[serde(rename = "SPEND_LAG_14")]
    pub spend_lag_14: Option<f64>,
    /// Trailing 7-day mean of demand, excluding the current day
    #[serde(rename = "DEMAND_ROLLING_7")]
    pub demand_rolling_7: Option<f64>,
    #[serde(rename = "DEMAND_ROLLING_14")]
    pub demand_rolling_14: Option<f64>,
}

/// One baseline prediction row for downstream impact analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(rename = "DATE")]
    pub date: NaiveDate,
    #[serde(rename = "COUNTRY")]
    pub country: String,
    #[serde(rename = "ACTUAL_DEMAND")]
    pub actual_demand: f64,
    #[serde(rename = "BASELINE_PREDICTION")]
    pub baseline_prediction: f64,
}

/// Per-fold cross-validation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvFoldRecord {
    pub fold: usize,
    pub mae: f64,
    pub wape: f64,
}

/// Ensure a stage input exists, with a hint pointing at the upstream stage
fn require_file(path: &Path, hint: &str) -> Result<()> {
    if !path.exists() {
        return Err(ForecastError::DataError(format!(
            "file not found at {}: {}",
            path.display(),
            hint
        )));
    }
    Ok(())
}

/// Validate that all required columns appear in a CSV header
fn validate_columns(headers: &csv::StringRecord, required: &[&str]) -> Result<()> {
    let present: HashSet<&str> = headers.iter().collect();
    let missing: Vec<&str> = required
        .iter()
        .filter(|c| !present.contains(**c))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(ForecastError::DataError(format!(
            "missing required columns: {}",
            missing.join(", ")
        )));
    }
    Ok(())
}

fn create_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Read the raw training dataset, validating the schema first
pub fn read_training_data<P: AsRef<Path>>(path: P) -> Result<Vec<DemandRecord>> {
    let path = path.as_ref();
    require_file(path, "run the generate_dataset stage first")?;

    let mut reader = csv::Reader::from_path(path)?;
    validate_columns(reader.headers()?, &REQUIRED_TRAINING_COLUMNS)?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: DemandRecord = row?;
        records.push(record);
    }
    Ok(records)
}

/// Write the raw training dataset
pub fn write_training_data<P: AsRef<Path>>(path: P, records: &[DemandRecord]) -> Result<()> {
    let path = path.as_ref();
    create_parent_dirs(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read baseline predictions, validating the schema first
pub fn read_predictions<P: AsRef<Path>>(path: P) -> Result<Vec<PredictionRecord>> {
    let path = path.as_ref();
    require_file(path, "run the generate_predictions stage first")?;

    let mut reader = csv::Reader::from_path(path)?;
    validate_columns(reader.headers()?, &REQUIRED_PREDICTION_COLUMNS)?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: PredictionRecord = row?;
        records.push(record);
    }
    Ok(records)
}

/// Write baseline predictions
pub fn write_predictions<P: AsRef<Path>>(path: P, records: &[PredictionRecord]) -> Result<()> {
    let path = path.as_ref();
    create_parent_dirs(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read per-fold cross-validation results
pub fn read_cv_results<P: AsRef<Path>>(path: P) -> Result<Vec<CvFoldRecord>> {
    let path = path.as_ref();
    require_file(path, "run the train_baseline stage first")?;

    let mut reader = csv::Reader::from_path(path)?;
    validate_columns(reader.headers()?, &["fold", "mae", "wape"])?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: CvFoldRecord = row?;
        records.push(record);
    }
    Ok(records)
}

/// Write per-fold cross-validation results
pub fn write_cv_results<P: AsRef<Path>>(path: P, records: &[CvFoldRecord]) -> Result<()> {
    let path = path.as_ref();
    create_parent_dirs(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Inclusive (min, max) date range of a record slice
pub fn date_range(records: &[DemandRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let min = records.iter().map(|r| r.date).min()?;
    let max = records.iter().map(|r| r.date).max()?;
    Some((min, max))
}
