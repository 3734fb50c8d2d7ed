//! Feature engineering for the demand forecasting model
//!
//! Transforms the model-ready dataset into the final ML feature matrix.
//! All derivations are deterministic and leak-free: every feature is computed
//! from columns already present on the row, and rows whose lag or rolling
//! inputs are still inside the warm-up window are dropped.

use crate::data::DemandRecord;
use crate::error::{ForecastError, Result};
use crate::models::Matrix;
use chrono::{Datelike, NaiveDate};
use std::f64::consts::PI;
use std::fs;
use std::path::Path;
use tracing::info;

/// Guard against division by zero in efficiency ratios
pub const EPS: f64 = 1e-6;

/// Canonical order of the engineered numeric features
pub const NUMERIC_FEATURES: [&str; 24] = [
    "ECONOMIC_INDEX",
    "INFLATION_RATE",
    "UNEMPLOYMENT_RATE",
    "BASELINE_DEMAND",
    "TOTAL_SPEND",
    "TOTAL_CHANNEL_RESPONSE",
    "SPEND_LAG_7",
    "SPEND_LAG_14",
    "DEMAND_ROLLING_7",
    "DEMAND_ROLLING_14",
    "DAY_OF_WEEK",
    "WEEK_OF_YEAR",
    "MONTH",
    "YEAR",
    "DOW_SIN",
    "DOW_COS",
    "SPEND_PER_RESPONSE",
    "RESPONSE_PER_SPEND",
    "SPEND_VS_BASELINE",
    "DEMAND_X_ECONOMIC",
    "DEMAND_X_INFLATION",
    "DEMAND_X_UNEMPLOYMENT",
    "DEMAND_TREND_7_14",
    "SPEND_TREND_7_14",
];

const DATE_COL: &str = "DATE";
const COUNTRY_COL: &str = "COUNTRY";
const TARGET_COL: &str = "TOTAL_PRODUCT_DEMAND";

/// One engineered row: date and country keys, numeric features, and target
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub date: NaiveDate,
    pub country: String,
    pub target: f64,
    pub numeric: Vec<f64>,
}

/// The engineered feature matrix with its column schema
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    numeric_names: Vec<String>,
    rows: Vec<FeatureRow>,
}

/// Compute the numeric feature vector for a single warm record.
///
/// Caller guarantees the lag and rolling fields are present.
fn derive_numeric(record: &DemandRecord) -> Vec<f64> {
    let spend_lag_7 = record.spend_lag_7.unwrap_or_default();
    let spend_lag_14 = record.spend_lag_14.unwrap_or_default();
    let demand_rolling_7 = record.demand_rolling_7.unwrap_or_default();
    let demand_rolling_14 = record.demand_rolling_14.unwrap_or_default();

    // Calendar-based seasonality, Monday = 0
    let day_of_week = record.date.weekday().num_days_from_monday() as f64;
    let week_of_year = record.date.iso_week().week() as f64;
    let month = record.date.month() as f64;
    let year = record.date.year() as f64;
    let angle = 2.0 * PI * day_of_week / 7.0;

    vec![
        record.economic_index,
        record.inflation_rate,
        record.unemployment_rate,
        record.baseline_demand,
        record.total_spend,
        record.total_channel_response,
        spend_lag_7,
        spend_lag_14,
        demand_rolling_7,
        demand_rolling_14,
        day_of_week,
        week_of_year,
        month,
        year,
        angle.sin(),
        angle.cos(),
        record.total_spend / (record.total_channel_response + EPS),
        record.total_channel_response / (record.total_spend + EPS),
        record.total_spend / (record.baseline_demand + EPS),
        record.baseline_demand * record.economic_index,
        record.baseline_demand * record.inflation_rate,
        record.baseline_demand * record.unemployment_rate,
        demand_rolling_7 - demand_rolling_14,
        spend_lag_7 - spend_lag_14,
    ]
}

/// Engineer the full feature matrix from raw training records.
///
/// Rows with missing lag or rolling inputs are dropped and the result is
/// sorted by (COUNTRY, DATE) for time-series safety.
pub fn engineer_features(records: &[DemandRecord]) -> Result<FeatureSet> {
    let total = records.len();
    let mut warm: Vec<&DemandRecord> = records
        .iter()
        .filter(|r| {
            r.spend_lag_7.is_some()
                && r.spend_lag_14.is_some()
                && r.demand_rolling_7.is_some()
                && r.demand_rolling_14.is_some()
        })
        .collect();

    let dropped = total - warm.len();
    info!(total, dropped, "dropped warm-up rows with missing lag inputs");

    if warm.is_empty() {
        return Err(ForecastError::DataError(
            "No rows left after dropping warm-up rows".to_string(),
        ));
    }

    warm.sort_by(|a, b| (a.country.as_str(), a.date).cmp(&(b.country.as_str(), b.date)));

    let rows = warm
        .into_iter()
        .map(|record| FeatureRow {
            date: record.date,
            country: record.country.clone(),
            target: record.total_product_demand,
            numeric: derive_numeric(record),
        })
        .collect::<Vec<_>>();

    info!(
        rows = rows.len(),
        features = NUMERIC_FEATURES.len(),
        target = TARGET_COL,
        "feature engineering complete"
    );

    FeatureSet::new(
        NUMERIC_FEATURES.iter().map(|s| s.to_string()).collect(),
        rows,
    )
}

impl FeatureSet {
    /// Build a feature set, validating that every row matches the schema width
    pub fn new(numeric_names: Vec<String>, rows: Vec<FeatureRow>) -> Result<Self> {
        if let Some(bad) = rows.iter().find(|r| r.numeric.len() != numeric_names.len()) {
            return Err(ForecastError::ValidationError(format!(
                "Row for {} / {} has {} numeric values, expected {}",
                bad.country,
                bad.date,
                bad.numeric.len(),
                numeric_names.len()
            )));
        }
        Ok(Self {
            numeric_names,
            rows,
        })
    }

    /// Ordered numeric feature names
    pub fn numeric_names(&self) -> &[String] {
        &self.numeric_names
    }

    /// Engineered rows
    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the feature set has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Target vector, row-aligned
    pub fn targets(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.target).collect()
    }

    /// Country column, row-aligned
    pub fn countries(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.country.as_str()).collect()
    }

    /// Date column, row-aligned
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    /// Inclusive (min, max) date range
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.rows.iter().map(|r| r.date).min()?;
        let max = self.rows.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    /// Stable sort by date, preserving country order within a date
    pub fn sort_by_date(&mut self) {
        self.rows.sort_by_key(|r| r.date);
    }

    /// Numeric feature matrix in schema order
    pub fn numeric_matrix(&self) -> Result<Matrix> {
        Matrix::from_rows(self.rows.iter().map(|r| r.numeric.clone()).collect())
    }

    /// Numeric feature matrix with columns re-ordered to the requested names.
    ///
    /// Used at inference time so a persisted model sees its training column
    /// order even if the feature file was regenerated with a different one.
    pub fn numeric_matrix_ordered(&self, names: &[String]) -> Result<Matrix> {
        let mut positions = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.numeric_names.iter().position(|n| n == name) {
                Some(pos) => positions.push(pos),
                None => missing.push(name.as_str()),
            }
        }
        if !missing.is_empty() {
            return Err(ForecastError::DataError(format!(
                "Feature mismatch detected, missing numeric columns: {}",
                missing.join(", ")
            )));
        }

        Matrix::from_rows(
            self.rows
                .iter()
                .map(|r| positions.iter().map(|&p| r.numeric[p]).collect())
                .collect(),
        )
    }

    /// Write the feature matrix as CSV: DATE, COUNTRY, numeric..., target
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_path(path)?;

        let mut header = vec![DATE_COL.to_string(), COUNTRY_COL.to_string()];
        header.extend(self.numeric_names.iter().cloned());
        header.push(TARGET_COL.to_string());
        writer.write_record(&header)?;

        for row in &self.rows {
            let mut record = vec![row.date.format("%Y-%m-%d").to_string(), row.country.clone()];
            record.extend(row.numeric.iter().map(|v| v.to_string()));
            record.push(row.target.to_string());
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Read a feature matrix written by [`FeatureSet::write_csv`]
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ForecastError::DataError(format!(
                "file not found at {}: run the engineer_features stage first",
                path.display()
            )));
        }

        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();

        let mut date_idx = None;
        let mut country_idx = None;
        let mut target_idx = None;
        let mut numeric_names = Vec::new();
        let mut numeric_idx = Vec::new();

        for (i, name) in headers.iter().enumerate() {
            match name {
                DATE_COL => date_idx = Some(i),
                COUNTRY_COL => country_idx = Some(i),
                TARGET_COL => target_idx = Some(i),
                _ => {
                    numeric_names.push(name.to_string());
                    numeric_idx.push(i);
                }
            }
        }

        let (date_idx, country_idx, target_idx) = match (date_idx, country_idx, target_idx) {
            (Some(d), Some(c), Some(t)) => (d, c, t),
            _ => {
                return Err(ForecastError::DataError(format!(
                    "feature file must contain {}, {} and {} columns",
                    DATE_COL, COUNTRY_COL, TARGET_COL
                )))
            }
        };

        let parse_f64 = |field: &str, column: &str| -> Result<f64> {
            field.parse::<f64>().map_err(|_| {
                ForecastError::DataError(format!(
                    "malformed numeric value {:?} in column {}",
                    field, column
                ))
            })
        };

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let date = record[date_idx]
                .parse::<NaiveDate>()
                .map_err(|e| ForecastError::DataError(format!("malformed DATE: {}", e)))?;
            let country = record[country_idx].to_string();
            let target = parse_f64(&record[target_idx], TARGET_COL)?;
            let numeric = numeric_idx
                .iter()
                .zip(numeric_names.iter())
                .map(|(&i, name)| parse_f64(&record[i], name))
                .collect::<Result<Vec<f64>>>()?;
            rows.push(FeatureRow {
                date,
                country,
                target,
                numeric,
            });
        }

        Self::new(numeric_names, rows)
    }
}
