//! Cross-validation results analysis
//!
//! Answers one question: is the baseline model good enough to trust? Reads
//! the per-fold CV results, checks their structure, and summarizes accuracy
//! and stability across time windows.

use crate::data::{read_cv_results, CvFoldRecord};
use crate::error::{ForecastError, Result};
use statrs::statistics::{Data, Distribution, Max, Min};
use std::fmt;
use std::path::Path;

/// Mean WAPE below this fraction counts as excellent
const EXCELLENT_WAPE: f64 = 0.01;
/// Mean WAPE below this fraction counts as acceptable
const ACCEPTABLE_WAPE: f64 = 0.03;
/// Worst-minus-best fold WAPE below this fraction counts as stable
const STABLE_WAPE_SPREAD: f64 = 0.01;

/// Aggregate statistics over fold values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl SummaryStats {
    /// Compute mean, sample standard deviation, min and max
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(ForecastError::ValidationError(
                "Cannot summarize an empty value list".to_string(),
            ));
        }
        let data = Data::new(values.to_vec());
        Ok(Self {
            mean: data.mean().unwrap_or(f64::NAN),
            std_dev: data.std_dev().unwrap_or(f64::NAN),
            min: data.min(),
            max: data.max(),
        })
    }
}

/// Accuracy interpretation of the mean WAPE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyAssessment {
    Excellent,
    Acceptable,
    NeedsImprovement,
}

impl fmt::Display for AccuracyAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Excellent => "Excellent baseline accuracy for demand forecasting",
            Self::Acceptable => "Acceptable baseline accuracy",
            Self::NeedsImprovement => "Baseline accuracy may need improvement",
        };
        write!(f, "{}", text)
    }
}

/// Structured summary of baseline cross-validation results
#[derive(Debug, Clone, PartialEq)]
pub struct CvReport {
    folds: Vec<CvFoldRecord>,
    mae: SummaryStats,
    wape: SummaryStats,
}

impl CvReport {
    /// Build a report from fold records, validating them first
    pub fn from_records(folds: Vec<CvFoldRecord>) -> Result<Self> {
        if folds.is_empty() {
            return Err(ForecastError::ValidationError(
                "CV results are empty".to_string(),
            ));
        }
        if folds.iter().any(|f| !f.mae.is_finite() || !f.wape.is_finite()) {
            return Err(ForecastError::ValidationError(
                "CV results contain missing or non-finite values".to_string(),
            ));
        }

        let mae = SummaryStats::from_values(&folds.iter().map(|f| f.mae).collect::<Vec<_>>())?;
        let wape = SummaryStats::from_values(&folds.iter().map(|f| f.wape).collect::<Vec<_>>())?;
        Ok(Self { folds, mae, wape })
    }

    /// Load and analyze a CV results file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_records(read_cv_results(path)?)
    }

    /// Per-fold records
    pub fn folds(&self) -> &[CvFoldRecord] {
        &self.folds
    }

    /// Aggregate MAE statistics
    pub fn mae(&self) -> SummaryStats {
        self.mae
    }

    /// Aggregate WAPE statistics
    pub fn wape(&self) -> SummaryStats {
        self.wape
    }

    /// Interpretation of the mean WAPE
    pub fn assessment(&self) -> AccuracyAssessment {
        if self.wape.mean < EXCELLENT_WAPE {
            AccuracyAssessment::Excellent
        } else if self.wape.mean < ACCEPTABLE_WAPE {
            AccuracyAssessment::Acceptable
        } else {
            AccuracyAssessment::NeedsImprovement
        }
    }

    /// Whether fold performance is stable across time windows
    pub fn is_stable(&self) -> bool {
        (self.wape.max - self.wape.min) < STABLE_WAPE_SPREAD
    }
}

impl fmt::Display for CvReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Baseline CV Results Analysis")?;
        writeln!(f, "{}", "-".repeat(50))?;

        writeln!(f, "Fold-by-fold performance:")?;
        for fold in &self.folds {
            writeln!(
                f,
                "  Fold {}: MAE = {:.2}, WAPE = {:.2}%",
                fold.fold,
                fold.mae,
                fold.wape * 100.0
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Aggregate cross-validation summary:")?;
        writeln!(
            f,
            "  MAE : mean = {:.2}, std = {:.2}, min = {:.2}, max = {:.2}",
            self.mae.mean, self.mae.std_dev, self.mae.min, self.mae.max
        )?;
        writeln!(
            f,
            "  WAPE: mean = {:.2}%, std = {:.2}%, min = {:.2}%, max = {:.2}%",
            self.wape.mean * 100.0,
            self.wape.std_dev * 100.0,
            self.wape.min * 100.0,
            self.wape.max * 100.0
        )?;

        writeln!(f)?;
        writeln!(f, "Interpretation: {}", self.assessment())?;
        if self.is_stable() {
            writeln!(f, "Stability: model performance is stable across time")?;
        } else {
            writeln!(
                f,
                "Stability: model performance varies across time windows"
            )?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "Verdict: baseline cross-validation completed; safe to proceed with\n\
             final training, prediction generation and financial impact analysis"
        )
    }
}
