//! # Demand Forecast
//!
//! A batch pipeline for baseline marketing demand forecasting:
//!
//! - Synthetic per-country demand dataset generation
//! - Deterministic, leak-free feature engineering (calendar, marketing
//!   efficiency, macro interactions, trend features)
//! - Random forest regression with expanding-window time-series
//!   cross-validation
//! - Persisted model artifact and full-history baseline predictions
//! - Financial impact analysis converting forecast residuals into
//!   asymmetric dollar costs
//!
//! ## Quick Start
//!
//! ```no_run
//! use demand_forecast::cv::{cross_validate, TimeSeriesSplit};
//! use demand_forecast::features::engineer_features;
//! use demand_forecast::models::RandomForestRegressor;
//! use demand_forecast::synthetic::{generate_dataset, SyntheticConfig};
//!
//! # fn main() -> demand_forecast::Result<()> {
//! // Generate a deterministic synthetic dataset
//! let records = generate_dataset(&SyntheticConfig::default())?;
//!
//! // Engineer the feature matrix
//! let features = engineer_features(&records)?;
//!
//! // Cross-validate the baseline model with time-aware splits
//! let model = RandomForestRegressor::baseline_cv()?;
//! let splitter = TimeSeriesSplit::new(5)?;
//! let folds = cross_validate(&features, &model, &splitter)?;
//!
//! for fold in &folds {
//!     println!("fold {}: MAE {:.2}, WAPE {:.2}%", fold.fold, fold.mae, fold.wape * 100.0);
//! }
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod config;
pub mod cv;
pub mod data;
pub mod encoding;
pub mod error;
pub mod features;
pub mod impact;
pub mod metrics;
pub mod models;
pub mod report;
pub mod synthetic;

// Re-export commonly used types
pub use crate::artifact::ModelArtifact;
pub use crate::config::PipelineConfig;
pub use crate::cv::TimeSeriesSplit;
pub use crate::data::{CvFoldRecord, DemandRecord, PredictionRecord};
pub use crate::encoding::OneHotEncoder;
pub use crate::error::{ForecastError, Result};
pub use crate::features::FeatureSet;
pub use crate::impact::{CostAssumptions, FinancialImpact};
pub use crate::models::{RandomForestRegressor, Regressor, TrainedRegressor};
pub use crate::report::CvReport;

/// Initialize stdout logging for the pipeline binaries.
///
/// Honors `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
