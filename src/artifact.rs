//! Persisted model artifact
//!
//! Bundles the trained forest with the fitted encoder and the exact feature
//! schema it was trained on. Inference re-uses the persisted encoder verbatim
//! and never re-fits anything.

use crate::cv::design_matrix;
use crate::encoding::OneHotEncoder;
use crate::error::{ForecastError, Result};
use crate::features::FeatureSet;
use crate::models::{RandomForestRegressor, Regressor, TrainedRandomForest, TrainedRegressor};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// Trained baseline model plus everything needed to reproduce its inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub model: TrainedRandomForest,
    pub encoder: OneHotEncoder,
    pub numeric_features: Vec<String>,
    pub categorical_features: Vec<String>,
}

impl ModelArtifact {
    /// Fit a forest on the full feature set and bundle it with the encoder
    /// and feature schema
    pub fn fit(features: &FeatureSet, config: &RandomForestRegressor) -> Result<Self> {
        if features.is_empty() {
            return Err(ForecastError::ValidationError(
                "Cannot train on an empty feature set".to_string(),
            ));
        }

        let countries = features.countries();
        let encoder = OneHotEncoder::fit(&countries)?;
        let x = design_matrix(&features.numeric_matrix()?, &countries, &encoder)?;
        let y = features.targets();

        info!(
            rows = x.n_rows(),
            columns = x.n_cols(),
            model = config.name(),
            "training final baseline model"
        );
        let model = config.fit(&x, &y)?;

        Ok(Self {
            model,
            encoder,
            numeric_features: features.numeric_names().to_vec(),
            categorical_features: vec!["COUNTRY".to_string()],
        })
    }

    /// Predict demand for every row of a feature set.
    ///
    /// The feature set must carry every numeric column the model was trained
    /// on; columns are re-ordered to the training order before prediction.
    pub fn predict(&self, features: &FeatureSet) -> Result<Vec<f64>> {
        let numeric = features.numeric_matrix_ordered(&self.numeric_features)?;
        let x = design_matrix(&numeric, &features.countries(), &self.encoder)?;
        self.model.predict(&x)
    }

    /// Save the artifact as JSON, creating parent directories as needed
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, self)?;
        info!(path = %path.display(), "model artifact saved");
        Ok(())
    }

    /// Load a previously saved artifact
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ForecastError::DataError(format!(
                "file not found at {}: run the train_final_baseline stage first",
                path.display()
            )));
        }
        let reader = BufReader::new(File::open(path)?);
        let artifact = serde_json::from_reader(reader)?;
        Ok(artifact)
    }
}
