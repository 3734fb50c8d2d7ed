//! Pipeline configuration and file layout
//!
//! Every stage of the pipeline reads and writes flat files under a single
//! data root. The defaults mirror the layout the stage binaries expect:
//!
//! ```text
//! <root>/data/processed/model_training_dataset.csv
//! <root>/data/processed/model_features_final.csv
//! <root>/data/processed/baseline_cv_results.csv
//! <root>/data/processed/baseline_predictions.csv
//! <root>/models/baseline_model.json
//! ```

use std::env;
use std::path::{Path, PathBuf};

/// File locations for every pipeline stage
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    root: PathBuf,
}

impl PipelineConfig {
    /// Create a config rooted at the given directory
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Build a config from the process arguments: the first argument, if
    /// present, overrides the data root (defaults to the current directory)
    pub fn from_args() -> Self {
        match env::args().nth(1) {
            Some(root) => Self::new(root),
            None => Self::default(),
        }
    }

    /// Data root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Raw synthetic training dataset
    pub fn training_dataset(&self) -> PathBuf {
        self.root.join("data/processed/model_training_dataset.csv")
    }

    /// Engineered feature matrix
    pub fn feature_matrix(&self) -> PathBuf {
        self.root.join("data/processed/model_features_final.csv")
    }

    /// Per-fold cross-validation results
    pub fn cv_results(&self) -> PathBuf {
        self.root.join("data/processed/baseline_cv_results.csv")
    }

    /// Trained model artifact
    pub fn model_artifact(&self) -> PathBuf {
        self.root.join("models/baseline_model.json")
    }

    /// Baseline predictions over full history
    pub fn predictions(&self) -> PathBuf {
        self.root.join("data/processed/baseline_predictions.csv")
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
