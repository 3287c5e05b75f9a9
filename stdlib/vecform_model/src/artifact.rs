//! On-disk model artifacts
//!
//! A model artifact is a JSON document naming the estimator family, its
//! fitted parameters, and the number of input features it was trained on:
//!
//! ```json
//! {
//!   "name": "kidney-stone-risk",
//!   "version": "1.0.0",
//!   "n_features_in": 20,
//!   "estimator": { "kind": "linear_classifier", "classes": [0, 1],
//!                  "coefficients": [[...]], "intercepts": [-0.4] }
//! }
//! ```

use std::fs::read_to_string;
use std::path::Path;
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::backend::{ModelBackend, PredictError};
use crate::backends::{LinearClassifier, LinearRegressor};

/// Fitted estimator parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    LinearRegression {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    LinearClassifier {
        classes: Vec<f64>,
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Width of the input row the estimator was fitted on
    pub n_features_in: usize,
    pub estimator: Estimator,
}

impl ModelArtifact {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PredictError> {
        let path = path.as_ref();
        let text = read_to_string(path).map_err(|source| PredictError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| PredictError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build the backend, checking the fitted parameters against `n_features_in`
    pub fn into_backend(self) -> Result<Arc<dyn ModelBackend>, PredictError> {
        let backend: Arc<dyn ModelBackend> = match self.estimator {
            Estimator::LinearRegression {
                coefficients,
                intercept,
            } => Arc::new(LinearRegressor::new(coefficients, intercept)),
            Estimator::LinearClassifier {
                classes,
                coefficients,
                intercepts,
            } => Arc::new(LinearClassifier::new(classes, coefficients, intercepts)?),
        };
        if backend.expected_width() != self.n_features_in {
            return Err(PredictError::Load(format!(
                "model '{}' declares {} input features but its coefficients have {}",
                self.name,
                self.n_features_in,
                backend.expected_width()
            )));
        }
        Ok(backend)
    }
}

/// Read a model artifact from `path` and build its backend
pub fn load_model(path: impl AsRef<Path>) -> Result<Arc<dyn ModelBackend>, PredictError> {
    let path = path.as_ref();
    let artifact = ModelArtifact::load(path)?;
    info!(
        "loaded model '{}' {} from {} ({} features)",
        artifact.name,
        artifact.version.as_deref().unwrap_or("(unversioned)"),
        path.display(),
        artifact.n_features_in
    );
    artifact.into_backend()
}
