//! Prediction backend trait and error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or invoking a model
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Model loading failed: {0}")]
    Load(String),
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed artifact '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Inference failed: {0}")]
    Inference(String),
}

/// A loaded, read-only prediction model
///
/// Implementations take one input row and return a single numeric result:
/// a class label for classifiers, a value for regressors.
pub trait ModelBackend: Send + Sync {
    /// Number of features the model was trained on
    fn expected_width(&self) -> usize;

    /// Predict for a single row of exactly [`expected_width`](Self::expected_width) values
    fn predict(&self, features: &[f64]) -> Result<f64, PredictError>;

    /// Get backend name/identifier
    fn backend_name(&self) -> &str;
}

/// Reject rows whose width differs from what the model was trained on
pub(crate) fn check_width(features: &[f64], expected: usize) -> Result<(), PredictError> {
    if features.len() != expected {
        return Err(PredictError::InvalidInput(format!(
            "X has {} features, but the model is expecting {expected} features as input",
            features.len()
        )));
    }
    if let Some(i) = features.iter().position(|x| !x.is_finite()) {
        return Err(PredictError::InvalidInput(format!(
            "feature {i} is not a finite number"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_mismatch_is_invalid_input() {
        let err = check_width(&[1.0, 2.0, 3.0], 2).unwrap_err();
        assert!(matches!(err, PredictError::InvalidInput(_)));
        assert_eq!(
            err.to_string(),
            "Invalid input: X has 3 features, but the model is expecting 2 features as input"
        );
    }

    #[test]
    fn non_finite_feature_rejected() {
        assert!(check_width(&[1.0, f64::NAN], 2).is_err());
        assert!(check_width(&[1.0, 2.0], 2).is_ok());
    }
}
