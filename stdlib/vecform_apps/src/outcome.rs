//! Submission results

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vecform_core::EncodingError;
use vecform_model::PredictError;

/// How a verdict is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Success,
    Warning,
    Alert,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Warning => write!(f, "warning"),
            Severity::Alert => write!(f, "alert"),
        }
    }
}

/// Human-readable result of one submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub severity: Severity,
    pub message: String,
    /// Raw oracle output; `None` when a rule decided without the model
    pub prediction: Option<f64>,
}

impl Verdict {
    pub fn from_model(severity: Severity, message: impl Into<String>, prediction: f64) -> Self {
        Self {
            severity,
            message: message.into(),
            prediction: Some(prediction),
        }
    }

    pub fn from_rule(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            prediction: None,
        }
    }
}

/// Why a submission produced no verdict.
///
/// Terminal for that submission only; nothing is retried.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error("Prediction failed: {0}")]
    Oracle(#[from] PredictError),
}
