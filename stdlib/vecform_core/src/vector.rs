//! Feature vectors and width reconciliation

use std::ops::Deref;

use log::warn;
use serde::Serialize;

/// Ordered numeric input row for a prediction oracle.
///
/// Element order is part of the oracle's contract: the same numbers in a
/// different order are a different (wrong) input.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Append `other` after the existing elements
    pub fn concat(mut self, other: impl IntoIterator<Item = f64>) -> Self {
        self.0.extend(other);
        self
    }

    /// Insert a value in front of the existing elements
    pub fn prepend(mut self, value: f64) -> Self {
        self.0.insert(0, value);
        self
    }
}

impl Deref for FeatureVector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl FromIterator<f64> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Force `vector` to exactly `expected_width` elements.
///
/// Longer vectors keep their first `expected_width` elements; shorter ones are
/// right-padded with zeros. Both cases assume the trailing features are the
/// least significant, which the oracle cannot confirm: a reconciled vector
/// may yield a degraded prediction instead of an error.
pub fn reconcile(vector: FeatureVector, expected_width: usize) -> FeatureVector {
    let width = vector.len();
    if width == expected_width {
        return vector;
    }
    let mut values = vector.into_inner();
    if width > expected_width {
        warn!("truncating feature vector from {width} to {expected_width} elements");
        values.truncate(expected_width);
    } else {
        warn!("zero-padding feature vector from {width} to {expected_width} elements");
        values.resize(expected_width, 0.0);
    }
    FeatureVector(values)
}

/// How much of [`reconcile`] a deployment applies before calling its oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilePolicy {
    /// Hand the vector over as assembled
    Exact,
    /// Pad short vectors; long ones pass through and the oracle rejects them
    PadOnly,
    /// Pad short vectors and truncate long ones
    PadOrTruncate,
}

impl ReconcilePolicy {
    pub fn apply(self, vector: FeatureVector, expected_width: usize) -> FeatureVector {
        match self {
            ReconcilePolicy::Exact => vector,
            ReconcilePolicy::PadOnly if vector.len() > expected_width => {
                warn!(
                    "feature vector has {} elements but the model expects {expected_width}; passing it through",
                    vector.len()
                );
                vector
            }
            ReconcilePolicy::PadOnly | ReconcilePolicy::PadOrTruncate => {
                reconcile(vector, expected_width)
            }
        }
    }
}
