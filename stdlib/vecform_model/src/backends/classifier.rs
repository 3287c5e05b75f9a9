//! Linear classifier backend
//!
//! One coefficient row per class, or a single row for a binary problem where
//! a positive decision value selects the second class.

use crate::backend::{check_width, ModelBackend, PredictError};

/// Discrete-output linear model returning one of its `classes`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearClassifier {
    classes: Vec<f64>,
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl LinearClassifier {
    pub fn new(
        classes: Vec<f64>,
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    ) -> Result<Self, PredictError> {
        if classes.len() < 2 {
            return Err(PredictError::Load(format!(
                "a classifier needs at least two classes, got {}",
                classes.len()
            )));
        }
        let binary = classes.len() == 2 && coefficients.len() == 1;
        if !binary && coefficients.len() != classes.len() {
            return Err(PredictError::Load(format!(
                "{} coefficient rows for {} classes",
                coefficients.len(),
                classes.len()
            )));
        }
        if intercepts.len() != coefficients.len() {
            return Err(PredictError::Load(format!(
                "{} intercepts for {} coefficient rows",
                intercepts.len(),
                coefficients.len()
            )));
        }
        let width = coefficients[0].len();
        if let Some(row) = coefficients.iter().position(|r| r.len() != width) {
            return Err(PredictError::Load(format!(
                "coefficient row {row} has {} values, expected {width}",
                coefficients[row].len()
            )));
        }
        Ok(Self {
            classes,
            coefficients,
            intercepts,
        })
    }

    pub fn classes(&self) -> &[f64] {
        &self.classes
    }

    fn decision(&self, row: usize, features: &[f64]) -> f64 {
        let dot: f64 = features
            .iter()
            .zip(&self.coefficients[row])
            .map(|(x, w)| x * w)
            .sum();
        dot + self.intercepts[row]
    }
}

impl ModelBackend for LinearClassifier {
    fn expected_width(&self) -> usize {
        self.coefficients[0].len()
    }

    fn predict(&self, features: &[f64]) -> Result<f64, PredictError> {
        check_width(features, self.expected_width())?;
        if self.coefficients.len() == 1 {
            let class = if self.decision(0, features) > 0.0 { 1 } else { 0 };
            return Ok(self.classes[class]);
        }
        let mut best = 0;
        let mut best_score = self.decision(0, features);
        for row in 1..self.coefficients.len() {
            let score = self.decision(row, features);
            if score > best_score {
                best = row;
                best_score = score;
            }
        }
        Ok(self.classes[best])
    }

    fn backend_name(&self) -> &str {
        "linear_classifier"
    }
}
