//! Linear regression backend: y = w·x + b

use crate::backend::{check_width, ModelBackend, PredictError};

/// Continuous-output linear model
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressor {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }
}

impl ModelBackend for LinearRegressor {
    fn expected_width(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, features: &[f64]) -> Result<f64, PredictError> {
        check_width(features, self.coefficients.len())?;
        let dot: f64 = features
            .iter()
            .zip(&self.coefficients)
            .map(|(x, w)| x * w)
            .sum();
        Ok(dot + self.intercept)
    }

    fn backend_name(&self) -> &str {
        "linear_regression"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_predict() {
        let model = LinearRegressor::new(vec![0.5, 1.5, -1.0], 0.25);
        let y = model.predict(&[2.0, -1.0, 0.5]).unwrap();
        // 0.5*2.0 + 1.5*(-1.0) + (-1.0)*0.5 + 0.25
        assert!((y - (-0.75)).abs() < 1e-12);
        assert_eq!(model.expected_width(), 3);
    }

    #[test]
    fn linear_rejects_wrong_width() {
        let model = LinearRegressor::new(vec![1.0, 1.0], 0.0);
        assert!(matches!(
            model.predict(&[1.0, 2.0, 3.0]),
            Err(PredictError::InvalidInput(_))
        ));
    }
}
