//! Backend implementations for the supported estimator families

pub mod classifier;
pub mod linear;

pub use classifier::LinearClassifier;
pub use linear::LinearRegressor;
