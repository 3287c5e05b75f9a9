//! Prediction oracles for vecform deployments
//!
//! Loads pre-trained model artifacts and fitted categorical encoders from
//! disk and exposes them behind the [`ModelBackend`] trait. Loaded artifacts
//! are read-only and shared for the lifetime of the process.

pub mod artifact;
pub mod backend;
pub mod backends;
pub mod encoder;
pub mod handle;

pub use artifact::{load_model, Estimator, ModelArtifact};
pub use backend::{ModelBackend, PredictError};
pub use backends::{LinearClassifier, LinearRegressor};
pub use encoder::{EncoderColumn, OneHotEncoder};
pub use handle::{ArtifactCell, EncoderCell, ModelCell};
