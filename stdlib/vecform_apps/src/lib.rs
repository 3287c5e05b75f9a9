//! Form-driven prediction deployments
//!
//! Each deployment declares its form, assembles the oracle input row from the
//! submitted values, and maps the oracle's output onto a status message.

pub mod apps;
pub mod config;
pub mod deployment;
pub mod outcome;
pub mod pipeline;
pub mod result_format;

pub use config::{ArtifactRef, ConfigError, DeploymentConfig};
pub use deployment::Deployment;
pub use outcome::{Severity, SubmissionError, Verdict};
pub use pipeline::Pipeline;
pub use result_format::{group_thousands, ClassLabel, LabelText, ResultFormat};
