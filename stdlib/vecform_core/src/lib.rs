//! Feature vector adapter for form-driven prediction
//!
//! Declares the fields of a form, encodes submitted values into an ordered
//! numeric vector, and reconciles that vector against the input width a
//! prediction model declares.

pub mod encoding;
pub mod error;
pub mod field;
pub mod schema;
pub mod vector;

pub use encoding::{Categorical, EncodingRule, LabelCode, Level, TestResult, YesNo};
pub use error::{EncodingError, InputError};
pub use field::{FieldKind, FieldSpec, FieldValue};
pub use schema::{encode, Schema};
pub use vector::{reconcile, FeatureVector, ReconcilePolicy};
