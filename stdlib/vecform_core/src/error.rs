//! Error types for field encoding and form resolution

use thiserror::Error;

/// Errors raised while turning field values into a feature vector.
///
/// Any of these reaching the adapter means the presentation layer emitted
/// something outside the declared form; they are never defaulted away.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodingError {
    #[error("field '{field}' has no encoding for label '{label}' (expected one of: {})", .allowed.join(", "))]
    UnknownLabel {
        field: String,
        label: String,
        allowed: Vec<String>,
    },
    #[error("field '{field}' expects a {expected} value")]
    KindMismatch {
        field: String,
        expected: &'static str,
    },
    #[error("expected {expected} field values, got {found}")]
    ArityMismatch { expected: usize, found: usize },
    #[error("label '{label}' is declared more than once")]
    DuplicateLabel { label: String },
}

/// Errors raised while resolving raw text input against a form declaration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("'{0}' is not a field of this form")]
    UnknownField(String),
    #[error("field '{field}': '{text}' is not a number")]
    NotANumber { field: String, text: String },
    #[error("field '{field}': {value} is not a whole number")]
    NotAnInteger { field: String, value: f64 },
    #[error("field '{field}': {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
}
