//! A prediction form: declared fields, vector assembly and result labels

use vecform_core::{FeatureVector, FieldValue, ReconcilePolicy, Schema};
use vecform_model::OneHotEncoder;

use crate::outcome::{SubmissionError, Verdict};
use crate::result_format::ResultFormat;

pub trait Deployment: Send + Sync {
    /// Short identifier used on the command line and in config files
    fn id(&self) -> &'static str;

    fn title(&self) -> &'static str;

    /// Declared fields, in feature-vector order
    fn schema(&self) -> &Schema;

    fn policy(&self) -> ReconcilePolicy;

    /// Whether [`assemble`](Self::assemble) needs a fitted categorical encoder
    fn needs_encoder(&self) -> bool {
        false
    }

    /// Build the oracle input row from one value per declared field
    fn assemble(
        &self,
        values: &[FieldValue],
        _encoder: Option<&OneHotEncoder>,
    ) -> Result<FeatureVector, SubmissionError> {
        Ok(self.schema().encode(values)?)
    }

    /// A verdict that bypasses the oracle for these values, if any
    fn rule_override(&self, _values: &[FieldValue]) -> Option<Verdict> {
        None
    }

    fn result_format(&self) -> ResultFormat;
}
