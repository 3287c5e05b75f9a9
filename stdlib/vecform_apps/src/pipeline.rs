//! One submission: encode, reconcile, predict, render

use std::sync::Arc;

use log::{debug, info};
use vecform_core::FieldValue;
use vecform_model::{ModelBackend, OneHotEncoder};

use crate::deployment::Deployment;
use crate::outcome::{SubmissionError, Verdict};
use crate::result_format::ResultFormat;

/// A deployment bound to its loaded, read-only artifacts
pub struct Pipeline<'a> {
    deployment: &'a dyn Deployment,
    model: Arc<dyn ModelBackend>,
    encoder: Option<Arc<OneHotEncoder>>,
    format: ResultFormat,
}

impl<'a> Pipeline<'a> {
    pub fn new(deployment: &'a dyn Deployment, model: Arc<dyn ModelBackend>) -> Self {
        Self {
            deployment,
            model,
            encoder: None,
            format: deployment.result_format(),
        }
    }

    pub fn with_encoder(mut self, encoder: Arc<OneHotEncoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Replace the deployment's own label table
    pub fn with_format(mut self, format: ResultFormat) -> Self {
        self.format = format;
        self
    }

    pub fn deployment(&self) -> &dyn Deployment {
        self.deployment
    }

    pub fn submit(&self, values: &[FieldValue]) -> Result<Verdict, SubmissionError> {
        let id = self.deployment.id();
        let vector = self.deployment.assemble(values, self.encoder.as_deref())?;
        let width = self.model.expected_width();
        let row = self.deployment.policy().apply(vector, width);
        debug!("{id}: row of {} values for a {width}-wide model: {:?}", row.len(), row.as_slice());

        if let Some(verdict) = self.deployment.rule_override(values) {
            info!("{id}: rule override, model not consulted");
            return Ok(verdict);
        }

        let prediction = self.model.predict(&row)?;
        info!("{id}: {} predicted {prediction}", self.model.backend_name());
        Ok(self.format.render(prediction))
    }
}
