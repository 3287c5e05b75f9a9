//! Typhoid prediction from Widal and Weil-Felix titres

use vecform_core::{
    categorical, FeatureVector, FieldSpec, FieldValue, ReconcilePolicy, Schema, YesNo,
};
use vecform_model::OneHotEncoder;

use crate::deployment::Deployment;
use crate::outcome::{Severity, SubmissionError};
use crate::result_format::{ClassLabel, LabelText, ResultFormat};

categorical! {
    pub enum Gender {
        Male => ("Male", 1),
        Female => ("Female", 0),
    }
}

/// The model was fitted with an encoded patient name in column 0; the form
/// never collects one.
const PATIENT_NAME_CODE: f64 = 0.0;

pub struct Typhoid {
    schema: Schema,
}

impl Typhoid {
    pub fn new() -> Self {
        let titre = |name: &str| FieldSpec::numeric(name, name.to_uppercase()).at_least(0.0);
        Self {
            schema: Schema::new(vec![
                FieldSpec::numeric("age", "Age (years)")
                    .range(0.0, 120.0)
                    .default_value(28.0),
                FieldSpec::categorical::<Gender>("gender", "Gender"),
                titre("to"),
                titre("th"),
                titre("ah"),
                titre("bh"),
                titre("ox2"),
                titre("oxk"),
                titre("ox9"),
                titre("a"),
                titre("m"),
                FieldSpec::categorical::<YesNo>("rickettsia", "Rickettsia Suspect"),
                FieldSpec::categorical::<YesNo>("acute", "Acute Typhoid"),
                FieldSpec::categorical::<YesNo>("paratyphoid_a", "Paratyphoid A"),
                FieldSpec::categorical::<YesNo>("paratyphoid_b", "Paratyphoid B"),
            ]),
        }
    }
}

impl Default for Typhoid {
    fn default() -> Self {
        Self::new()
    }
}

impl Deployment for Typhoid {
    fn id(&self) -> &'static str {
        "typhoid"
    }

    fn title(&self) -> &'static str {
        "Typhoid Prediction System"
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn policy(&self) -> ReconcilePolicy {
        ReconcilePolicy::Exact
    }

    fn assemble(
        &self,
        values: &[FieldValue],
        _encoder: Option<&OneHotEncoder>,
    ) -> Result<FeatureVector, SubmissionError> {
        Ok(self.schema.encode(values)?.prepend(PATIENT_NAME_CODE))
    }

    fn result_format(&self) -> ResultFormat {
        ResultFormat::Discrete {
            classes: vec![
                ClassLabel {
                    code: 0,
                    message: "Minimal Typhoid".into(),
                    severity: Severity::Warning,
                },
                ClassLabel {
                    code: 1,
                    message: "Negative Typhoid".into(),
                    severity: Severity::Success,
                },
            ],
            otherwise: LabelText {
                message: "Positive Typhoid".into(),
                severity: Severity::Alert,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_is_sixteen_wide_with_name_placeholder() {
        let t = Typhoid::new();
        let row = t.assemble(&t.schema().defaults(), None).unwrap();
        assert_eq!(row.len(), 16);
        // placeholder, age 28, Male -> 1
        assert_eq!(&row[..3], &[0.0, 28.0, 1.0]);
        assert!(row[3..].iter().all(|x| *x == 0.0));
    }

    #[test]
    fn titre_labels_are_upper_case() {
        let t = Typhoid::new();
        assert_eq!(t.schema().field("ox2").map(|f| f.label.as_str()), Some("OX2"));
    }
}
