//! Dengue prediction from serology and residence details
//!
//! The row is `[age, ns1, igg, igm]` followed by the one-hot block a fitted
//! encoder produces for gender, area, area type, house type and district.
//! Some serology combinations are decided by a fixed rule before the model
//! is consulted.

use vecform_core::{
    categorical, Categorical, FeatureVector, FieldSpec, FieldValue, ReconcilePolicy, Schema,
    TestResult,
};
use vecform_model::{OneHotEncoder, PredictError};

use crate::deployment::Deployment;
use crate::outcome::{Severity, SubmissionError, Verdict};
use crate::result_format::{ClassLabel, LabelText, ResultFormat};

categorical! {
    pub enum Gender {
        Female => ("Female", 0),
        Male => ("Male", 1),
    }
}

categorical! {
    /// Dhaka thanas, sorted
    pub enum Area {
        Adabor => ("Adabor", 0),
        Badda => ("Badda", 1),
        Banasree => ("Banasree", 2),
        Bangshal => ("Bangshal", 3),
        BimanBandar => ("Biman Bandar", 4),
        Bosila => ("Bosila", 5),
        Cantonment => ("Cantonment", 6),
        Chawkbazar => ("Chawkbazar", 7),
        Demra => ("Demra", 8),
        Dhanmondi => ("Dhanmondi", 9),
        Gendaria => ("Gendaria", 10),
        Gulshan => ("Gulshan", 11),
        Hazaribagh => ("Hazaribagh", 12),
        Jatrabari => ("Jatrabari", 13),
        Kadamtali => ("Kadamtali", 14),
        Kafrul => ("Kafrul", 15),
        Kalabagan => ("Kalabagan", 16),
        Kamrangirchar => ("Kamrangirchar", 17),
        Keraniganj => ("Keraniganj", 18),
        Khilgaon => ("Khilgaon", 19),
        Khilkhet => ("Khilkhet", 20),
        Lalbagh => ("Lalbagh", 21),
        Mirpur => ("Mirpur", 22),
        Mohammadpur => ("Mohammadpur", 23),
        Motijheel => ("Motijheel", 24),
        NewMarket => ("New Market", 25),
        Pallabi => ("Pallabi", 26),
        Paltan => ("Paltan", 27),
        Ramna => ("Ramna", 28),
        Rampura => ("Rampura", 29),
        Sabujbagh => ("Sabujbagh", 30),
        Shahbagh => ("Shahbagh", 31),
        ShereBanglaNagar => ("Sher-e-Bangla Nagar", 32),
        Shyampur => ("Shyampur", 33),
        Sutrapur => ("Sutrapur", 34),
        Tejgaon => ("Tejgaon", 35),
    }
}

categorical! {
    pub enum AreaType {
        Undeveloped => ("Undeveloped", 0),
        Developed => ("Developed", 1),
    }
}

categorical! {
    pub enum HouseType {
        Building => ("Building", 0),
        Other => ("Other", 1),
        Tinshed => ("Tinshed", 2),
    }
}

categorical! {
    pub enum District {
        Dhaka => ("Dhaka", 0),
    }
}

/// Fields before this index go into the row as encoded; the rest go through
/// the one-hot encoder.
const SEROLOGY_END: usize = 4;

pub struct Dengue {
    schema: Schema,
}

impl Dengue {
    pub fn new() -> Self {
        Self {
            schema: Schema::new(vec![
                FieldSpec::numeric("age", "Age")
                    .range(1.0, 100.0)
                    .default_value(25.0)
                    .integer(),
                FieldSpec::categorical::<TestResult>("ns1", "NS1 Test"),
                FieldSpec::categorical::<TestResult>("igg", "IgG Test"),
                FieldSpec::categorical::<TestResult>("igm", "IgM Test"),
                FieldSpec::categorical::<Gender>("gender", "Gender"),
                FieldSpec::categorical::<Area>("area", "Area"),
                FieldSpec::categorical::<AreaType>("area_type", "Area Type"),
                FieldSpec::categorical::<HouseType>("house_type", "House Type"),
                FieldSpec::categorical::<District>("district", "District"),
            ]),
        }
    }
}

impl Default for Dengue {
    fn default() -> Self {
        Self::new()
    }
}

impl Deployment for Dengue {
    fn id(&self) -> &'static str {
        "dengue"
    }

    fn title(&self) -> &'static str {
        "Dengue Prediction System"
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn policy(&self) -> ReconcilePolicy {
        ReconcilePolicy::PadOrTruncate
    }

    fn needs_encoder(&self) -> bool {
        true
    }

    fn assemble(
        &self,
        values: &[FieldValue],
        encoder: Option<&OneHotEncoder>,
    ) -> Result<FeatureVector, SubmissionError> {
        let codes = self.schema.encode(values)?;
        let encoder = encoder.ok_or_else(|| {
            PredictError::Load("the dengue form needs a fitted categorical encoder".into())
        })?;
        let site: Vec<&str> = values[SEROLOGY_END..]
            .iter()
            .filter_map(FieldValue::as_label)
            .collect();
        let one_hot = encoder.transform(&site)?;
        Ok(FeatureVector::new(codes[..SEROLOGY_END].to_vec()).concat(one_hot))
    }

    fn rule_override(&self, values: &[FieldValue]) -> Option<Verdict> {
        let code = |i: usize| {
            values
                .get(i)
                .and_then(FieldValue::as_label)
                .and_then(TestResult::from_label)
                .map(TestResult::code)
        };
        match (code(1)?, code(2)?, code(3)?) {
            (0, 0, 0) => Some(Verdict::from_rule(
                Severity::Success,
                "No Dengue Detected (Medical Rule)",
            )),
            (1, 1, 0) | (1, 1, 1) => Some(Verdict::from_rule(
                Severity::Alert,
                "Dengue Detected (Medical Rule)",
            )),
            (1, 0, 0) => Some(Verdict::from_rule(Severity::Alert, "Dengue Detected")),
            // shown with alert styling although the text reports no dengue
            (1, 0, 1) => Some(Verdict::from_rule(Severity::Alert, "No Dengue Detected")),
            _ => None,
        }
    }

    fn result_format(&self) -> ResultFormat {
        ResultFormat::Discrete {
            classes: vec![ClassLabel {
                code: 1,
                message: "Dengue Detected".into(),
                severity: Severity::Alert,
            }],
            otherwise: LabelText {
                message: "No Dengue Detected".into(),
                severity: Severity::Success,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(ns1: &str, igg: &str, igm: &str) -> Vec<FieldValue> {
        vec![
            FieldValue::Number(25.0),
            ns1.into(),
            igg.into(),
            igm.into(),
            "Male".into(),
            "Mirpur".into(),
            "Developed".into(),
            "Building".into(),
            "Dhaka".into(),
        ]
    }

    #[test]
    fn areas_are_sorted_and_dense() {
        let labels: Vec<&str> = Area::VARIANTS.iter().map(|a| a.label()).collect();
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        assert_eq!(labels, sorted);
        assert_eq!(labels.len(), 36);
        for (i, a) in Area::VARIANTS.iter().enumerate() {
            assert_eq!(a.code(), i as i64);
        }
    }

    #[test]
    fn rule_table() {
        let d = Dengue::new();
        let msg = |a, b, c| d.rule_override(&form(a, b, c)).map(|v| v.message);
        assert_eq!(
            msg("Negative", "Negative", "Negative").as_deref(),
            Some("No Dengue Detected (Medical Rule)")
        );
        assert_eq!(
            msg("Positive", "Positive", "Negative").as_deref(),
            Some("Dengue Detected (Medical Rule)")
        );
        assert_eq!(
            msg("Positive", "Positive", "Positive").as_deref(),
            Some("Dengue Detected (Medical Rule)")
        );
        assert_eq!(msg("Positive", "Negative", "Negative").as_deref(), Some("Dengue Detected"));
        assert_eq!(msg("Positive", "Negative", "Positive").as_deref(), Some("No Dengue Detected"));
        assert_eq!(msg("Negative", "Positive", "Negative"), None);
        assert_eq!(msg("Negative", "Negative", "Positive"), None);
        assert_eq!(msg("Negative", "Positive", "Positive"), None);
    }

    #[test]
    fn assemble_without_encoder_is_oracle_failure() {
        let err = Dengue::new()
            .assemble(&form("Positive", "Negative", "Negative"), None)
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Oracle(PredictError::Load(_))));
    }

    #[test]
    fn assemble_checks_labels_before_encoder() {
        let mut values = form("Positive", "Negative", "Negative");
        values[6] = "Suburban".into();
        let err = Dengue::new().assemble(&values, None).unwrap_err();
        assert!(matches!(err, SubmissionError::Encoding(_)));
    }

    #[test]
    fn age_is_a_whole_number() {
        let raw = std::collections::BTreeMap::from([("age".to_string(), "25.5".to_string())]);
        let err = Dengue::new().schema().resolve(&raw).unwrap_err();
        assert!(matches!(err, vecform_core::InputError::NotAnInteger { .. }));
    }
}
