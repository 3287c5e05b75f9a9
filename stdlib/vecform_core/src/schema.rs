//! Ordered form declarations: resolution of raw input and vector encoding

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::error::{EncodingError, InputError};
use crate::field::{FieldKind, FieldSpec, FieldValue};
use crate::vector::FeatureVector;

/// Fixed, ordered list of the fields of one form.
///
/// The declaration order is the order of the encoded feature vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Number of declared fields, i.e. the length of an encoded vector
    pub fn width(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Values every control shows before the user changes anything
    pub fn defaults(&self) -> Vec<FieldValue> {
        self.fields
            .iter()
            .filter_map(FieldSpec::default_field_value)
            .collect()
    }

    /// Turn `name -> text` pairs into one value per declared field.
    ///
    /// Missing entries take the field default. Numeric text must parse to a
    /// finite number inside the declared bounds, and to a whole number for
    /// integer fields. Categorical text is passed through as a label;
    /// [`Schema::encode`] checks it against the rule.
    pub fn resolve(&self, raw: &BTreeMap<String, String>) -> Result<Vec<FieldValue>, InputError> {
        if let Some(unknown) = raw.keys().find(|k| self.field(k).is_none()) {
            return Err(InputError::UnknownField(unknown.clone()));
        }

        let mut values = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let text = raw.get(&field.name).map(|s| s.trim());
            let value = match (&field.kind, text) {
                (
                    FieldKind::Numeric {
                        min, max, integer, ..
                    },
                    Some(text),
                ) => {
                    let x = text
                        .parse::<f64>()
                        .ok()
                        .filter(|x| x.is_finite())
                        .ok_or_else(|| InputError::NotANumber {
                            field: field.name.clone(),
                            text: text.to_string(),
                        })?;
                    if *integer && x.fract() != 0.0 {
                        return Err(InputError::NotAnInteger {
                            field: field.name.clone(),
                            value: x,
                        });
                    }
                    let lo = min.unwrap_or(f64::NEG_INFINITY);
                    let hi = max.unwrap_or(f64::INFINITY);
                    if x < lo || x > hi {
                        return Err(InputError::OutOfRange {
                            field: field.name.clone(),
                            value: x,
                            min: lo,
                            max: hi,
                        });
                    }
                    FieldValue::Number(x)
                }
                (FieldKind::Categorical { .. }, Some(text)) => FieldValue::Label(text.to_string()),
                (FieldKind::Numeric { default, .. }, None) => FieldValue::Number(*default),
                (FieldKind::Categorical { rule }, None) => {
                    FieldValue::Label(rule.first_label().unwrap_or_default().to_string())
                }
            };
            values.push(value);
        }
        Ok(values)
    }

    /// Encode one value per declared field into a feature vector.
    ///
    /// Numeric values are copied; categorical labels are replaced by their
    /// code. The result has exactly [`Schema::width`] elements.
    pub fn encode(&self, values: &[FieldValue]) -> Result<FeatureVector, EncodingError> {
        if values.len() != self.fields.len() {
            return Err(EncodingError::ArityMismatch {
                expected: self.fields.len(),
                found: values.len(),
            });
        }

        let encoded = self
            .fields
            .iter()
            .zip(values)
            .map(|(field, value)| encode_field(field, value))
            .collect::<Result<FeatureVector, _>>()?;
        debug!("encoded {} fields: {:?}", encoded.len(), encoded.as_slice());
        Ok(encoded)
    }
}

fn encode_field(field: &FieldSpec, value: &FieldValue) -> Result<f64, EncodingError> {
    match (&field.kind, value) {
        (FieldKind::Numeric { .. }, FieldValue::Number(x)) => Ok(*x),
        (FieldKind::Categorical { rule }, FieldValue::Label(label)) => {
            rule.encode(&field.name, label).map(|code| code as f64)
        }
        (FieldKind::Numeric { .. }, FieldValue::Label(_)) => Err(EncodingError::KindMismatch {
            field: field.name.clone(),
            expected: "numeric",
        }),
        (FieldKind::Categorical { .. }, FieldValue::Number(_)) => {
            Err(EncodingError::KindMismatch {
                field: field.name.clone(),
                expected: "categorical",
            })
        }
    }
}

/// Free-function form of [`Schema::encode`]
pub fn encode(schema: &Schema, values: &[FieldValue]) -> Result<FeatureVector, EncodingError> {
    schema.encode(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{Level, YesNo};
    use pretty_assertions::assert_eq;

    fn schema() -> Schema {
        Schema::new(vec![
            FieldSpec::numeric("age", "Age").range(0.0, 120.0).default_value(28.0),
            FieldSpec::categorical::<YesNo>("smoking", "Smoking"),
            FieldSpec::categorical::<Level>("stress", "Stress Level"),
        ])
    }

    fn raw(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn encode_in_declared_order() {
        let v = schema()
            .encode(&[FieldValue::Number(41.0), "Yes".into(), "High".into()])
            .unwrap();
        assert_eq!(v.as_slice(), &[41.0, 1.0, 2.0]);
    }

    #[test]
    fn encode_checks_arity() {
        let err = schema().encode(&[FieldValue::Number(1.0)]).unwrap_err();
        assert_eq!(err, EncodingError::ArityMismatch { expected: 3, found: 1 });
    }

    #[test]
    fn encode_checks_kind() {
        let err = schema()
            .encode(&[FieldValue::Number(30.0), FieldValue::Number(1.0), "Low".into()])
            .unwrap_err();
        assert_eq!(
            err,
            EncodingError::KindMismatch {
                field: "smoking".into(),
                expected: "categorical"
            }
        );
    }

    #[test]
    fn resolve_fills_defaults() {
        let values = schema().resolve(&BTreeMap::new()).unwrap();
        assert_eq!(values, schema().defaults());
        assert_eq!(
            values,
            vec![FieldValue::Number(28.0), "No".into(), "Low".into()]
        );
    }

    #[test]
    fn resolve_parses_and_bounds_numbers() {
        let values = schema().resolve(&raw(&[("age", " 65 "), ("stress", "Moderate")])).unwrap();
        assert_eq!(values[0], FieldValue::Number(65.0));
        assert_eq!(values[2], FieldValue::from("Moderate"));

        let err = schema().resolve(&raw(&[("age", "130")])).unwrap_err();
        assert!(matches!(err, InputError::OutOfRange { value, .. } if value == 130.0));

        let err = schema().resolve(&raw(&[("age", "old")])).unwrap_err();
        assert!(matches!(err, InputError::NotANumber { .. }));

        let err = schema().resolve(&raw(&[("age", "NaN")])).unwrap_err();
        assert!(matches!(err, InputError::NotANumber { .. }));
    }

    #[test]
    fn resolve_rejects_fractions_for_integer_fields() {
        let schema = Schema::new(vec![
            FieldSpec::numeric("ckd_stage", "CKD Stage").range(0.0, 5.0).integer(),
            FieldSpec::numeric("urine_ph", "Urine pH").range(4.0, 9.0).default_value(6.0),
        ]);
        let err = schema.resolve(&raw(&[("ckd_stage", "2.7")])).unwrap_err();
        assert_eq!(
            err,
            InputError::NotAnInteger {
                field: "ckd_stage".into(),
                value: 2.7
            }
        );

        // "3.0" is still a whole number; non-integer fields keep fractions
        let values = schema
            .resolve(&raw(&[("ckd_stage", "3.0"), ("urine_ph", "6.5")]))
            .unwrap();
        assert_eq!(values, vec![FieldValue::Number(3.0), FieldValue::Number(6.5)]);
    }

    #[test]
    fn resolve_rejects_undeclared_fields() {
        let err = schema().resolve(&raw(&[("weight", "80")])).unwrap_err();
        assert_eq!(err, InputError::UnknownField("weight".into()));
    }

    #[test]
    fn resolve_leaves_label_checks_to_encode() {
        let values = schema().resolve(&raw(&[("smoking", "Sometimes")])).unwrap();
        let err = schema().encode(&values).unwrap_err();
        assert!(matches!(err, EncodingError::UnknownLabel { .. }));
    }
}
