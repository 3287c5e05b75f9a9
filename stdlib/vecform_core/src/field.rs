//! Field declarations and submitted field values

use serde::{Deserialize, Serialize};

use crate::encoding::{Categorical, EncodingRule};

/// Semantic type of a form field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Numeric {
        min: Option<f64>,
        max: Option<f64>,
        default: f64,
        /// Only whole numbers are accepted
        integer: bool,
    },
    Categorical { rule: EncodingRule },
}

/// A named input of a form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    /// Text shown next to the control
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Unbounded numeric field with a zero default
    pub fn numeric(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: FieldKind::Numeric {
                min: None,
                max: None,
                default: 0.0,
                integer: false,
            },
        }
    }

    pub fn categorical<T: Categorical>(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_rule(name, label, EncodingRule::of::<T>())
    }

    pub fn with_rule(name: impl Into<String>, label: impl Into<String>, rule: EncodingRule) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: FieldKind::Categorical { rule },
        }
    }

    /// Inclusive bounds; also moves the default to `min` when it falls outside.
    pub fn range(mut self, lo: f64, hi: f64) -> Self {
        if let FieldKind::Numeric {
            min, max, default, ..
        } = &mut self.kind
        {
            *min = Some(lo);
            *max = Some(hi);
            if *default < lo || *default > hi {
                *default = lo;
            }
        }
        self
    }

    pub fn at_least(mut self, lo: f64) -> Self {
        if let FieldKind::Numeric { min, default, .. } = &mut self.kind {
            *min = Some(lo);
            if *default < lo {
                *default = lo;
            }
        }
        self
    }

    /// Restrict the field to whole numbers, as a stepper control would
    pub fn integer(mut self) -> Self {
        if let FieldKind::Numeric { integer, .. } = &mut self.kind {
            *integer = true;
        }
        self
    }

    pub fn default_value(mut self, value: f64) -> Self {
        if let FieldKind::Numeric { default, .. } = &mut self.kind {
            *default = value;
        }
        self
    }

    pub fn is_categorical(&self) -> bool {
        matches!(self.kind, FieldKind::Categorical { .. })
    }

    pub fn rule(&self) -> Option<&EncodingRule> {
        match &self.kind {
            FieldKind::Categorical { rule } => Some(rule),
            FieldKind::Numeric { .. } => None,
        }
    }

    /// Value the control shows before the user touches it
    pub fn default_field_value(&self) -> Option<FieldValue> {
        match &self.kind {
            FieldKind::Numeric { default, .. } => Some(FieldValue::Number(*default)),
            FieldKind::Categorical { rule } => {
                rule.first_label().map(|l| FieldValue::Label(l.to_string()))
            }
        }
    }
}

/// A resolved value as read from a control at submission time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Label(String),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(x) => Some(*x),
            FieldValue::Label(_) => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            FieldValue::Label(s) => Some(s),
            FieldValue::Number(_) => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(x: f64) -> Self {
        FieldValue::Number(x)
    }
}

impl From<i32> for FieldValue {
    fn from(x: i32) -> Self {
        FieldValue::Number(f64::from(x))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Label(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Label(s)
    }
}
