//! Categorical encoding rules
//!
//! A categorical field maps a closed set of display labels onto integer
//! codes. Rules are normally derived from a Rust enum declared with
//! [`categorical!`](crate::categorical), so the mapping is an exhaustive
//! `match` and cannot miss a label. Rules built at runtime go through
//! [`EncodingRule::from_pairs`], which rejects duplicate labels.

use serde::Serialize;

use crate::error::EncodingError;

/// A closed enumeration with a total label/code mapping
pub trait Categorical: Copy + Sized + 'static {
    /// Every variant, in display order. The first one is the form default.
    const VARIANTS: &'static [Self];

    fn label(self) -> &'static str;

    fn code(self) -> i64;

    fn from_label(label: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.label() == label)
    }
}

/// Declare a categorical enum together with its labels and codes.
///
/// ```
/// vecform_core::categorical! {
///     pub enum Transmission {
///         Manual => ("Manual", 0),
///         Automatic => ("Automatic", 1),
///     }
/// }
/// ```
#[macro_export]
macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => ($label:literal, $code:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::Categorical for $name {
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            fn code(self) -> i64 {
                match self {
                    $(Self::$variant => $code),+
                }
            }
        }
    };
}

/// One declared label and its code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCode {
    pub label: String,
    pub code: i64,
}

/// Total mapping from the labels of one categorical field to integer codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodingRule {
    entries: Vec<LabelCode>,
}

impl EncodingRule {
    /// Rule for a declared categorical enum
    pub fn of<T: Categorical>() -> Self {
        Self {
            entries: T::VARIANTS
                .iter()
                .map(|v| LabelCode {
                    label: v.label().to_string(),
                    code: v.code(),
                })
                .collect(),
        }
    }

    /// Rule from explicit `(label, code)` pairs, kept in the given order
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, EncodingError>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut entries: Vec<LabelCode> = Vec::new();
        for (label, code) in pairs {
            let label = label.into();
            if entries.iter().any(|e| e.label == label) {
                return Err(EncodingError::DuplicateLabel { label });
            }
            entries.push(LabelCode { label, code });
        }
        Ok(Self { entries })
    }

    /// Rule assigning dense codes `0..n` in declaration order
    pub fn dense<I, S>(labels: I) -> Result<Self, EncodingError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_pairs(labels.into_iter().zip(0..))
    }

    pub fn code_of(&self, label: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.code)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    pub fn entries(&self) -> &[LabelCode] {
        &self.entries
    }

    /// First declared label, used as the form default
    pub fn first_label(&self) -> Option<&str> {
        self.entries.first().map(|e| e.label.as_str())
    }

    /// Look up `label` for `field`, failing on anything undeclared
    pub fn encode(&self, field: &str, label: &str) -> Result<i64, EncodingError> {
        self.code_of(label)
            .ok_or_else(|| EncodingError::UnknownLabel {
                field: field.to_string(),
                label: label.to_string(),
                allowed: self.labels().map(str::to_string).collect(),
            })
    }
}

categorical! {
    /// Binary yes/no answer
    pub enum YesNo {
        No => ("No", 0),
        Yes => ("Yes", 1),
    }
}

categorical! {
    /// Binary laboratory test result
    pub enum TestResult {
        Positive => ("Positive", 1),
        Negative => ("Negative", 0),
    }
}

categorical! {
    /// Ordered three-step level
    pub enum Level {
        Low => ("Low", 0),
        Moderate => ("Moderate", 1),
        High => ("High", 2),
    }
}
