//! Mapping of oracle output onto status messages

use serde::{Deserialize, Serialize};

use crate::outcome::{Severity, Verdict};

/// Message shown for one discrete class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassLabel {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelText {
    pub message: String,
    #[serde(default)]
    pub severity: Severity,
}

/// Deployment-specific rendering of a prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultFormat {
    /// Class code lookup; `otherwise` covers every unlisted output
    Discrete {
        classes: Vec<ClassLabel>,
        otherwise: LabelText,
    },
    /// Continuous value with two decimals and thousands separators
    Amount {
        prefix: String,
        suffix: String,
        #[serde(default)]
        severity: Severity,
    },
}

impl ResultFormat {
    pub fn render(&self, prediction: f64) -> Verdict {
        match self {
            ResultFormat::Discrete { classes, otherwise } => {
                let matched = classes.iter().find(|c| c.code as f64 == prediction);
                match matched {
                    Some(c) => Verdict::from_model(c.severity, c.message.clone(), prediction),
                    None => {
                        Verdict::from_model(otherwise.severity, otherwise.message.clone(), prediction)
                    }
                }
            }
            ResultFormat::Amount {
                prefix,
                suffix,
                severity,
            } => Verdict::from_model(
                *severity,
                format!("{prefix}{}{suffix}", group_thousands(prediction)),
                prediction,
            ),
        }
    }
}

/// `1234567.891` -> `"1,234,567.89"`
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}
