//! Fitted one-hot encoder for categorical columns
//!
//! Each column owns the list of categories seen during fitting. A row is
//! encoded column by column into a block of indicator values, one per known
//! category, and the blocks are concatenated in column order.

use std::fs::read_to_string;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::backend::PredictError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderColumn {
    pub name: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    columns: Vec<EncoderColumn>,
}

impl OneHotEncoder {
    pub fn new(columns: Vec<EncoderColumn>) -> Result<Self, PredictError> {
        let encoder = Self { columns };
        encoder.validate()?;
        Ok(encoder)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PredictError> {
        let path = path.as_ref();
        let text = read_to_string(path).map_err(|source| PredictError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let encoder: Self = serde_json::from_str(&text).map_err(|source| PredictError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        encoder.validate()?;
        info!(
            "loaded one-hot encoder from {} ({} columns, {} outputs)",
            path.display(),
            encoder.columns.len(),
            encoder.width()
        );
        Ok(encoder)
    }

    fn validate(&self) -> Result<(), PredictError> {
        for column in &self.columns {
            if column.categories.is_empty() {
                return Err(PredictError::Load(format!(
                    "encoder column '{}' has no categories",
                    column.name
                )));
            }
            for (i, c) in column.categories.iter().enumerate() {
                if column.categories[..i].contains(c) {
                    return Err(PredictError::Load(format!(
                        "encoder column '{}' lists category '{c}' twice",
                        column.name
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn columns(&self) -> &[EncoderColumn] {
        &self.columns
    }

    /// Total number of indicator values produced per row
    pub fn width(&self) -> usize {
        self.columns.iter().map(|c| c.categories.len()).sum()
    }

    pub fn transform(&self, row: &[&str]) -> Result<Vec<f64>, PredictError> {
        if row.len() != self.columns.len() {
            return Err(PredictError::InvalidInput(format!(
                "encoder expects {} columns, got {}",
                self.columns.len(),
                row.len()
            )));
        }
        let mut out = Vec::with_capacity(self.width());
        for (column, value) in self.columns.iter().zip(row) {
            let hot = column
                .categories
                .iter()
                .position(|c| c == value)
                .ok_or_else(|| {
                    PredictError::InvalidInput(format!(
                        "found unknown category '{value}' in column '{}' during transform",
                        column.name
                    ))
                })?;
            out.extend((0..column.categories.len()).map(|i| if i == hot { 1.0 } else { 0.0 }));
        }
        Ok(out)
    }
}
