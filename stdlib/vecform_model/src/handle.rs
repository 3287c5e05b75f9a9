//! Process-lifetime, read-only artifact handles
//!
//! An artifact is loaded at most once per cell; every later access shares the
//! same `Arc`. There is no reload and no mutation after initialisation.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use crate::artifact::load_model;
use crate::backend::{ModelBackend, PredictError};
use crate::encoder::OneHotEncoder;

/// Lazily initialised immutable handle to a shared artifact
pub struct ArtifactCell<T: ?Sized> {
    cell: OnceLock<Arc<T>>,
}

pub type ModelCell = ArtifactCell<dyn ModelBackend>;
pub type EncoderCell = ArtifactCell<OneHotEncoder>;

impl<T: ?Sized> ArtifactCell<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    pub fn get(&self) -> Option<Arc<T>> {
        self.cell.get().cloned()
    }

    /// Return the shared value, running `init` only if the cell is still empty
    pub fn get_or_try_init<E>(
        &self,
        init: impl FnOnce() -> Result<Arc<T>, E>,
    ) -> Result<Arc<T>, E> {
        if let Some(value) = self.cell.get() {
            return Ok(Arc::clone(value));
        }
        let value = init()?;
        Ok(Arc::clone(self.cell.get_or_init(|| value)))
    }
}

impl<T: ?Sized> Default for ArtifactCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactCell<dyn ModelBackend> {
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<dyn ModelBackend>, PredictError> {
        self.get_or_try_init(|| load_model(path))
    }
}

impl ArtifactCell<OneHotEncoder> {
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<OneHotEncoder>, PredictError> {
        self.get_or_try_init(|| OneHotEncoder::load(path).map(Arc::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::LinearRegressor;

    #[test]
    fn initialises_once() {
        let cell = ModelCell::new();
        assert!(cell.get().is_none());

        let first = cell
            .get_or_try_init(|| -> Result<Arc<dyn ModelBackend>, PredictError> {
                Ok(Arc::new(LinearRegressor::new(vec![1.0], 0.0)))
            })
            .unwrap();
        let second = cell
            .get_or_try_init(|| -> Result<Arc<dyn ModelBackend>, PredictError> {
                panic!("cell already initialised")
            })
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn failed_init_leaves_cell_empty() {
        let cell = EncoderCell::new();
        let result = cell.get_or_try_init(|| Err(PredictError::Load("missing".into())));
        assert!(result.is_err());
        assert!(cell.get().is_none());
    }
}
