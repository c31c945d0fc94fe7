//! Process-wide Classifier
//!
//! The artifact is loaded at most once per process and never mutated
//! afterwards. Evaluations read it concurrently through `get()`.

use std::path::Path;

use once_cell::sync::OnceCell;

use super::artifact::{load_classifier, LoadedModel, ModelMetadata};
use super::LoadError;

static CLASSIFIER: OnceCell<LoadedModel> = OnceCell::new();

/// Load the artifact unless a classifier is already installed.
///
/// A second call returns the first model and ignores its arguments.
pub fn init(path: &Path, expected_sha256: Option<&str>) -> Result<&'static LoadedModel, LoadError> {
    if let Some(model) = CLASSIFIER.get() {
        log::debug!("Classifier already initialized ({})", model.metadata.model_path);
        return Ok(model);
    }
    CLASSIFIER.get_or_try_init(|| load_classifier(path, expected_sha256))
}

/// Read-only accessor; `None` before `init`
pub fn get() -> Option<&'static LoadedModel> {
    CLASSIFIER.get()
}

pub fn is_loaded() -> bool {
    CLASSIFIER.get().is_some()
}

pub fn metadata() -> Option<&'static ModelMetadata> {
    CLASSIFIER.get().map(|m| &m.metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/models/rf_watch_model.json");

    // Single test: the cell is shared by every test in this binary
    #[test]
    fn test_init_once() {
        let first = init(Path::new(BUNDLED), None).unwrap();
        assert!(is_loaded());
        assert!(get().is_some());

        // Bogus path is ignored once loaded
        let second = init(Path::new("/nonexistent/model.json"), None).unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(metadata().map(|m| m.sha256.clone()), Some(first.metadata.sha256.clone()));
    }
}
