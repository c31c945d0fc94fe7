//! Model Module - Classifier Inference
//!
//! The evaluator only sees the `Classifier` trait. Backends:
//! - `forest` - native random forest from a JSON artifact (default)
//! - `onnx` - ONNX Runtime session (`onnx` feature)
//!
//! `artifact` loads a backend from disk once; `registry` keeps it for the
//! rest of the process.

pub mod artifact;
pub mod forest;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod registry;

use std::path::PathBuf;

use thiserror::Error;

use crate::logic::reading::layout::LayoutMismatchError;
use crate::logic::reading::FeatureRow;

// Re-export common types
pub use artifact::{load_classifier, LoadedModel, ModelBackend, ModelMetadata};
pub use forest::ForestClassifier;

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// A previously fitted binary probability model
pub trait Classifier: Send + Sync {
    /// Probability of the "at-risk" class (class 1) for one feature row
    fn predict_probability(&self, row: &FeatureRow) -> Result<f64, InferenceError>;

    /// Backend name for logs/metadata
    fn name(&self) -> &str;
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn predict_probability(&self, row: &FeatureRow) -> Result<f64, InferenceError> {
        (**self).predict_probability(row)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Classifier call failed for a given row
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("feature row is missing column {index}")]
    MissingFeature { index: usize },

    #[error("column '{feature}' expects a number")]
    NotNumeric { feature: String },

    #[error("column '{feature}' has category '{value}' the classifier was not trained on")]
    UnknownCategory { feature: String, value: String },

    #[error("tree {tree} reached a leaf without class weights (node {node})")]
    EmptyLeaf { tree: usize, node: usize },

    #[error("classifier returned an invalid probability: {0}")]
    InvalidProbability(f64),

    #[error("classifier backend error: {0}")]
    Backend(String),
}

/// Classifier artifact could not be located or deserialized
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("model not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read model {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("model checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error(transparent)]
    LayoutMismatch(#[from] LayoutMismatchError),

    #[error("invalid model: {0}")]
    Invalid(String),

    #[error("unsupported model format: {0}")]
    Unsupported(String),

    #[error("ONNX runtime error: {0}")]
    Runtime(String),
}
