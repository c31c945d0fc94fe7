//! Model Artifact Loading
//!
//! Locate the classifier artifact, verify its checksum, deserialize it and
//! hand back a ready `LoadedModel`. Every failure here is a `LoadError`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::forest::{ForestArtifact, ForestClassifier};
use super::{Classifier, LoadError};
use crate::logic::reading::layout::LayoutInfo;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Artifact backend, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelBackend {
    /// JSON random forest
    Forest,
    /// ONNX graph (`onnx` feature)
    Onnx,
}

impl ModelBackend {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("onnx") => ModelBackend::Onnx,
            _ => ModelBackend::Forest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelBackend::Forest => "forest-json",
            ModelBackend::Onnx => "onnx",
        }
    }
}

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub model_type: String,
    pub backend: ModelBackend,
    /// Number of trees (0 when the backend doesn't expose it)
    pub n_estimators: usize,
    pub sha256: String,
    pub size_bytes: usize,
    /// Feature layout the classifier was checked against
    pub layout: LayoutInfo,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// A loaded, immutable classifier with its metadata
pub struct LoadedModel {
    pub metadata: ModelMetadata,
    pub classifier: Box<dyn Classifier>,
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("metadata", &self.metadata)
            .field("classifier", &self.classifier.name())
            .finish()
    }
}

// ============================================================================
// CHECKSUM
// ============================================================================

/// SHA-256 of the artifact bytes, lowercase hex
pub fn compute_sha256(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Compare against a pinned checksum (case-insensitive)
pub fn verify_checksum(bytes: &[u8], expected: &str) -> Result<String, LoadError> {
    let actual = compute_sha256(bytes);
    let expected = expected.trim().to_lowercase();
    if actual != expected {
        return Err(LoadError::ChecksumMismatch { expected, actual });
    }
    Ok(actual)
}

// ============================================================================
// LOADING
// ============================================================================

/// Load a classifier artifact from disk
pub fn load_classifier(path: &Path, expected_sha256: Option<&str>) -> Result<LoadedModel, LoadError> {
    log::info!("Loading classifier from: {}", path.display());

    if !path.exists() {
        return Err(LoadError::NotFound { path: path.to_path_buf() });
    }

    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let sha256 = match expected_sha256 {
        Some(expected) => verify_checksum(&bytes, expected)?,
        None => compute_sha256(&bytes),
    };

    let backend = ModelBackend::from_path(path);
    let model = load_from_bytes(&bytes, backend, path, sha256)?;

    log::info!(
        "Classifier loaded: {} via {} ({} trees, layout v{} {:08x}, sha256 {})",
        model.metadata.model_type,
        model.metadata.backend.as_str(),
        model.metadata.n_estimators,
        model.metadata.layout.version,
        model.metadata.layout.hash,
        &model.metadata.sha256[..12]
    );

    Ok(model)
}

/// Build a classifier from artifact bytes already in memory
pub fn load_from_bytes(
    bytes: &[u8],
    backend: ModelBackend,
    path: &Path,
    sha256: String,
) -> Result<LoadedModel, LoadError> {
    let model_path = path.display().to_string();

    match backend {
        ModelBackend::Forest => {
            let artifact: ForestArtifact = serde_json::from_slice(bytes).map_err(|source| LoadError::Corrupt {
                path: PathBuf::from(path),
                source,
            })?;
            let forest = ForestClassifier::from_artifact(artifact)?;

            let metadata = ModelMetadata {
                model_path,
                model_type: forest.model_type().to_string(),
                backend,
                n_estimators: forest.n_estimators(),
                sha256,
                size_bytes: bytes.len(),
                layout: LayoutInfo::current(),
                loaded_at: chrono::Utc::now(),
            };

            Ok(LoadedModel {
                metadata,
                classifier: Box::new(forest),
            })
        }
        ModelBackend::Onnx => load_onnx(bytes, model_path, sha256),
    }
}

#[cfg(feature = "onnx")]
fn load_onnx(bytes: &[u8], model_path: String, sha256: String) -> Result<LoadedModel, LoadError> {
    let classifier = super::onnx::OnnxClassifier::from_bytes(bytes)?;

    let metadata = ModelMetadata {
        model_path,
        model_type: "onnx".to_string(),
        backend: ModelBackend::Onnx,
        n_estimators: 0,
        sha256,
        size_bytes: bytes.len(),
        layout: LayoutInfo::current(),
        loaded_at: chrono::Utc::now(),
    };

    Ok(LoadedModel {
        metadata,
        classifier: Box::new(classifier),
    })
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(_bytes: &[u8], model_path: String, _sha256: String) -> Result<LoadedModel, LoadError> {
    Err(LoadError::Unsupported(format!(
        "{} is an ONNX model; rebuild with the `onnx` feature",
        model_path
    )))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::reading::{BiometricReading, FeatureRow};
    use std::io::Write;

    const BUNDLED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/models/rf_watch_model.json");

    fn write_temp(contents: &[u8], suffix: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_bundled_model_loads() {
        let model = load_classifier(Path::new(BUNDLED), None).unwrap();
        assert_eq!(model.metadata.backend, ModelBackend::Forest);
        assert!(model.metadata.n_estimators > 0);
        assert_eq!(model.metadata.sha256.len(), 64);
        assert_eq!(model.metadata.layout.hash, crate::logic::reading::layout::layout_hash());

        let p = model
            .classifier
            .predict_probability(&FeatureRow::from(&BiometricReading::default()))
            .unwrap();
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rf_watch_model.json");
        let err = load_classifier(&path, None).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[test]
    fn test_corrupt_json() {
        let file = write_temp(b"{ not json", ".json");
        let err = load_classifier(file.path(), None).unwrap_err();
        assert!(matches!(err, LoadError::Corrupt { .. }));
    }

    #[test]
    fn test_checksum_pinning() {
        let bytes = std::fs::read(BUNDLED).unwrap();
        let good = compute_sha256(&bytes);

        assert!(load_classifier(Path::new(BUNDLED), Some(&good.to_uppercase())).is_ok());

        let bad = "0".repeat(64);
        let err = load_classifier(Path::new(BUNDLED), Some(&bad)).unwrap_err();
        match err {
            LoadError::ChecksumMismatch { expected, actual } => {
                assert_eq!(expected, bad);
                assert_eq!(actual, good);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_layout_mismatch_on_disk() {
        let json = r#"{
            "format_version": 1,
            "feature_names": ["a", "b", "c", "d", "e", "f"],
            "classes": [0, 1],
            "trees": [{"nodes": [{"value": [1.0, 1.0]}]}]
        }"#;
        let file = write_temp(json.as_bytes(), ".json");
        let err = load_classifier(file.path(), None).unwrap_err();
        assert!(matches!(err, LoadError::LayoutMismatch(_)));
    }

    #[test]
    fn test_backend_from_extension() {
        assert_eq!(ModelBackend::from_path(Path::new("m.onnx")), ModelBackend::Onnx);
        assert_eq!(ModelBackend::from_path(Path::new("m.ONNX")), ModelBackend::Onnx);
        assert_eq!(ModelBackend::from_path(Path::new("m.json")), ModelBackend::Forest);
        assert_eq!(ModelBackend::from_path(Path::new("model")), ModelBackend::Forest);
    }

    #[cfg(not(feature = "onnx"))]
    #[test]
    fn test_onnx_without_feature_is_unsupported() {
        let file = write_temp(b"\x08\x01", ".onnx");
        let err = load_classifier(file.path(), None).unwrap_err();
        assert!(matches!(err, LoadError::Unsupported(_)));
    }
}
