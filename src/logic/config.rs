//! Configuration module

use std::path::PathBuf;

use crate::constants;

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Classifier artifact on disk
    pub model_path: PathBuf,

    /// Pinned SHA-256 of the artifact (hex), if any
    pub model_sha256: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(constants::DEFAULT_MODEL_PATH),
            model_sha256: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            model_path: PathBuf::from(constants::get_model_path()),
            model_sha256: constants::get_model_sha256(),
        }
    }

    /// Command-line values win over the environment
    pub fn with_overrides(mut self, model_path: Option<PathBuf>, model_sha256: Option<String>) -> Self {
        if let Some(path) = model_path {
            self.model_path = path;
        }
        if let Some(sha) = model_sha256 {
            self.model_sha256 = Some(sha.trim().to_lowercase());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_bundled_model() {
        let config = AppConfig::default();
        assert_eq!(config.model_path, PathBuf::from("models/rf_watch_model.json"));
        assert_eq!(config.model_sha256, None);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default()
            .with_overrides(Some(PathBuf::from("/opt/risk.onnx")), Some(" ABCD ".to_string()));
        assert_eq!(config.model_path, PathBuf::from("/opt/risk.onnx"));
        assert_eq!(config.model_sha256.as_deref(), Some("abcd"));

        let untouched = AppConfig::default().with_overrides(None, None);
        assert_eq!(untouched, AppConfig::default());
    }
}
