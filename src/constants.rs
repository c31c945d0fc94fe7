//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the default classifier artifact, only edit this file.

/// Default classifier artifact, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "models/rf_watch_model.json";

/// Env var overriding the artifact path
pub const MODEL_PATH_ENV: &str = "WATCH_RISK_MODEL_PATH";

/// Env var pinning the artifact SHA-256 (hex)
pub const MODEL_SHA256_ENV: &str = "WATCH_RISK_MODEL_SHA256";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "watch-risk";

/// Page title shown above the form
pub const APP_TITLE: &str = "Smartwatch Health Risk Prediction";

/// Footer caption
pub const APP_CAPTION: &str = "Smart Health AI Team | Random Forest based hypoxia risk prediction";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get artifact path from environment or use default
pub fn get_model_path() -> String {
    std::env::var(MODEL_PATH_ENV)
        .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}

/// Get the expected artifact checksum, if one is pinned
pub fn get_model_sha256() -> Option<String> {
    std::env::var(MODEL_SHA256_ENV)
        .ok()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}
