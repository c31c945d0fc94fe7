//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the feature row schema the classifier sees.**
//!
//! Column names and order must match the ones the classifier was trained
//! with. Any change here means a retrained artifact.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

/// Column names in the exact order of the feature row
pub const FEATURE_LAYOUT: &[&str] = &[
    "Heart Rate (BPM)",       // 0: integer
    "Blood Oxygen Level (%)", // 1: real
    "Step Count",             // 2: integer
    "Sleep Duration (hours)", // 3: real
    "Stress Level",           // 4: integer, 1-10
    "Activity Level",         // 5: categorical
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 6;

/// Index of the single categorical column
pub const ACTIVITY_INDEX: usize = 5;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over an ordered list of column names
pub fn hash_names<S: AsRef<str>>(names: &[S]) -> u32 {
    let mut hasher = Hasher::new();
    for name in names {
        hasher.update(name.as_ref().as_bytes());
        hasher.update(&[0]); // Separator
    }
    hasher.finalize()
}

/// Hash of the current layout
pub fn layout_hash() -> u32 {
    hash_names(FEATURE_LAYOUT)
}

/// Layout information reported with the loaded model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Feature names of an artifact don't match the layout
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("feature layout mismatch: expected hash {expected_hash:08x}, got {actual_hash:08x} ({actual_names:?})")]
pub struct LayoutMismatchError {
    pub expected_hash: u32,
    pub actual_hash: u32,
    pub actual_names: Vec<String>,
}

/// Validate that an artifact's feature names match the current layout
pub fn validate_layout<S: AsRef<str>>(names: &[S]) -> Result<(), LayoutMismatchError> {
    let expected_hash = layout_hash();
    let actual_hash = hash_names(names);

    if names.len() != FEATURE_COUNT || actual_hash != expected_hash {
        return Err(LayoutMismatchError {
            expected_hash,
            actual_hash,
            actual_names: names.iter().map(|n| n.as_ref().to_string()).collect(),
        });
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
        assert_eq!(FEATURE_LAYOUT[ACTIVITY_INDEX], "Activity Level");
    }

    #[test]
    fn test_layout_hash_consistency() {
        assert_eq!(layout_hash(), hash_names(FEATURE_LAYOUT));
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_validate_layout_success() {
        let names: Vec<String> = FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect();
        assert!(validate_layout(&names).is_ok());
    }

    #[test]
    fn test_validate_layout_order_matters() {
        let mut names: Vec<&str> = FEATURE_LAYOUT.to_vec();
        names.swap(0, 1);
        let err = validate_layout(&names).unwrap_err();
        assert_eq!(err.expected_hash, layout_hash());
        assert_ne!(err.actual_hash, err.expected_hash);
    }

    #[test]
    fn test_validate_layout_missing_column() {
        let names = &FEATURE_LAYOUT[..5];
        assert!(validate_layout(names).is_err());
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::current();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.hash, layout_hash());
        assert_eq!(info.feature_names, FEATURE_LAYOUT);
    }
}
