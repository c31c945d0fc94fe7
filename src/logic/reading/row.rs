//! Feature Row Adapter
//!
//! Converts a typed `BiometricReading` into the one-row, six-column record
//! the classifier consumes. Categorical columns are passed through as their
//! trained label; encoding is the classifier's job.

use serde::{Deserialize, Serialize};

use super::layout::{FEATURE_COUNT, FEATURE_LAYOUT};
use super::types::BiometricReading;

/// One cell of the feature row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Number(f64),
    Category(String),
}

impl FeatureValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(v) => Some(*v),
            FeatureValue::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            FeatureValue::Category(c) => Some(c),
            FeatureValue::Number(_) => None,
        }
    }
}

impl std::fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureValue::Number(v) => write!(f, "{}", v),
            FeatureValue::Category(c) => write!(f, "{}", c),
        }
    }
}

/// Feature row in `FEATURE_LAYOUT` order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub values: Vec<FeatureValue>,
}

impl FeatureRow {
    pub fn get(&self, index: usize) -> Option<&FeatureValue> {
        self.values.get(index)
    }

    /// (column name, value) pairs, for echoing the input back
    pub fn named(&self) -> impl Iterator<Item = (&'static str, &FeatureValue)> {
        FEATURE_LAYOUT.iter().copied().zip(self.values.iter())
    }
}

impl From<&BiometricReading> for FeatureRow {
    fn from(reading: &BiometricReading) -> Self {
        let values = vec![
            FeatureValue::Number(reading.heart_rate as f64),
            FeatureValue::Number(reading.spo2),
            FeatureValue::Number(reading.step_count as f64),
            FeatureValue::Number(reading.sleep_hours),
            FeatureValue::Number(reading.stress_level as f64),
            FeatureValue::Category(reading.activity_level.as_str().to_string()),
        ];
        debug_assert_eq!(values.len(), FEATURE_COUNT);
        Self { values }
    }
}
