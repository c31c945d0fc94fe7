//! ONNX Classifier - ONNX Runtime Integration
//!
//! Runs an exported classifier graph. Input is one `f32` row of the six
//! layout columns with the activity level ordinal-encoded (sorted labels,
//! same as the forest export).
//!
//! The graph must be exported with `zipmap=False` (skl2onnx
//! `options={"zipmap": False}`) so `output_probability` is a `[1, 2]` float
//! tensor rather than a sequence of maps. Column 1 is the at-risk class.

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::{Classifier, InferenceError, LoadError};
use crate::logic::reading::layout::{ACTIVITY_INDEX, FEATURE_COUNT, FEATURE_LAYOUT};
use crate::logic::reading::FeatureRow;

/// Probability output name in skl2onnx classifier exports
const PROBABILITY_OUTPUT: &str = "output_probability";

/// Activity labels in encoding order
const ACTIVITY_CODES: [&str; 3] = ["Active", "Highly Active", "Sedentary"];

pub struct OnnxClassifier {
    // `Session::run` needs `&mut`
    session: Mutex<Session>,
    output_name: String,
}

impl OnnxClassifier {
    pub fn from_bytes(model_bytes: &[u8]) -> Result<Self, LoadError> {
        log::info!("Loading ONNX model from memory ({} bytes)", model_bytes.len());

        let session = Session::builder()
            .map_err(|e| LoadError::Runtime(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| LoadError::Runtime(format!("Failed to set optimization: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| LoadError::Runtime(format!("Failed to load model: {}", e)))?;

        let output_name = session
            .outputs
            .iter()
            .find(|o| o.name == PROBABILITY_OUTPUT)
            .or_else(|| session.outputs.last())
            .map(|o| o.name.clone())
            .ok_or_else(|| LoadError::Invalid("ONNX model defines no outputs".to_string()))?;

        Ok(Self {
            session: Mutex::new(session),
            output_name,
        })
    }

    fn encode(row: &FeatureRow) -> Result<Vec<f32>, InferenceError> {
        let mut data = Vec::with_capacity(FEATURE_COUNT);
        for i in 0..FEATURE_COUNT {
            let value = row.get(i).ok_or(InferenceError::MissingFeature { index: i })?;
            let encoded = if i == ACTIVITY_INDEX {
                let label = value.as_category().unwrap_or_default();
                ACTIVITY_CODES
                    .iter()
                    .position(|c| *c == label)
                    .ok_or_else(|| InferenceError::UnknownCategory {
                        feature: FEATURE_LAYOUT[i].to_string(),
                        value: value.to_string(),
                    })? as f32
            } else {
                value.as_number().ok_or_else(|| InferenceError::NotNumeric {
                    feature: FEATURE_LAYOUT[i].to_string(),
                })? as f32
            };
            data.push(encoded);
        }
        Ok(data)
    }
}

impl Classifier for OnnxClassifier {
    fn predict_probability(&self, row: &FeatureRow) -> Result<f64, InferenceError> {
        let data = Self::encode(row)?;

        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), data)
            .map_err(|e| InferenceError::Backend(format!("Array error: {}", e)))?;
        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError::Backend(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError::Backend(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| InferenceError::Backend("No output".to_string()))?;
        let (_, probabilities) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::Backend(format!("Extract error: {}", e)))?;

        probabilities
            .get(1)
            .map(|p| *p as f64)
            .ok_or_else(|| InferenceError::Backend(format!("expected 2 probabilities, got {}", probabilities.len())))
    }

    fn name(&self) -> &str {
        "onnx"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::reading::BiometricReading;

    #[test]
    fn test_output_name_matches_skl2onnx() {
        assert_eq!(PROBABILITY_OUTPUT, "output_probability");
    }

    #[test]
    fn test_encode_row() {
        let reading = BiometricReading::default();
        let data = OnnxClassifier::encode(&FeatureRow::from(&reading)).unwrap();
        assert_eq!(data, vec![80.0, 97.0, 5000.0, 7.0, 3.0, 2.0]);
    }
}
