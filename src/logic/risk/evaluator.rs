//! Risk Evaluator
//!
//! Only the decision logic - no I/O, no state.
//! Input: BiometricReading + Classifier
//! Output: RiskAssessment

use thiserror::Error;

use super::rules;
use super::types::{RiskAssessment, RiskFlag};
use crate::logic::model::{Classifier, InferenceError};
use crate::logic::reading::{validate, BiometricReading, FeatureRow, ValidationError};

/// Why an evaluation request produced no assessment
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("invalid reading: {0}")]
    Validation(#[from] ValidationError),

    #[error("prediction failed: {0}")]
    Inference(#[from] InferenceError),
}

// ============================================================================
// MAIN EVALUATION FUNCTION
// ============================================================================

/// Evaluate one reading.
///
/// Out-of-range readings are rejected, never clamped. No partial result is
/// returned on failure.
pub fn evaluate<C>(reading: &BiometricReading, classifier: &C) -> Result<RiskAssessment, EvaluationError>
where
    C: Classifier + ?Sized,
{
    validate(reading)?;

    let row = FeatureRow::from(reading);
    let probability = classifier.predict_probability(&row)?;
    if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
        return Err(InferenceError::InvalidProbability(probability).into());
    }

    let model_flag = rules::model_flag(probability);
    let spo2_flag = rules::spo2_flag(reading.spo2);
    let heart_rate_flag = rules::heart_rate_flag(reading.heart_rate);

    let reasons: Vec<RiskFlag> = RiskFlag::ORDER
        .into_iter()
        .zip([model_flag, spo2_flag, heart_rate_flag])
        .filter_map(|(flag, on)| on.then_some(flag))
        .collect();

    let assessment = RiskAssessment {
        probability,
        model_flag,
        spo2_flag,
        heart_rate_flag,
        alert: model_flag || spo2_flag || heart_rate_flag,
        reasons,
    };

    log::debug!(
        "Evaluated via {}: p={:.3} alert={} reasons={:?}",
        classifier.name(),
        assessment.probability,
        assessment.alert,
        assessment.reason_codes()
    );

    Ok(assessment)
}
