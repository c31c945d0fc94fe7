//! Risk Rules & Thresholds
//!
//! Fixed decision constants. No logic here.

// ============================================================================
// MODEL
// ============================================================================

/// Model verdict is "at risk" when probability >= this
pub const MODEL_DECISION_THRESHOLD: f64 = 0.5;

// ============================================================================
// MEDICAL RULES
// ============================================================================

/// SpO2 strictly below this (%) is a danger sign
pub const SPO2_DANGER_BELOW: f64 = 95.0;

/// Heart rate strictly above this (BPM) is a danger sign
pub const HEART_RATE_DANGER_ABOVE: u32 = 100;

pub fn model_flag(probability: f64) -> bool {
    probability >= MODEL_DECISION_THRESHOLD
}

pub fn spo2_flag(spo2: f64) -> bool {
    spo2 < SPO2_DANGER_BELOW
}

pub fn heart_rate_flag(heart_rate: u32) -> bool {
    heart_rate > HEART_RATE_DANGER_ABOVE
}
