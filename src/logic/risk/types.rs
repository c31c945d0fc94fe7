//! Risk Types
//!
//! Output of one evaluation. No logic beyond accessors.

use serde::{Deserialize, Serialize};

use super::rules::{HEART_RATE_DANGER_ABOVE, SPO2_DANGER_BELOW};

/// A triggered rule, in fixed reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    Model,
    Spo2,
    HeartRate,
}

impl RiskFlag {
    pub const ORDER: [RiskFlag; 3] = [RiskFlag::Model, RiskFlag::Spo2, RiskFlag::HeartRate];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFlag::Model => "model",
            RiskFlag::Spo2 => "spo2",
            RiskFlag::HeartRate => "heart_rate",
        }
    }

    /// Operator-facing reason
    pub fn description(&self) -> String {
        match self {
            RiskFlag::Model => "The AI model predicted an at-risk state.".to_string(),
            RiskFlag::Spo2 => format!("Blood oxygen saturation is below {}%.", SPO2_DANGER_BELOW),
            RiskFlag::HeartRate => format!("Heart rate is above {} BPM.", HEART_RATE_DANGER_ABOVE),
        }
    }
}

impl std::fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Classifier probability of the at-risk class, 0.0 - 1.0
    pub probability: f64,
    pub model_flag: bool,
    pub spo2_flag: bool,
    pub heart_rate_flag: bool,
    /// Any flag set
    pub alert: bool,
    /// Triggered flags in `RiskFlag::ORDER`
    pub reasons: Vec<RiskFlag>,
}

impl RiskAssessment {
    pub fn reason_codes(&self) -> Vec<&'static str> {
        self.reasons.iter().map(RiskFlag::as_str).collect()
    }

    pub fn reason_messages(&self) -> Vec<String> {
        self.reasons.iter().map(RiskFlag::description).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_serializes_as_code() {
        let json = serde_json::to_string(&RiskFlag::ORDER).unwrap();
        assert_eq!(json, r#"["model","spo2","heart_rate"]"#);
    }

    #[test]
    fn test_descriptions() {
        assert!(RiskFlag::Spo2.description().contains("95"));
        assert!(RiskFlag::HeartRate.description().contains("100 BPM"));
    }
}
