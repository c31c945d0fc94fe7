//! Biometric Reading Types
//!
//! Core types for one smartwatch reading.
//! No logic here - only data structures and their declared bounds.

use serde::{Deserialize, Serialize};

// ============================================================================
// FIELD BOUNDS
// ============================================================================

/// Numeric fields of a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    HeartRate,
    Spo2,
    StepCount,
    SleepHours,
    StressLevel,
}

impl NumericField {
    /// Serialized field name
    pub fn as_str(&self) -> &'static str {
        match self {
            NumericField::HeartRate => "heart_rate",
            NumericField::Spo2 => "spo2",
            NumericField::StepCount => "step_count",
            NumericField::SleepHours => "sleep_hours",
            NumericField::StressLevel => "stress_level",
        }
    }
}

/// Declared [min, max] range and default of a numeric form field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub field: NumericField,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    /// Integer-valued field (no fractional input)
    pub integer: bool,
}

impl FieldBounds {
    pub fn name(&self) -> &'static str {
        self.field.as_str()
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

pub const HEART_RATE: FieldBounds = FieldBounds {
    field: NumericField::HeartRate,
    label: "Heart rate (BPM)",
    min: 30.0,
    max: 200.0,
    default: 80.0,
    integer: true,
};

pub const SPO2: FieldBounds = FieldBounds {
    field: NumericField::Spo2,
    label: "Blood oxygen SpO2 (%)",
    min: 80.0,
    max: 100.0,
    default: 97.0,
    integer: false,
};

pub const STEP_COUNT: FieldBounds = FieldBounds {
    field: NumericField::StepCount,
    label: "Step count",
    min: 0.0,
    max: 50_000.0,
    default: 5000.0,
    integer: true,
};

pub const SLEEP_HOURS: FieldBounds = FieldBounds {
    field: NumericField::SleepHours,
    label: "Sleep duration (hours)",
    min: 0.0,
    max: 15.0,
    default: 7.0,
    integer: false,
};

pub const STRESS_LEVEL: FieldBounds = FieldBounds {
    field: NumericField::StressLevel,
    label: "Stress level (1-10)",
    min: 1.0,
    max: 10.0,
    default: 3.0,
    integer: true,
};

/// Numeric fields in form order
pub const NUMERIC_FIELDS: [FieldBounds; 5] = [HEART_RATE, SPO2, STEP_COUNT, SLEEP_HOURS, STRESS_LEVEL];

// ============================================================================
// ACTIVITY LEVEL
// ============================================================================

/// Self-reported activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Active,
    #[serde(rename = "Highly Active", alias = "HighlyActive")]
    HighlyActive,
}

impl ActivityLevel {
    /// Menu order of the form's select box
    pub const ALL: [ActivityLevel; 3] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Active,
        ActivityLevel::HighlyActive,
    ];

    /// Category label as the classifier was trained on it
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::Active => "Active",
            ActivityLevel::HighlyActive => "Highly Active",
        }
    }

    /// Lenient parse: "Highly Active", "HighlyActive", "highly_active"
    pub fn parse(input: &str) -> Option<Self> {
        let key: String = input
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "active" => Some(ActivityLevel::Active),
            "highlyactive" => Some(ActivityLevel::HighlyActive),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!("unknown activity level '{}' (expected Sedentary, Active or Highly Active)", s)
        })
    }
}

// ============================================================================
// BIOMETRIC READING
// ============================================================================

/// One set of smartwatch readings, created fresh per evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiometricReading {
    /// Beats per minute
    pub heart_rate: u32,
    /// Blood oxygen saturation (%)
    pub spo2: f64,
    pub step_count: u32,
    pub sleep_hours: f64,
    /// 1 (calm) - 10 (very stressed)
    pub stress_level: u32,
    pub activity_level: ActivityLevel,
}

impl Default for BiometricReading {
    fn default() -> Self {
        Self {
            heart_rate: HEART_RATE.default as u32,
            spo2: SPO2.default,
            step_count: STEP_COUNT.default as u32,
            sleep_hours: SLEEP_HOURS.default,
            stress_level: STRESS_LEVEL.default as u32,
            activity_level: ActivityLevel::default(),
        }
    }
}

impl BiometricReading {
    /// Numeric value of a field by its bounds descriptor
    pub fn numeric(&self, field: &FieldBounds) -> f64 {
        match field.field {
            NumericField::HeartRate => self.heart_rate as f64,
            NumericField::Spo2 => self.spo2,
            NumericField::StepCount => self.step_count as f64,
            NumericField::SleepHours => self.sleep_hours,
            NumericField::StressLevel => self.stress_level as f64,
        }
    }

    /// Set a numeric field; integer fields are rounded
    pub fn set_numeric(&mut self, field: &FieldBounds, value: f64) {
        match field.field {
            NumericField::HeartRate => self.heart_rate = round_count(value),
            NumericField::Spo2 => self.spo2 = value,
            NumericField::StepCount => self.step_count = round_count(value),
            NumericField::SleepHours => self.sleep_hours = value,
            NumericField::StressLevel => self.stress_level = round_count(value),
        }
    }
}

fn round_count(value: f64) -> u32 {
    value.round().max(0.0) as u32
}
