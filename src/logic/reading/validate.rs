use thiserror::Error;

use super::types::{BiometricReading, FieldBounds, NUMERIC_FIELDS};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} = {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },
}

/// Check every numeric field against its declared bounds.
///
/// Never repairs the reading; the first violation in form order is returned.
pub fn validate(reading: &BiometricReading) -> Result<(), ValidationError> {
    for field in &NUMERIC_FIELDS {
        check_field(field, reading.numeric(field))?;
    }
    Ok(())
}

fn check_field(field: &FieldBounds, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field: field.name() });
    }
    if !field.contains(value) {
        return Err(ValidationError::OutOfRange {
            field: field.name(),
            value,
            min: field.min,
            max: field.max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::reading::types::ActivityLevel;

    #[test]
    fn test_default_reading_is_valid() {
        assert!(validate(&BiometricReading::default()).is_ok());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let low = BiometricReading {
            heart_rate: 30,
            spo2: 80.0,
            step_count: 0,
            sleep_hours: 0.0,
            stress_level: 1,
            activity_level: ActivityLevel::Active,
        };
        let high = BiometricReading {
            heart_rate: 200,
            spo2: 100.0,
            step_count: 50_000,
            sleep_hours: 15.0,
            stress_level: 10,
            activity_level: ActivityLevel::HighlyActive,
        };
        assert!(validate(&low).is_ok());
        assert!(validate(&high).is_ok());
    }

    #[test]
    fn test_rejects_low_heart_rate() {
        let reading = BiometricReading { heart_rate: 20, ..Default::default() };
        let err = validate(&reading).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange { field: "heart_rate", value: 20.0, min: 30.0, max: 200.0 }
        );
    }

    #[test]
    fn test_rejects_nan_spo2() {
        let reading = BiometricReading { spo2: f64::NAN, ..Default::default() };
        assert_eq!(validate(&reading).unwrap_err(), ValidationError::NotFinite { field: "spo2" });
    }

    #[test]
    fn test_rejects_stress_zero() {
        let reading = BiometricReading { stress_level: 0, ..Default::default() };
        assert!(matches!(
            validate(&reading),
            Err(ValidationError::OutOfRange { field: "stress_level", .. })
        ));
    }
}
