//! Reading Module - Biometric input model
//!
//! - `types` - BiometricReading, ActivityLevel, field bounds
//! - `validate` - range checks at the evaluation boundary
//! - `layout` - classifier column schema
//! - `row` - typed reading -> feature row

pub mod types;
pub mod validate;
pub mod layout;
pub mod row;

pub use types::{ActivityLevel, BiometricReading, FieldBounds, NumericField};
pub use validate::{validate, ValidationError};
pub use row::{FeatureRow, FeatureValue};
