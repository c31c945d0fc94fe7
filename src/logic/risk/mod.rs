//! Risk Module - Risk Evaluator
//!
//! - `rules` - decision constants (0.5, 95.0, 100)
//! - `types` - RiskFlag, RiskAssessment
//! - `evaluator` - evaluate(reading, classifier)

pub mod rules;
pub mod types;
pub mod evaluator;


pub use evaluator::{evaluate, EvaluationError};
pub use types::{RiskAssessment, RiskFlag};
