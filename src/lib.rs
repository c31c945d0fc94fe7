//! watch-risk - Smartwatch health risk prediction
//!
//! Six biometric readings -> trained classifier -> risk verdict combined
//! with the SpO2 and heart-rate danger rules.

pub mod api;
pub mod constants;
pub mod logic;
