//! Logic Module - Business Logic & Engines
//!
//! - `reading/` - biometric input model, validation, feature row
//! - `model/` - classifier backends, artifact loading, process-wide instance
//! - `risk/` - risk evaluator
//! - `collector` - interactive input form

pub mod collector;
pub mod config;
pub mod model;
pub mod reading;
pub mod risk;
