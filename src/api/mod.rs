//! API Module - operator-facing surface
//!
//! - `cli` - argument definitions
//! - `commands` - form / evaluate / model-info handlers
//! - `render` - text and JSON presentation

pub mod cli;
pub mod commands;
pub mod render;
