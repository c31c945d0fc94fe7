//! Presentation - terminal text and JSON output

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::constants::{APP_CAPTION, APP_TITLE, APP_VERSION};
use crate::logic::reading::{BiometricReading, FeatureRow};
use crate::logic::risk::{EvaluationError, RiskAssessment};

/// JSON output of one evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub input: BiometricReading,
    pub assessment: RiskAssessment,
    pub messages: Vec<String>,
}

impl EvaluationReport {
    pub fn new(input: &BiometricReading, assessment: &RiskAssessment) -> Self {
        Self {
            input: *input,
            assessment: assessment.clone(),
            messages: assessment.reason_messages(),
        }
    }
}

pub fn render_header<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "=== {} ===", APP_TITLE)?;
    writeln!(out, "Predicts hypoxia risk from smartwatch biometric data.")?;
    writeln!(out)
}

pub fn render_footer<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "---")?;
    writeln!(out, "v{} | {}", APP_VERSION, APP_CAPTION)
}

/// Probability, verdict banner, reasons and the echoed input
pub fn render_assessment<W: Write>(
    out: &mut W,
    reading: &BiometricReading,
    assessment: &RiskAssessment,
) -> io::Result<()> {
    writeln!(out, "Predicted risk probability: {:.3}", assessment.probability)?;

    if assessment.alert {
        writeln!(out, "[ALERT] Risk signal detected! Attention required.")?;
        writeln!(out, "Risk factors:")?;
        for message in assessment.reason_messages() {
            writeln!(out, "  - {}", message)?;
        }
    } else {
        writeln!(out, "[OK] Current biometric readings are within the normal range.")?;
    }

    render_input(out, reading)
}

/// Input echo table in classifier column order
pub fn render_input<W: Write>(out: &mut W, reading: &BiometricReading) -> io::Result<()> {
    let row = FeatureRow::from(reading);
    let width = row.named().map(|(name, _)| name.len()).max().unwrap_or(0);

    writeln!(out, "Input data:")?;
    for (name, value) in row.named() {
        writeln!(out, "  {:<width$}  {}", name, value, width = width)?;
    }
    Ok(())
}

pub fn render_error<W: Write>(out: &mut W, err: &EvaluationError) -> io::Result<()> {
    writeln!(out, "Evaluation failed: {}", err)
}

pub fn render_json<W: Write>(
    out: &mut W,
    reading: &BiometricReading,
    assessment: &RiskAssessment,
) -> io::Result<()> {
    let report = EvaluationReport::new(reading, assessment);
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}
