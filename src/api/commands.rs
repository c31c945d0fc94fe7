//! Command handlers - collector -> evaluator -> renderer

use std::io::{self, BufRead, Read, Write};
use std::path::Path;

use anyhow::Context;

use super::cli::EvaluateArgs;
use super::render;
use crate::logic::collector::{self, FormState};
use crate::logic::model::LoadedModel;
use crate::logic::reading::BiometricReading;
use crate::logic::risk::evaluate;

/// Interactive session: form rounds until the operator quits.
///
/// A failed evaluation is shown and dropped; the form stays open.
pub fn run_form<R: BufRead, W: Write>(model: &LoadedModel, input: &mut R, output: &mut W) -> io::Result<()> {
    render::render_header(output)?;

    let mut state = FormState::new();
    while let Some(reading) = collector::collect(&mut state, input, output)? {
        writeln!(output)?;
        match evaluate(&reading, &model.classifier) {
            Ok(assessment) => render::render_assessment(output, &reading, &assessment)?,
            Err(e) => {
                log::warn!("Evaluation dropped: {}", e);
                render::render_error(output, &e)?;
            }
        }
        writeln!(output)?;
    }

    render::render_footer(output)
}

/// One-shot evaluation from flags or a JSON reading
pub fn run_evaluate<W: Write>(model: &LoadedModel, args: &EvaluateArgs, output: &mut W) -> anyhow::Result<()> {
    let reading = match &args.input {
        Some(path) => read_reading(path)?,
        None => args.reading(),
    };

    let assessment = evaluate(&reading, &model.classifier)?;

    if args.json {
        render::render_json(output, &reading, &assessment)?;
    } else {
        render::render_assessment(output, &reading, &assessment)?;
    }
    Ok(())
}

/// Loaded model metadata as JSON
pub fn run_model_info<W: Write>(model: &LoadedModel, output: &mut W) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *output, &model.metadata)?;
    writeln!(output)?;
    Ok(())
}

/// Parse a `BiometricReading` JSON document; "-" reads stdin
pub fn read_reading(path: &Path) -> anyhow::Result<BiometricReading> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("failed to read reading from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };

    serde_json::from_str(&text).with_context(|| format!("invalid reading JSON in {}", path.display()))
}
