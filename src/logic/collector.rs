//! Input Collector
//!
//! Interactive bounded form over any line-based input. Each field shows its
//! range and current value; out-of-range numbers are pulled into range the
//! way a bounded widget would, so the reading it returns is always valid.

use std::io::{self, BufRead, Write};

use crate::logic::reading::types::NUMERIC_FIELDS;
use crate::logic::reading::{ActivityLevel, BiometricReading, FieldBounds};

/// Currently edited values; survives between evaluations
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub reading: BiometricReading,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Outcome of parsing one numeric entry
#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Keep,
    Value(f64),
    Invalid(&'static str),
}

fn parse_numeric(field: &FieldBounds, line: &str) -> Entry {
    let text = line.trim();
    if text.is_empty() {
        return Entry::Keep;
    }
    match text.parse::<f64>() {
        Ok(v) if !v.is_finite() => Entry::Invalid("Please enter a finite number."),
        Ok(v) if field.integer && v.fract() != 0.0 => Entry::Invalid("Please enter a whole number."),
        Ok(v) => Entry::Value(v),
        Err(_) => Entry::Invalid("Please enter a number."),
    }
}

fn parse_activity(line: &str) -> Option<ActivityLevel> {
    let text = line.trim();
    if let Ok(n) = text.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| ActivityLevel::ALL.get(i).copied());
    }
    ActivityLevel::parse(text)
}

/// Read one line; `None` on end of input
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Walk the form once and wait for the evaluate trigger.
///
/// Returns `None` when input ends or the operator quits.
pub fn collect<R: BufRead, W: Write>(
    state: &mut FormState,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<BiometricReading>> {
    writeln!(output, "Biometric data input (Enter keeps the current value)")?;

    for field in &NUMERIC_FIELDS {
        let current = state.reading.numeric(field);

        loop {
            write!(output, "{} [{}-{}] ({}): ", field.label, field.min, field.max, current)?;
            output.flush()?;

            let Some(line) = read_line(input)? else {
                return Ok(None);
            };

            match parse_numeric(field, &line) {
                Entry::Keep => break,
                Entry::Value(v) => {
                    let clamped = field.clamp(v);
                    if clamped != v {
                        writeln!(output, "  Adjusted to {} (allowed {}-{}).", clamped, field.min, field.max)?;
                    }
                    state.reading.set_numeric(field, clamped);
                    break;
                }
                Entry::Invalid(msg) => writeln!(output, "  {}", msg)?,
            }
        }
    }

    let menu: Vec<String> = ActivityLevel::ALL
        .iter()
        .enumerate()
        .map(|(i, a)| format!("{}) {}", i + 1, a))
        .collect();
    writeln!(output, "Activity level: {}", menu.join("  "))?;
    loop {
        write!(output, "Activity level ({}): ", state.reading.activity_level)?;
        output.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        if line.trim().is_empty() {
            break;
        }
        match parse_activity(&line) {
            Some(level) => {
                state.reading.activity_level = level;
                break;
            }
            None => writeln!(output, "  Choose 1-{} or type the level name.", ActivityLevel::ALL.len())?,
        }
    }

    write!(output, "Press Enter to evaluate (q to quit): ")?;
    output.flush()?;
    match read_line(input)? {
        None => Ok(None),
        Some(line) if matches!(line.trim().to_lowercase().as_str(), "q" | "quit") => Ok(None),
        Some(_) => Ok(Some(state.reading)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::reading::validate;
    use std::io::Cursor;

    fn run(script: &str, state: &mut FormState) -> (Option<BiometricReading>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let reading = collect(state, &mut input, &mut output).unwrap();
        (reading, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_empty_lines_keep_defaults() {
        let mut state = FormState::new();
        let (reading, _) = run("\n\n\n\n\n\n\n", &mut state);
        assert_eq!(reading, Some(BiometricReading::default()));
    }

    #[test]
    fn test_values_are_applied() {
        let mut state = FormState::new();
        let (reading, _) = run("110\n92.5\n12000\n6.5\n7\n3\n\n", &mut state);
        let reading = reading.unwrap();
        assert_eq!(reading.heart_rate, 110);
        assert_eq!(reading.spo2, 92.5);
        assert_eq!(reading.step_count, 12000);
        assert_eq!(reading.sleep_hours, 6.5);
        assert_eq!(reading.stress_level, 7);
        assert_eq!(reading.activity_level, ActivityLevel::HighlyActive);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let mut state = FormState::new();
        let (reading, out) = run("250\n70\n\n\n0\n\n\n", &mut state);
        let reading = reading.unwrap();
        assert_eq!(reading.heart_rate, 200);
        assert_eq!(reading.spo2, 80.0);
        assert_eq!(reading.stress_level, 1);
        assert!(out.contains("Adjusted to 200"));
        assert!(validate(&reading).is_ok());
    }

    #[test]
    fn test_garbage_reprompts() {
        let mut state = FormState::new();
        let (reading, out) = run("abc\n85.5\n90\n\n\n\n\nlazy\nactive\n\n", &mut state);
        let reading = reading.unwrap();
        assert_eq!(reading.heart_rate, 90);
        assert_eq!(reading.activity_level, ActivityLevel::Active);
        assert!(out.contains("Please enter a number."));
        assert!(out.contains("Please enter a whole number."));
        assert!(out.contains("Choose 1-3"));
    }

    #[test]
    fn test_eof_ends_session() {
        let mut state = FormState::new();
        let (reading, _) = run("90\n", &mut state);
        assert_eq!(reading, None);
    }

    #[test]
    fn test_quit_at_trigger() {
        let mut state = FormState::new();
        let (reading, _) = run("\n\n\n\n\n\nq\n", &mut state);
        assert_eq!(reading, None);
    }

    #[test]
    fn test_state_carries_over_rounds() {
        let mut state = FormState::new();
        let (first, _) = run("120\n\n\n\n\n2\n\n", &mut state);
        assert_eq!(first.map(|r| r.heart_rate), Some(120));

        let (second, _) = run("\n\n\n\n\n\n\n", &mut state);
        let second = second.unwrap();
        assert_eq!(second.heart_rate, 120);
        assert_eq!(second.activity_level, ActivityLevel::Active);
    }

    #[test]
    fn test_parse_activity_menu_numbers() {
        assert_eq!(parse_activity("1"), Some(ActivityLevel::Sedentary));
        assert_eq!(parse_activity("3"), Some(ActivityLevel::HighlyActive));
        assert_eq!(parse_activity("0"), None);
        assert_eq!(parse_activity("4"), None);
    }
}
