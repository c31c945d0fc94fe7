//! Command-line interface

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::logic::reading::types::{HEART_RATE, SLEEP_HOURS, SPO2, STEP_COUNT, STRESS_LEVEL};
use crate::logic::reading::{ActivityLevel, BiometricReading};

#[derive(Debug, Parser)]
#[command(
    name = "watch-risk",
    version,
    about = "Smartwatch health risk prediction",
    long_about = "Collects six smartwatch readings, runs the trained classifier and\n\
        combines its verdict with the SpO2 < 95% and heart rate > 100 BPM rules.\n\n\
        EXAMPLES:\n\
        \n  watch-risk                                    Interactive form\n\
        \n  watch-risk evaluate --heart-rate 110 --spo2 92  One-shot evaluation\n\
        \n  watch-risk evaluate --input reading.json --json Headless JSON in/out\n\
        \n  watch-risk model-info                         Show loaded model metadata"
)]
pub struct Cli {
    /// Classifier artifact (overrides WATCH_RISK_MODEL_PATH)
    #[arg(long, global = true, value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// Expected SHA-256 of the artifact (overrides WATCH_RISK_MODEL_SHA256)
    #[arg(long = "model-sha256", global = true, value_name = "HEX")]
    pub model_sha256: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive form (default)
    Form,

    /// Evaluate one reading without prompting
    Evaluate(EvaluateArgs),

    /// Print metadata of the loaded classifier as JSON
    ModelInfo,
}

#[derive(Debug, Clone, Args)]
pub struct EvaluateArgs {
    /// Read the reading as JSON from FILE ("-" for stdin)
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with_all = ["heart_rate", "spo2", "steps", "sleep", "stress", "activity"]
    )]
    pub input: Option<PathBuf>,

    /// Heart rate (BPM), 30-200
    #[arg(long, default_value_t = HEART_RATE.default as u32)]
    pub heart_rate: u32,

    /// Blood oxygen saturation (%), 80-100
    #[arg(long, default_value_t = SPO2.default)]
    pub spo2: f64,

    /// Step count, 0-50000
    #[arg(long, default_value_t = STEP_COUNT.default as u32)]
    pub steps: u32,

    /// Sleep duration (hours), 0-15
    #[arg(long, default_value_t = SLEEP_HOURS.default)]
    pub sleep: f64,

    /// Stress level, 1-10
    #[arg(long, default_value_t = STRESS_LEVEL.default as u32)]
    pub stress: u32,

    /// Sedentary, Active or "Highly Active"
    #[arg(long, default_value_t = ActivityLevel::Sedentary)]
    pub activity: ActivityLevel,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl EvaluateArgs {
    /// Reading from flags, unvalidated
    pub fn reading(&self) -> BiometricReading {
        BiometricReading {
            heart_rate: self.heart_rate,
            spo2: self.spo2,
            step_count: self.steps,
            sleep_hours: self.sleep,
            stress_level: self.stress,
            activity_level: self.activity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_form() {
        let cli = Cli::parse_from(["watch-risk"]);
        assert!(cli.command.is_none());
        assert!(cli.model.is_none());
    }

    #[test]
    fn test_evaluate_defaults() {
        let cli = Cli::parse_from(["watch-risk", "evaluate"]);
        let Some(Command::Evaluate(args)) = cli.command else {
            panic!("expected evaluate");
        };
        assert_eq!(args.reading(), BiometricReading::default());
        assert!(!args.json);
    }

    #[test]
    fn test_evaluate_flags() {
        let cli = Cli::parse_from([
            "watch-risk",
            "evaluate",
            "--heart-rate",
            "110",
            "--spo2",
            "92",
            "--activity",
            "Highly Active",
            "--json",
            "--model",
            "m.json",
        ]);
        assert_eq!(cli.model, Some(PathBuf::from("m.json")));
        let Some(Command::Evaluate(args)) = cli.command else {
            panic!("expected evaluate");
        };
        let reading = args.reading();
        assert_eq!(reading.heart_rate, 110);
        assert_eq!(reading.spo2, 92.0);
        assert_eq!(reading.activity_level, ActivityLevel::HighlyActive);
        assert!(args.json);
    }

    #[test]
    fn test_input_conflicts_with_field_flags() {
        let err = Cli::try_parse_from(["watch-risk", "evaluate", "--input", "r.json", "--heart-rate", "90"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);

        let cli = Cli::try_parse_from(["watch-risk", "evaluate", "--input", "r.json", "--json"]).unwrap();
        let Some(Command::Evaluate(args)) = cli.command else {
            panic!("expected evaluate");
        };
        assert_eq!(args.input, Some(PathBuf::from("r.json")));
        assert!(args.json);
    }

    #[test]
    fn test_bad_activity_rejected() {
        let result = Cli::try_parse_from(["watch-risk", "evaluate", "--activity", "couch"]);
        assert!(result.is_err());
    }
}
