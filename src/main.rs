//! watch-risk - Main Entry Point

use std::io;
use std::process::ExitCode;

use clap::Parser;

use watch_risk::api::cli::{Cli, Command};
use watch_risk::api::commands;
use watch_risk::constants::{APP_NAME, APP_VERSION};
use watch_risk::logic::config::AppConfig;
use watch_risk::logic::model::registry;

fn main() -> ExitCode {
    // Optional .env in the working directory, before the logger reads RUST_LOG
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = AppConfig::from_env().with_overrides(cli.model.clone(), cli.model_sha256.clone());

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

    // Classifier is loaded once; without it no input is accepted
    let model = match registry::init(&config.model_path, config.model_sha256.as_deref()) {
        Ok(model) => model,
        Err(e) => {
            log::error!("Classifier load failed: {}", e);
            eprintln!("error: cannot start without a classifier: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command.unwrap_or(Command::Form) {
        Command::Form => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            commands::run_form(model, &mut stdin.lock(), &mut stdout.lock()).map_err(anyhow::Error::from)
        }
        Command::Evaluate(args) => commands::run_evaluate(model, &args, &mut io::stdout().lock()),
        Command::ModelInfo => commands::run_model_info(model, &mut io::stdout().lock()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
