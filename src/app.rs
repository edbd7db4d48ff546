//! Top-level application orchestration.
//!
//! `src/main.rs` only sets up logging; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves dataset locations
//! - runs validation for one or all dataset kinds
//! - prints the trace and verdict
//! - writes the optional JSON report
//! - maps the outcome to an exit code

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::cli::{Cli, CommonArgs, Command};
use crate::domain::{DatasetKind, RunConfig};
use crate::error::{AppError, EXIT_VALIDATION_FAILED};
use crate::report::{format_input_error, format_loading, format_run};

pub mod pipeline;

use pipeline::DatasetRun;

/// Environment variable consulted when `--data-dir` is not given.
pub const DATA_DIR_ENV: &str = "DSV_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "data";

/// Entry point for the `dsv` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = config_from_args(&cli.common);

    match cli.command {
        Command::Fx(args) => handle_single(DatasetKind::Fx, args.path.as_deref(), &config),
        Command::Economic(args) => {
            handle_single(DatasetKind::Economic, args.path.as_deref(), &config)
        }
        Command::CreditRisk(args) => {
            handle_single(DatasetKind::CreditRisk, args.path.as_deref(), &config)
        }
        Command::All => handle_all(&config),
    }
}

fn handle_single(
    kind: DatasetKind,
    explicit: Option<&Path>,
    config: &RunConfig,
) -> Result<(), AppError> {
    let path = config.dataset_path(kind, explicit);

    let result = pipeline::validate_file(kind, &path);
    match &result {
        Ok(output) => print!("{}", format_run(output)),
        // The error itself goes to stderr from `main`.
        Err(_) => print!("{}", format_loading(kind, &path)),
    }

    let runs = vec![(kind, path, result)];
    write_optional_report(config, &runs)?;
    finish(runs)
}

fn handle_all(config: &RunConfig) -> Result<(), AppError> {
    let runs = pipeline::validate_all(config);

    for (idx, (kind, path, result)) in runs.iter().enumerate() {
        if idx > 0 {
            println!();
        }
        match result {
            Ok(output) => print!("{}", format_run(output)),
            Err(err) => print!("{}", format_input_error(*kind, path, err)),
        }
    }

    write_optional_report(config, &runs)?;
    finish_all(runs)
}

fn write_optional_report(config: &RunConfig, runs: &[DatasetRun]) -> Result<(), AppError> {
    if let Some(path) = &config.report_json {
        crate::io::export::write_report_json(path, runs)?;
    }
    Ok(())
}

/// Single-dataset exit: input errors propagate as-is.
fn finish(runs: Vec<DatasetRun>) -> Result<(), AppError> {
    for (kind, _, result) in runs {
        let output = result?;
        if !output.passed() {
            return Err(validation_failed(&[kind]));
        }
    }
    Ok(())
}

/// Multi-dataset exit: the worst outcome wins.
fn finish_all(runs: Vec<DatasetRun>) -> Result<(), AppError> {
    let mut failed = Vec::new();
    let mut input_errors = Vec::new();

    for (kind, _, result) in runs {
        match result {
            Ok(output) if output.passed() => {}
            Ok(_) => failed.push(kind),
            Err(err) => input_errors.push((kind, err)),
        }
    }

    if let Some((_, err)) = input_errors.first() {
        let kinds: Vec<&str> = input_errors.iter().map(|(k, _)| k.display_name()).collect();
        return Err(AppError::new(
            err.exit_code(),
            format!("Could not load: {}", kinds.join(", ")),
        ));
    }
    if !failed.is_empty() {
        return Err(validation_failed(&failed));
    }
    Ok(())
}

fn validation_failed(kinds: &[DatasetKind]) -> AppError {
    let names: Vec<&str> = kinds.iter().map(|k| k.display_name()).collect();
    AppError::new(
        EXIT_VALIDATION_FAILED,
        format!("Validation failed for: {}", names.join(", ")),
    )
}

pub fn config_from_args(args: &CommonArgs) -> RunConfig {
    RunConfig {
        data_dir: resolve_data_dir(args.data_dir.clone(), std::env::var(DATA_DIR_ENV).ok()),
        report_json: args.report_json.clone(),
    }
}

/// `--data-dir` beats the environment, which beats the default.
fn resolve_data_dir(flag: Option<PathBuf>, env: Option<String>) -> PathBuf {
    flag.or_else(|| env.filter(|s| !s.trim().is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}
