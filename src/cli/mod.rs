//! Command-line parsing for the dataset validator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! validation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "dsv",
    version,
    about = "Schema validation for FX, economic-indicator and credit-risk datasets"
)]
pub struct Cli {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate daily USD->EUR/GBP exchange rates (stops at the first bad row).
    Fx(DatasetArgs),
    /// Validate World Bank economic indicators.
    Economic(DatasetArgs),
    /// Correct and validate the credit-risk loan dataset.
    CreditRisk(DatasetArgs),
    /// Validate all three datasets from their default locations.
    All,
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    /// Root directory for default dataset paths (falls back to $DSV_DATA_DIR, then `data`).
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Also write the run results as JSON.
    #[arg(long = "report-json", global = true, value_name = "JSON")]
    pub report_json: Option<PathBuf>,
}

/// Options for validating a single dataset.
#[derive(Debug, Args, Clone)]
pub struct DatasetArgs {
    /// CSV file to validate instead of the default location.
    #[arg(long, value_name = "CSV")]
    pub path: Option<PathBuf>,
}
