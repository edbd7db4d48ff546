//! Export validation results to JSON.
//!
//! The file is meant for CI steps and downstream scripts that would rather not
//! scrape the terminal trace.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::DatasetKind;
use crate::error::{AppError, EXIT_INPUT};
use crate::report::RunOutput;

#[derive(Debug, Serialize)]
struct ReportFile<'a> {
    tool: &'static str,
    passed: bool,
    runs: Vec<RunEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct RunEntry<'a> {
    kind: DatasetKind,
    source: &'a Path,
    passed: bool,
    /// Set when the input could not be loaded at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a RunOutput>,
}

/// Write one entry per dataset run, in the order given.
pub fn write_report_json(
    path: &Path,
    runs: &[(DatasetKind, PathBuf, Result<RunOutput, AppError>)],
) -> Result<(), AppError> {
    let entries: Vec<RunEntry<'_>> = runs
        .iter()
        .map(|(kind, source, result)| match result {
            Ok(output) => RunEntry {
                kind: *kind,
                source: source.as_path(),
                passed: output.passed(),
                error: None,
                result: Some(output),
            },
            Err(err) => RunEntry {
                kind: *kind,
                source: source.as_path(),
                passed: false,
                error: Some(err.to_string()),
                result: None,
            },
        })
        .collect();

    let report = ReportFile {
        tool: "dsv",
        passed: entries.iter().all(|e| e.passed),
        runs: entries,
    };

    let file = File::create(path).map_err(|e| {
        AppError::new(
            EXIT_INPUT,
            format!("Failed to create report JSON '{}': {e}", path.display()),
        )
    })?;
    serde_json::to_writer_pretty(file, &report)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write report JSON: {e}")))?;

    Ok(())
}
