//! Shared validation pipeline used by every subcommand.
//!
//! load -> correct (credit risk only) -> row count -> key columns -> row schema -> report
//!
//! This is the library form: it returns the report and leaves exit behavior to
//! the caller.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::domain::{Dataset, DatasetKind, RunConfig};
use crate::error::AppError;
use crate::io::ingest::load_dataset;
use crate::report::{RunOutput, ValidationReport};
use crate::validate::{CheckRun, DatasetProfile, run_checks};

/// One dataset's result, keyed by kind and the path it was read from.
pub type DatasetRun = (DatasetKind, PathBuf, Result<RunOutput, AppError>);

/// Load `path` and validate it as `kind`.
///
/// Fails only when the input cannot be loaded; validation failures are
/// carried in the returned report.
pub fn validate_file(kind: DatasetKind, path: &Path) -> Result<RunOutput, AppError> {
    let dataset = load_dataset(path, kind)?;
    Ok(validate_dataset(kind, path, dataset))
}

/// Validate an already-loaded dataset.
pub fn validate_dataset(kind: DatasetKind, source: &Path, mut dataset: Dataset) -> RunOutput {
    let profile = DatasetProfile::for_kind(kind);
    let rows_loaded = dataset.len();

    let CheckRun {
        correction,
        checks,
        rows,
    } = run_checks(&profile, &mut dataset);
    let report = ValidationReport::from_checks(&checks);

    tracing::info!(
        kind = ?kind,
        rows = rows_loaded,
        invalid_rows = rows.invalid_rows,
        issues = report.issues.len(),
        passed = report.passed(),
        "validation finished"
    );

    RunOutput {
        kind,
        source: source.to_path_buf(),
        rows_loaded,
        correction,
        checks,
        row_validation: rows,
        report,
    }
}

/// Validate every dataset kind from its default location.
///
/// Kinds share nothing, so they run in parallel; results come back in
/// `DatasetKind::ALL` order.
pub fn validate_all(config: &RunConfig) -> Vec<DatasetRun> {
    DatasetKind::ALL
        .par_iter()
        .map(|&kind| {
            let path = config.dataset_path(kind, None);
            let result = validate_file(kind, &path);
            (kind, path, result)
        })
        .collect()
}
