//! Terminal formatting for validation runs.
//!
//! All wording lives here so the checks themselves stay free of presentation
//! and output changes stay localized.

use std::path::Path;

use super::{CheckOutcome, CheckStatus, RunOutput};
use crate::domain::DatasetKind;
use crate::error::AppError;

pub fn format_loading(kind: DatasetKind, path: &Path) -> String {
    format!("=== {} ===\nLoading data from {}...\n", kind.display_name(), path.display())
}

/// One status line per rule.
pub fn format_check(check: &CheckOutcome) -> String {
    match &check.status {
        CheckStatus::Passed { message } => format!("   - PASS {message}\n"),
        CheckStatus::Failed { issues } => format!(
            "   - FAIL {} ({} issue{})\n",
            check.rule.label(),
            issues.len(),
            plural(issues.len())
        ),
    }
}

/// Full trace for one dataset, loading line through verdict.
pub fn format_run(run: &RunOutput) -> String {
    let mut out = format_loading(run.kind, &run.source);
    out.push_str(&format!("Loaded {} rows.\n", run.rows_loaded));

    if let Some(correction) = &run.correction {
        out.push_str("\nCorrecting data...\n");
        out.push_str(&format!("   - {}\n", correction.message()));
    }

    out.push_str("\nPerforming validations...\n");
    for check in &run.checks {
        out.push_str(&format_check(check));
    }

    out.push_str("\nValidation complete.\n");
    out.push_str(&format_verdict(&run.report.issues));
    out
}

/// Final verdict, listing every issue on failure.
pub fn format_verdict(issues: &[String]) -> String {
    if issues.is_empty() {
        return "Validation SUCCEEDED!\n".to_string();
    }

    let mut out = String::from("Validation FAILED! The following issues were found:\n");
    for issue in issues {
        out.push_str(&format!("   - {issue}\n"));
    }
    out
}

/// Trace for a dataset whose input could not be loaded.
pub fn format_input_error(kind: DatasetKind, path: &Path, err: &AppError) -> String {
    let mut out = format_loading(kind, path);
    out.push_str(&format!("{err}\n"));
    out
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::report::{Rule, ValidationReport};
    use crate::validate::{AgeCorrection, Aggregation, RowValidation};

    fn run(checks: Vec<CheckOutcome>, correction: Option<AgeCorrection>) -> RunOutput {
        RunOutput {
            kind: DatasetKind::CreditRisk,
            source: PathBuf::from("data/raw/credit_risk_dataset.csv"),
            rows_loaded: 32581,
            correction,
            report: ValidationReport::from_checks(&checks),
            checks,
            row_validation: RowValidation {
                policy: Aggregation::CountAndSample,
                rows_checked: 32581,
                invalid_rows: 0,
                first_failure: None,
            },
        }
    }

    #[test]
    fn passing_run_ends_with_success() {
        let out = format_run(&run(
            vec![CheckOutcome::passed(Rule::RowCount, "Row count is fine.")],
            Some(AgeCorrection { corrected: 5 }),
        ));
        assert!(out.starts_with(
            "=== Credit risk ===\nLoading data from data/raw/credit_risk_dataset.csv..."
        ));
        assert!(out.contains("Corrected 5 rows"));
        assert!(out.contains("   - PASS Row count is fine.\n"));
        assert!(out.ends_with("Validation SUCCEEDED!\n"));
    }

    #[test]
    fn failing_run_lists_issues_after_verdict() {
        let out = format_run(&run(
            vec![CheckOutcome::failed(
                Rule::RowSchema,
                vec![
                    "Row 7 is invalid: x".to_string(),
                    "... and 2 other rows are also invalid.".to_string(),
                ],
            )],
            None,
        ));
        assert!(out.contains("   - FAIL row schema (2 issues)\n"));
        assert!(!out.contains("Correcting data"));
        let verdict = out.split("Validation FAILED!").nth(1).unwrap();
        assert!(verdict.contains("   - Row 7 is invalid: x\n"));
        assert!(verdict.contains("   - ... and 2 other rows are also invalid.\n"));
        assert!(!out.contains("SUCCEEDED"));
    }
}
