//! Validation results: per-rule outcomes, the aggregated report, and the
//! per-dataset run output.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::DatasetKind;
use crate::validate::{AgeCorrection, RowValidation};

pub mod format;

pub use format::*;

/// The dataset-level rules, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    RowCount,
    KeyColumns,
    RowSchema,
}

impl Rule {
    pub fn label(self) -> &'static str {
        match self {
            Rule::RowCount => "row count",
            Rule::KeyColumns => "missing values",
            Rule::RowSchema => "row schema",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CheckStatus {
    Passed { message: String },
    Failed { issues: Vec<String> },
}

/// Result of one rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckOutcome {
    pub rule: Rule,
    #[serde(flatten)]
    pub status: CheckStatus,
}

impl CheckOutcome {
    pub fn passed(rule: Rule, message: impl Into<String>) -> Self {
        Self {
            rule,
            status: CheckStatus::Passed {
                message: message.into(),
            },
        }
    }

    pub fn failed(rule: Rule, issues: Vec<String>) -> Self {
        Self {
            rule,
            status: CheckStatus::Failed { issues },
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self.status, CheckStatus::Passed { .. })
    }
}

/// Ordered, human-readable issues from one run. Empty means the dataset passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<String>,
}

impl ValidationReport {
    pub fn from_checks(checks: &[CheckOutcome]) -> Self {
        let issues = checks
            .iter()
            .filter_map(|c| match &c.status {
                CheckStatus::Failed { issues } => Some(issues.iter().cloned()),
                CheckStatus::Passed { .. } => None,
            })
            .flatten()
            .collect();
        Self { issues }
    }

    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Everything a single dataset validation produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutput {
    pub kind: DatasetKind,
    pub source: PathBuf,
    pub rows_loaded: usize,
    /// Present only for dataset kinds that run a correction pass.
    pub correction: Option<AgeCorrection>,
    pub checks: Vec<CheckOutcome>,
    /// Row counts and the first failing row with its field violations.
    pub row_validation: RowValidation,
    pub report: ValidationReport,
}

impl RunOutput {
    pub fn passed(&self) -> bool {
        self.report.passed()
    }
}
