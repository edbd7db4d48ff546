//! Dataset validation: the per-kind profile and the checks it drives.
//!
//! Order for one dataset is fixed: correction (if the kind has one), row
//! count, key columns, then row schema. Every rule runs; the report collects
//! whatever failed.

use crate::domain::{Dataset, DatasetKind};
use crate::report::CheckOutcome;
use crate::schema::{CreditRiskRecord, EconomicIndicator, FxRate};

pub mod correction;
pub mod rows;
pub mod structural;

pub use correction::*;
pub use rows::*;
pub use structural::*;

/// Fixed validation settings for one dataset kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetProfile {
    pub kind: DatasetKind,
    pub row_count: RowCountBound,
    pub key_columns: KeyColumns,
    pub aggregation: Aggregation,
    pub corrects_ages: bool,
}

impl DatasetProfile {
    pub fn for_kind(kind: DatasetKind) -> Self {
        match kind {
            DatasetKind::Fx => Self {
                kind,
                row_count: RowCountBound::between(250, 270),
                key_columns: KeyColumns::All,
                aggregation: Aggregation::FailFast,
                corrects_ages: false,
            },
            DatasetKind::Economic => Self {
                kind,
                row_count: RowCountBound::at_least(10),
                key_columns: KeyColumns::Only(&["country_name", "year"]),
                aggregation: Aggregation::CountAndSample,
                corrects_ages: false,
            },
            DatasetKind::CreditRisk => Self {
                kind,
                row_count: RowCountBound::at_least(10_000),
                key_columns: KeyColumns::Unchecked,
                aggregation: Aggregation::CountAndSample,
                corrects_ages: true,
            },
        }
    }

    /// Run the row validator with this kind's record type.
    pub fn validate_rows(&self, dataset: &Dataset) -> RowValidation {
        match self.kind {
            DatasetKind::Fx => validate_rows::<FxRate>(dataset, self.aggregation),
            DatasetKind::Economic => validate_rows::<EconomicIndicator>(dataset, self.aggregation),
            DatasetKind::CreditRisk => validate_rows::<CreditRiskRecord>(dataset, self.aggregation),
        }
    }
}

/// Everything `run_checks` produced for one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckRun {
    pub correction: Option<AgeCorrection>,
    /// Rule outcomes in run order; the last one is the row-schema rule.
    pub checks: Vec<CheckOutcome>,
    /// Structured form of the row-schema rule.
    pub rows: RowValidation,
}

/// Apply the correction pass (if any), then every rule, in order.
pub fn run_checks(profile: &DatasetProfile, dataset: &mut Dataset) -> CheckRun {
    let correction = profile.corrects_ages.then(|| correct_unrealistic_ages(dataset));

    let mut checks = Vec::with_capacity(3);
    checks.push(check_row_count(dataset, profile.row_count));
    if let Some(outcome) = check_key_columns(dataset, profile.key_columns) {
        checks.push(outcome);
    }
    let rows = profile.validate_rows(dataset);
    checks.push(rows.outcome());

    CheckRun {
        correction,
        checks,
        rows,
    }
}
