//! Row-by-row schema validation and error aggregation.

use serde::Serialize;

use crate::domain::Dataset;
use crate::report::{CheckOutcome, Rule};
use crate::schema::{Record, Violation};

/// How row failures are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Aggregation {
    /// Stop at the first invalid row.
    FailFast,
    /// Check every row; detail the first failure and count the rest.
    CountAndSample,
}

/// The first invalid row, with every violation it carried.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowFailure {
    /// Physical line number in the source file (header is line 1).
    pub line: usize,
    pub schema: &'static str,
    pub violations: Vec<Violation>,
}

impl RowFailure {
    pub fn detail(&self) -> String {
        let n = self.violations.len();
        let plural = if n == 1 { "" } else { "s" };
        let fields: Vec<String> = self.violations.iter().map(ToString::to_string).collect();
        format!("{n} validation error{plural} for {}: {}", self.schema, fields.join("; "))
    }
}

/// Outcome of the row loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowValidation {
    pub policy: Aggregation,
    pub rows_checked: usize,
    pub invalid_rows: usize,
    pub first_failure: Option<RowFailure>,
}

impl RowValidation {
    /// Turn the loop outcome into a check result.
    pub fn outcome(&self) -> CheckOutcome {
        let Some(first) = &self.first_failure else {
            return CheckOutcome::passed(
                Rule::RowSchema,
                "All rows conform to the schema and validation rules.",
            );
        };

        let mut issues = vec![format!("Row {} is invalid: {}", first.line, first.detail())];
        if self.policy == Aggregation::CountAndSample && self.invalid_rows > 1 {
            issues.push(format!("... and {} other rows are also invalid.", self.invalid_rows - 1));
        }
        CheckOutcome::failed(Rule::RowSchema, issues)
    }
}

/// Zero-based row index to the file line it came from.
pub fn physical_line(index: usize) -> usize {
    index + 2
}

/// Validate every row of `dataset` as an `R`, under `policy`.
pub fn validate_rows<R: Record>(dataset: &Dataset, policy: Aggregation) -> RowValidation {
    let mut rows_checked = 0usize;
    let mut invalid_rows = 0usize;
    let mut first_failure = None;

    for (index, row) in dataset.rows().enumerate() {
        rows_checked += 1;

        let Err(violations) = R::from_row(row) else {
            continue;
        };

        invalid_rows += 1;
        let line = physical_line(index);
        tracing::debug!(line, schema = R::SCHEMA.name, errors = violations.len(), "invalid row");

        if first_failure.is_none() {
            first_failure = Some(RowFailure {
                line,
                schema: R::SCHEMA.name,
                violations,
            });
        }

        if policy == Aggregation::FailFast {
            break;
        }
    }

    RowValidation {
        policy,
        rows_checked,
        invalid_rows,
        first_failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Value;
    use crate::report::CheckStatus;
    use crate::schema::{EconomicIndicator, FxRate};

    fn fx(rates: &[(f64, f64)]) -> Dataset {
        Dataset::new(
            vec!["EUR".to_string(), "GBP".to_string()],
            rates
                .iter()
                .map(|(e, g)| vec![Value::Float(*e), Value::Float(*g)])
                .collect(),
        )
    }

    fn economic(years: &[i64]) -> Dataset {
        Dataset::new(
            vec!["country_name".to_string(), "year".to_string()],
            years
                .iter()
                .map(|y| vec![Value::from("Germany"), Value::Int(*y)])
                .collect(),
        )
    }

    fn issues(validation: &RowValidation) -> Vec<String> {
        match validation.outcome().status {
            CheckStatus::Failed { issues } => issues,
            CheckStatus::Passed { .. } => vec![],
        }
    }

    #[test]
    fn conforming_rows_pass_under_both_policies() {
        let ds = fx(&[(0.9, 0.8), (1.0, 0.85)]);
        for policy in [Aggregation::FailFast, Aggregation::CountAndSample] {
            let v = validate_rows::<FxRate>(&ds, policy);
            assert_eq!(v.invalid_rows, 0);
            assert!(v.outcome().is_passed());
        }
    }

    #[test]
    fn fail_fast_stops_at_first_bad_row() {
        let ds = fx(&[(0.9, 0.8), (1.25, 0.8), (0.5, 0.8), (0.9, 0.8)]);
        let v = validate_rows::<FxRate>(&ds, Aggregation::FailFast);
        assert_eq!(v.rows_checked, 2);
        assert_eq!(v.invalid_rows, 1);
        assert_eq!(v.first_failure.as_ref().unwrap().line, 3);

        let issues = issues(&v);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0],
            "Row 3 is invalid: 1 validation error for FxRate: EUR: should be less than 1.2 (received 1.25)"
        );
    }

    #[test]
    fn count_and_sample_checks_every_row() {
        let ds = economic(&[2009, 2015, 2024, 2016, 2030]);
        let v = validate_rows::<EconomicIndicator>(&ds, Aggregation::CountAndSample);
        assert_eq!(v.rows_checked, 5);
        assert_eq!(v.invalid_rows, 3);
        assert_eq!(v.first_failure.as_ref().unwrap().line, 2);

        let issues = issues(&v);
        assert_eq!(issues.len(), 2);
        let expected = "Row 2 is invalid: 1 validation error for EconomicIndicator: year";
        assert!(issues[0].starts_with(expected));
        assert_eq!(issues[1], "... and 2 other rows are also invalid.");
    }

    #[test]
    fn single_failure_has_no_summary_entry() {
        let ds = economic(&[2015, 2031]);
        let v = validate_rows::<EconomicIndicator>(&ds, Aggregation::CountAndSample);
        assert_eq!(issues(&v).len(), 1);
    }

    #[test]
    fn detail_pluralizes_and_joins_violations() {
        let ds = fx(&[(0.1, 2.0)]);
        let v = validate_rows::<FxRate>(&ds, Aggregation::FailFast);
        let detail = v.first_failure.unwrap().detail();
        assert!(detail.starts_with("2 validation errors for FxRate: EUR:"));
        assert!(detail.contains("; GBP:"));
    }
}
