//! Dataset-wide checks that do not look at row content: row count and
//! key-column completeness. Both always run; neither short-circuits the other.

use crate::domain::Dataset;
use crate::report::{CheckOutcome, Rule};

/// Inclusive row-count range. `max == None` means unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCountBound {
    pub min: usize,
    pub max: Option<usize>,
}

impl RowCountBound {
    pub const fn between(min: usize, max: usize) -> Self {
        Self { min, max: Some(max) }
    }

    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    pub fn contains(&self, n: usize) -> bool {
        n >= self.min && self.max.is_none_or(|max| n <= max)
    }
}

/// Which columns must be free of missing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyColumns {
    /// Every column in the header.
    All,
    Only(&'static [&'static str]),
    /// Completeness is left to row validation.
    Unchecked,
}

pub fn check_row_count(dataset: &Dataset, bound: RowCountBound) -> CheckOutcome {
    let n = dataset.len();
    if bound.contains(n) {
        let message = match bound.max {
            Some(max) => format!(
                "Row count is {n}, within the expected range of {}-{max}.",
                bound.min
            ),
            None => format!("Row count is {n}, which looks reasonable (minimum {}).", bound.min),
        };
        return CheckOutcome::passed(Rule::RowCount, message);
    }

    let issue = match bound.max {
        Some(max) => format!(
            "Row count is {n}, which is outside the expected range of {}-{max}.",
            bound.min
        ),
        None => format!(
            "Row count is only {n}, which is below the expected minimum of {}.",
            bound.min
        ),
    };
    tracing::warn!(rows = n, min = bound.min, max = ?bound.max, "row count out of bounds");
    CheckOutcome::failed(Rule::RowCount, vec![issue])
}

/// `None` when the dataset kind does not check key columns.
pub fn check_key_columns(dataset: &Dataset, keys: KeyColumns) -> Option<CheckOutcome> {
    let (candidates, scope): (Vec<&str>, &str) = match keys {
        KeyColumns::Unchecked => return None,
        KeyColumns::All => (dataset.columns().iter().map(String::as_str).collect(), "columns"),
        KeyColumns::Only(names) => (names.to_vec(), "key columns"),
    };

    let missing: Vec<&str> = candidates
        .iter()
        .copied()
        .filter(|name| dataset.has_missing(name))
        .collect();

    if missing.is_empty() {
        let message = match keys {
            KeyColumns::Only(names) => {
                format!("No missing values in key columns ({}).", names.join(", "))
            }
            _ => "No missing values found.".to_string(),
        };
        return Some(CheckOutcome::passed(Rule::KeyColumns, message));
    }

    tracing::warn!(columns = ?missing, "missing values in key columns");
    Some(CheckOutcome::failed(
        Rule::KeyColumns,
        vec![format!("Missing values found in {scope}: {}", missing.join(", "))],
    ))
}
