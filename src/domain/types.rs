//! Shared domain types.
//!
//! A loaded dataset is kept column-oriented at the header level (one shared list
//! of column names) and row-oriented for values, so that:
//!
//! - rows can be validated one at a time in file order
//! - the correction pass can rewrite a single column in place
//! - column lookups by name stay cheap for the small schemas we check

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

/// A single cell after missing-value normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Empty cell, NA sentinel, NaN, or a column the row does not reach.
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

static ABSENT: Value = Value::Null;

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view used for bound checks and the age correction.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Null | Value::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "None"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Text(s) => write!(f, "'{s}'"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        if v.is_nan() { Value::Null } else { Value::Float(v) }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// An in-memory tabular dataset: a header plus rows of values in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Build a dataset, padding short rows with `Value::Null`.
    ///
    /// Long rows are kept as given; cells past the header are unreachable by name.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, Value::Null);
                }
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    /// Mutable access to every cell of one column, in row order.
    pub fn column_mut(&mut self, name: &str) -> Option<impl Iterator<Item = &mut Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter_mut().filter_map(move |row| row.get_mut(idx)))
    }

    /// Whether any row has an absent value in the given column.
    ///
    /// A column missing from the header counts as entirely absent.
    pub fn has_missing(&self, name: &str) -> bool {
        match self.column_index(name) {
            Some(idx) => self.rows.iter().any(|row| row[idx].is_null()),
            None => true,
        }
    }
}

/// Borrowed view of one dataset row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> Row<'a> {
    /// Value for `name`, or `Value::Null` when the column does not exist.
    pub fn get(&self, name: &str) -> &'a Value {
        self.columns
            .iter()
            .position(|c| c == name)
            .and_then(|idx| self.values.get(idx))
            .unwrap_or(&ABSENT)
    }
}

/// The three dataset kinds this tool knows how to validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetKind {
    Fx,
    Economic,
    CreditRisk,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 3] = [
        DatasetKind::Fx,
        DatasetKind::Economic,
        DatasetKind::CreditRisk,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            DatasetKind::Fx => "FX rates",
            DatasetKind::Economic => "Economic indicators",
            DatasetKind::CreditRisk => "Credit risk",
        }
    }

    /// Default location relative to the data directory.
    pub fn default_file(self) -> &'static str {
        match self {
            DatasetKind::Fx => "fx_rates.csv",
            DatasetKind::Economic => "raw/worldbank_economic_data.csv",
            DatasetKind::CreditRisk => "raw/credit_risk_dataset.csv",
        }
    }

    /// What the user should do when the file is absent.
    pub fn missing_hint(self) -> &'static str {
        match self {
            DatasetKind::Fx => "Fetch the USD->EUR/GBP daily rates first.",
            DatasetKind::Economic => "Fetch the World Bank indicators first.",
            DatasetKind::CreditRisk => concat!(
                "Download the credit risk dataset from Kaggle ",
                "and place it in the raw data directory."
            ),
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub data_dir: PathBuf,
    pub report_json: Option<PathBuf>,
}

impl RunConfig {
    /// Path for `kind`, honoring an explicit override.
    pub fn dataset_path(&self, kind: DatasetKind, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) => path.to_path_buf(),
            None => self.data_dir.join(kind.default_file()),
        }
    }
}
