//! Generic row check against a schema descriptor.
//!
//! Checking never stops at the first bad field: every field is visited so that
//! a row's report lists all of its violations at once.

use std::fmt;

use serde::{Serialize, Serializer};

use super::{Bound, FieldDef, FieldType, Schema};
use crate::domain::{Row, Value};

/// What a field value failed to satisfy.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// Required field is absent.
    Missing,
    /// Value cannot be coerced to the declared type.
    Type(FieldType),
    Bound(Bound),
    /// Text value outside the allowed set.
    NotAllowed(&'static [&'static str]),
}

/// A single field-level failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub field: &'static str,
    pub received: Value,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn constraint(&self) -> String {
        match &self.kind {
            ViolationKind::Missing => "field required".to_string(),
            ViolationKind::Type(FieldType::Integer)
                if matches!(self.received, Value::Float(v) if v.is_finite() && v.fract() != 0.0) =>
            {
                "should be a valid integer, got a number with a fractional part".to_string()
            }
            ViolationKind::Type(ty) => format!("should be a valid {}", ty.label()),
            ViolationKind::Bound(bound) => format!("should be {bound}"),
            ViolationKind::NotAllowed(allowed) => {
                let quoted: Vec<String> = allowed.iter().map(|a| format!("'{a}'")).collect();
                format!("should be one of {}", quoted.join(", "))
            }
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ViolationKind::Missing => write!(f, "{}: {}", self.field, self.constraint()),
            _ => write!(f, "{}: {} (received {})", self.field, self.constraint(), self.received),
        }
    }
}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("Violation", 3)?;
        s.serialize_field("field", self.field)?;
        s.serialize_field("received", &self.received)?;
        s.serialize_field("constraint", &self.constraint())?;
        s.end()
    }
}

/// Row values coerced to their declared types, aligned with `schema.fields`.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedRow {
    schema: &'static Schema,
    values: Vec<Value>,
}

impl CheckedRow {
    fn slot(&self, name: &'static str) -> Result<&Value, Violation> {
        self.schema
            .fields
            .iter()
            .position(|f| f.name == name)
            .and_then(|idx| self.values.get(idx))
            .ok_or(Violation {
                field: name,
                received: Value::Null,
                kind: ViolationKind::Missing,
            })
    }

    fn mismatch(name: &'static str, value: &Value, ty: FieldType) -> Violation {
        let kind = if value.is_null() {
            ViolationKind::Missing
        } else {
            ViolationKind::Type(ty)
        };
        Violation {
            field: name,
            received: value.clone(),
            kind,
        }
    }

    pub fn int(&self, name: &'static str) -> Result<i64, Violation> {
        match self.slot(name)? {
            Value::Int(v) => Ok(*v),
            other => Err(Self::mismatch(name, other, FieldType::Integer)),
        }
    }

    pub fn float(&self, name: &'static str) -> Result<f64, Violation> {
        match self.slot(name)? {
            Value::Float(v) => Ok(*v),
            other => Err(Self::mismatch(name, other, FieldType::Float)),
        }
    }

    pub fn opt_float(&self, name: &'static str) -> Result<Option<f64>, Violation> {
        match self.slot(name)? {
            Value::Null => Ok(None),
            Value::Float(v) => Ok(Some(*v)),
            other => Err(Self::mismatch(name, other, FieldType::Float)),
        }
    }

    pub fn text(&self, name: &'static str) -> Result<&str, Violation> {
        match self.slot(name)? {
            Value::Text(s) => Ok(s),
            other => Err(Self::mismatch(name, other, FieldType::Text)),
        }
    }

    /// Parse a closed-enum field into its typed variant.
    pub fn choice<T: std::str::FromStr>(
        &self,
        name: &'static str,
        allowed: &'static [&'static str],
    ) -> Result<T, Violation> {
        let s = self.text(name)?;
        s.parse().map_err(|_| Violation {
            field: name,
            received: Value::Text(s.to_string()),
            kind: ViolationKind::NotAllowed(allowed),
        })
    }
}

impl Schema {
    /// Validate one row, returning coerced values or every violation found.
    pub fn check_row(&'static self, row: Row<'_>) -> Result<CheckedRow, Vec<Violation>> {
        let mut values = Vec::with_capacity(self.fields.len());
        let mut violations = Vec::new();

        for field in self.fields {
            match check_field(field, row.get(field.name)) {
                Ok(v) => values.push(v),
                Err(v) => {
                    violations.push(v);
                    values.push(Value::Null);
                }
            }
        }

        if violations.is_empty() {
            Ok(CheckedRow { schema: self, values })
        } else {
            Err(violations)
        }
    }
}

/// Check one value against its definition, returning the coerced value.
pub fn check_field(field: &FieldDef, value: &Value) -> Result<Value, Violation> {
    let violation = |kind| Violation {
        field: field.name,
        received: value.clone(),
        kind,
    };

    if value.is_null() {
        return if field.required {
            Err(violation(ViolationKind::Missing))
        } else {
            Ok(Value::Null)
        };
    }

    let coerced =
        coerce(field.ty, value).ok_or_else(|| violation(ViolationKind::Type(field.ty)))?;

    if let FieldType::Enum(allowed) = field.ty {
        if let Value::Text(s) = &coerced {
            if !allowed.contains(&s.as_str()) {
                return Err(violation(ViolationKind::NotAllowed(allowed)));
            }
        }
    }

    if let Some(v) = coerced.as_f64() {
        if let Some(bound) = field.bounds.iter().find(|b| !b.admits(v)) {
            return Err(violation(ViolationKind::Bound(*bound)));
        }
    }

    Ok(coerced)
}

/// Lax numeric coercion: integral floats are accepted as integers and
/// integers are accepted as floats. Text is never coerced to numbers.
fn coerce(ty: FieldType, value: &Value) -> Option<Value> {
    match (ty, value) {
        (FieldType::Integer, Value::Int(v)) => Some(Value::Int(*v)),
        (FieldType::Integer, Value::Float(v))
            if v.fract() == 0.0 && v.abs() < i64::MAX as f64 =>
        {
            Some(Value::Int(*v as i64))
        }
        (FieldType::Float, Value::Int(v)) => Some(Value::Float(*v as f64)),
        (FieldType::Float, Value::Float(v)) => Some(Value::Float(*v)),
        (FieldType::Text | FieldType::Enum(_), Value::Text(s)) => Some(Value::Text(s.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Dataset;
    use crate::schema::{CREDIT_RISK_RECORD, ECONOMIC_INDICATOR, FX_RATE};

    fn one_row(columns: &[&str], values: Vec<Value>) -> Dataset {
        Dataset::new(columns.iter().map(|s| s.to_string()).collect(), vec![values])
    }

    #[test]
    fn conforming_fx_row_passes() {
        let ds = one_row(
            &["date", "EUR", "GBP"],
            vec![Value::from("2023-01-02"), Value::Float(0.93), Value::Float(0.82)],
        );
        assert!(FX_RATE.check_row(ds.row(0).unwrap()).is_ok());
    }

    #[test]
    fn out_of_range_rate_reports_bound() {
        let ds = one_row(&["EUR", "GBP"], vec![Value::Float(1.25), Value::Float(0.82)]);
        let errs = FX_RATE.check_row(ds.row(0).unwrap()).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].field, "EUR");
        assert_eq!(errs[0].kind, ViolationKind::Bound(Bound::Lt(1.2)));
        assert_eq!(errs[0].to_string(), "EUR: should be less than 1.2 (received 1.25)");
    }

    #[test]
    fn every_violation_in_a_row_is_collected() {
        let ds = one_row(&["EUR", "GBP"], vec![Value::Float(0.5), Value::Null]);
        let errs = FX_RATE.check_row(ds.row(0).unwrap()).unwrap_err();
        let fields: Vec<_> = errs.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["EUR", "GBP"]);
        assert_eq!(errs[1].kind, ViolationKind::Missing);
    }

    #[test]
    fn optional_fields_may_be_absent_but_are_checked_when_present() {
        let columns = ["country_name", "year", "gdp_current_usd", "inflation_annual_perc"];
        let ok = one_row(
            &columns,
            vec![Value::from("Egypt"), Value::Int(2015), Value::Null, Value::Null],
        );
        assert!(ECONOMIC_INDICATOR.check_row(ok.row(0).unwrap()).is_ok());

        let bad = one_row(
            &columns,
            vec![Value::from("Egypt"), Value::Int(2015), Value::Float(0.0), Value::Null],
        );
        let errs = ECONOMIC_INDICATOR.check_row(bad.row(0).unwrap()).unwrap_err();
        assert_eq!(errs[0].kind, ViolationKind::Bound(Bound::Gt(0.0)));
    }

    #[test]
    fn integral_float_coerces_to_integer() {
        let field = FieldDef::required("year", FieldType::Integer);
        assert_eq!(check_field(&field, &Value::Float(2015.0)), Ok(Value::Int(2015)));

        let err = check_field(&field, &Value::Float(2015.5)).unwrap_err();
        assert_eq!(err.kind, ViolationKind::Type(FieldType::Integer));
        assert!(err.constraint().contains("fractional part"));
    }

    #[test]
    fn whole_but_unrepresentable_floats_are_plain_integer_errors() {
        let field = FieldDef::required("year", FieldType::Integer);
        for value in [1e300, f64::INFINITY] {
            let err = check_field(&field, &Value::Float(value)).unwrap_err();
            assert_eq!(err.kind, ViolationKind::Type(FieldType::Integer));
            assert_eq!(err.constraint(), "should be a valid integer");
        }
        assert_eq!(
            check_field(&field, &Value::Float(1e300)).unwrap_err().to_string(),
            "year: should be a valid integer (received 1e300)"
        );
    }

    #[test]
    fn text_is_not_coerced_to_numbers() {
        let field = FieldDef::required("EUR", FieldType::Float);
        let err = check_field(&field, &Value::from("abc")).unwrap_err();
        assert_eq!(err.kind, ViolationKind::Type(FieldType::Float));
    }

    #[test]
    fn enum_rejects_unknown_value() {
        let field = CREDIT_RISK_RECORD.field("loan_grade").unwrap();
        assert!(check_field(field, &Value::from("C")).is_ok());
        let err = check_field(field, &Value::from("H")).unwrap_err();
        assert!(matches!(err.kind, ViolationKind::NotAllowed(_)));
        assert!(err.to_string().starts_with("loan_grade: should be one of 'A'"));
    }

    #[test]
    fn checked_row_exposes_coerced_values() {
        let ds = one_row(
            &["country_name", "year"],
            vec![Value::from("Germany"), Value::Float(2020.0)],
        );
        let checked = ECONOMIC_INDICATOR.check_row(ds.row(0).unwrap()).unwrap();
        assert_eq!(checked.int("year"), Ok(2020));
        assert_eq!(checked.text("country_name"), Ok("Germany"));
        assert_eq!(checked.opt_float("gdp_current_usd"), Ok(None));
    }
}
