//! Typed records and the closed string enumerations they use.

use std::fmt;
use std::str::FromStr;

use super::check::{CheckedRow, Violation};
use super::tables::{CREDIT_RISK_RECORD, ECONOMIC_INDICATOR, FX_RATE};
use super::Schema;
use crate::domain::Row;

/// Error for a string outside a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeOwnership {
    Rent,
    Own,
    Mortgage,
    Other,
}

impl HomeOwnership {
    pub const ALL: [HomeOwnership; 4] = [Self::Rent, Self::Own, Self::Mortgage, Self::Other];
    pub const NAMES: &'static [&'static str] = &["RENT", "OWN", "MORTGAGE", "OTHER"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rent => "RENT",
            Self::Own => "OWN",
            Self::Mortgage => "MORTGAGE",
            Self::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanIntent {
    Personal,
    Education,
    Medical,
    Venture,
    HomeImprovement,
    DebtConsolidation,
}

impl LoanIntent {
    pub const ALL: [LoanIntent; 6] = [
        Self::Personal,
        Self::Education,
        Self::Medical,
        Self::Venture,
        Self::HomeImprovement,
        Self::DebtConsolidation,
    ];
    pub const NAMES: &'static [&'static str] = &[
        "PERSONAL",
        "EDUCATION",
        "MEDICAL",
        "VENTURE",
        "HOMEIMPROVEMENT",
        "DEBTCONSOLIDATION",
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "PERSONAL",
            Self::Education => "EDUCATION",
            Self::Medical => "MEDICAL",
            Self::Venture => "VENTURE",
            Self::HomeImprovement => "HOMEIMPROVEMENT",
            Self::DebtConsolidation => "DEBTCONSOLIDATION",
        }
    }
}

/// Lender-assigned loan grade, best (`A`) to worst (`G`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoanGrade {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl LoanGrade {
    pub const ALL: [LoanGrade; 7] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
    ];
    pub const NAMES: &'static [&'static str] = &["A", "B", "C", "D", "E", "F", "G"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
        }
    }
}

/// Historical default flag from the credit bureau.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultOnFile {
    Y,
    N,
}

impl DefaultOnFile {
    pub const ALL: [DefaultOnFile; 2] = [Self::Y, Self::N];
    pub const NAMES: &'static [&'static str] = &["Y", "N"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Y => "Y",
            Self::N => "N",
        }
    }
}

/// Shared `FromStr`/`Display` in terms of `ALL` and `as_str`.
macro_rules! closed_enum_str {
    ($($ty:ty),* $(,)?) => {$(
        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownVariant(s.to_string()))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )*};
}

closed_enum_str!(HomeOwnership, LoanIntent, LoanGrade, DefaultOnFile);

/// A schema-conformant row.
pub trait Record: Sized {
    const SCHEMA: &'static Schema;

    /// Extract typed values from an already-checked row.
    fn from_checked(row: &CheckedRow) -> Result<Self, Violation>;

    /// Check `row` against `SCHEMA` and build the record.
    fn from_row(row: Row<'_>) -> Result<Self, Vec<Violation>> {
        let checked = Self::SCHEMA.check_row(row)?;
        Self::from_checked(&checked).map_err(|v| vec![v])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FxRate {
    pub eur: f64,
    pub gbp: f64,
}

impl Record for FxRate {
    const SCHEMA: &'static Schema = &FX_RATE;

    fn from_checked(row: &CheckedRow) -> Result<Self, Violation> {
        Ok(Self {
            eur: row.float("EUR")?,
            gbp: row.float("GBP")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EconomicIndicator {
    pub country_name: String,
    pub year: i64,
    pub gdp_current_usd: Option<f64>,
    pub inflation_annual_perc: Option<f64>,
    pub policy_interest_rate_perc: Option<f64>,
}

impl Record for EconomicIndicator {
    const SCHEMA: &'static Schema = &ECONOMIC_INDICATOR;

    fn from_checked(row: &CheckedRow) -> Result<Self, Violation> {
        Ok(Self {
            country_name: row.text("country_name")?.to_string(),
            year: row.int("year")?,
            gdp_current_usd: row.opt_float("gdp_current_usd")?,
            inflation_annual_perc: row.opt_float("inflation_annual_perc")?,
            policy_interest_rate_perc: row.opt_float("policy_interest_rate_perc")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreditRiskRecord {
    pub person_age: i64,
    pub person_income: i64,
    pub person_home_ownership: HomeOwnership,
    pub person_emp_length: Option<f64>,
    pub loan_intent: LoanIntent,
    pub loan_grade: LoanGrade,
    pub loan_amnt: i64,
    pub loan_int_rate: Option<f64>,
    pub loan_status: i64,
    pub loan_percent_income: f64,
    pub cb_person_default_on_file: DefaultOnFile,
    pub cb_person_cred_hist_length: i64,
}

impl Record for CreditRiskRecord {
    const SCHEMA: &'static Schema = &CREDIT_RISK_RECORD;

    fn from_checked(row: &CheckedRow) -> Result<Self, Violation> {
        Ok(Self {
            person_age: row.int("person_age")?,
            person_income: row.int("person_income")?,
            person_home_ownership: row.choice("person_home_ownership", HomeOwnership::NAMES)?,
            person_emp_length: row.opt_float("person_emp_length")?,
            loan_intent: row.choice("loan_intent", LoanIntent::NAMES)?,
            loan_grade: row.choice("loan_grade", LoanGrade::NAMES)?,
            loan_amnt: row.int("loan_amnt")?,
            loan_int_rate: row.opt_float("loan_int_rate")?,
            loan_status: row.int("loan_status")?,
            loan_percent_income: row.float("loan_percent_income")?,
            cb_person_default_on_file: row
                .choice("cb_person_default_on_file", DefaultOnFile::NAMES)?,
            cb_person_cred_hist_length: row.int("cb_person_cred_hist_length")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dataset, Value};
    use crate::schema::check::ViolationKind;

    const CREDIT_COLUMNS: [&str; 12] = [
        "person_age",
        "person_income",
        "person_home_ownership",
        "person_emp_length",
        "loan_intent",
        "loan_grade",
        "loan_amnt",
        "loan_int_rate",
        "loan_status",
        "loan_percent_income",
        "cb_person_default_on_file",
        "cb_person_cred_hist_length",
    ];

    fn credit_row(age: i64, ownership: &str) -> Dataset {
        let values = vec![
            Value::Int(age),
            Value::Int(59000),
            Value::from(ownership),
            Value::Float(5.0),
            Value::from("EDUCATION"),
            Value::from("B"),
            Value::Int(9600),
            Value::Null,
            Value::Int(0),
            Value::Float(0.16),
            Value::from("N"),
            Value::Int(3),
        ];
        Dataset::new(CREDIT_COLUMNS.iter().map(|s| s.to_string()).collect(), vec![values])
    }

    #[test]
    fn enums_round_trip_their_names() {
        for intent in LoanIntent::ALL {
            assert_eq!(intent.as_str().parse::<LoanIntent>(), Ok(intent));
        }
        assert_eq!(HomeOwnership::ALL.len(), HomeOwnership::NAMES.len());
        assert_eq!(LoanGrade::ALL.len(), LoanGrade::NAMES.len());
        assert!("rent".parse::<HomeOwnership>().is_err());
    }

    #[test]
    fn credit_record_builds_typed_fields() {
        let ds = credit_row(44, "MORTGAGE");
        let record = CreditRiskRecord::from_row(ds.row(0).unwrap()).unwrap();
        assert_eq!(record.person_age, 44);
        assert_eq!(record.person_home_ownership, HomeOwnership::Mortgage);
        assert_eq!(record.loan_intent, LoanIntent::Education);
        assert_eq!(record.loan_grade, LoanGrade::B);
        assert_eq!(record.loan_int_rate, None);
        assert_eq!(record.cb_person_default_on_file, DefaultOnFile::N);
    }

    #[test]
    fn credit_record_rejects_age_and_category_together() {
        let ds = credit_row(144, "BOAT");
        let errs = CreditRiskRecord::from_row(ds.row(0).unwrap()).unwrap_err();
        assert_eq!(errs.len(), 2);
        assert_eq!(errs[0].field, "person_age");
        assert!(matches!(errs[1].kind, ViolationKind::NotAllowed(_)));
    }

    #[test]
    fn fx_record_extracts_rates() {
        let ds = Dataset::new(
            vec!["EUR".to_string(), "GBP".to_string()],
            vec![vec![Value::Float(0.95), Value::Float(0.85)]],
        );
        let rate = FxRate::from_row(ds.row(0).unwrap()).unwrap();
        assert_eq!(rate, FxRate { eur: 0.95, gbp: 0.85 });
    }
}
