//! The three dataset schemas.
//!
//! These are compile-time constants; nothing about them is configurable.

use super::records::{DefaultOnFile, HomeOwnership, LoanGrade, LoanIntent};
use super::{Bound, FieldDef, FieldType, Schema};

const EUR_RANGE: &[Bound] = &[Bound::Gt(0.8), Bound::Lt(1.2)];
const GBP_RANGE: &[Bound] = &[Bound::Gt(0.7), Bound::Lt(1.1)];
const YEAR_RANGE: &[Bound] = &[Bound::Ge(2010.0), Bound::Le(2023.0)];
const ADULT_AGE: &[Bound] = &[Bound::Ge(18.0), Bound::Le(100.0)];
const NON_NEGATIVE: &[Bound] = &[Bound::Ge(0.0)];
const POSITIVE: &[Bound] = &[Bound::Gt(0.0)];
const UNIT_INTERVAL: &[Bound] = &[Bound::Ge(0.0), Bound::Le(1.0)];

/// Daily USD-based exchange rates.
pub static FX_RATE: Schema = Schema {
    name: "FxRate",
    fields: &[
        FieldDef::required("EUR", FieldType::Float).bounded(EUR_RANGE),
        FieldDef::required("GBP", FieldType::Float).bounded(GBP_RANGE),
    ],
};

/// World Bank indicators, one row per (country, year).
pub static ECONOMIC_INDICATOR: Schema = Schema {
    name: "EconomicIndicator",
    fields: &[
        FieldDef::required("country_name", FieldType::Text),
        FieldDef::required("year", FieldType::Integer).bounded(YEAR_RANGE),
        FieldDef::optional("gdp_current_usd", FieldType::Float).bounded(POSITIVE),
        FieldDef::optional("inflation_annual_perc", FieldType::Float),
        FieldDef::optional("policy_interest_rate_perc", FieldType::Float),
    ],
};

/// Loan applications with credit-bureau history.
pub static CREDIT_RISK_RECORD: Schema = Schema {
    name: "CreditRiskRecord",
    fields: &[
        FieldDef::required("person_age", FieldType::Integer).bounded(ADULT_AGE),
        FieldDef::required("person_income", FieldType::Integer).bounded(NON_NEGATIVE),
        FieldDef::required("person_home_ownership", FieldType::Enum(HomeOwnership::NAMES)),
        FieldDef::optional("person_emp_length", FieldType::Float).bounded(NON_NEGATIVE),
        FieldDef::required("loan_intent", FieldType::Enum(LoanIntent::NAMES)),
        FieldDef::required("loan_grade", FieldType::Enum(LoanGrade::NAMES)),
        FieldDef::required("loan_amnt", FieldType::Integer).bounded(NON_NEGATIVE),
        FieldDef::optional("loan_int_rate", FieldType::Float).bounded(NON_NEGATIVE),
        FieldDef::required("loan_status", FieldType::Integer).bounded(UNIT_INTERVAL),
        FieldDef::required("loan_percent_income", FieldType::Float).bounded(UNIT_INTERVAL),
        FieldDef::required("cb_person_default_on_file", FieldType::Enum(DefaultOnFile::NAMES)),
        FieldDef::required("cb_person_cred_hist_length", FieldType::Integer).bounded(NON_NEGATIVE),
    ],
};
