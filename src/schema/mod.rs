//! Declarative row schemas.
//!
//! A schema is a static table of field definitions. Validation is a single
//! generic pass over that table (`Schema::check_row`), and typed records are
//! built from the checked output (`Record`).

use std::fmt;

use serde::Serialize;

pub mod check;
pub mod records;
pub mod tables;

pub use check::*;
pub use records::*;
pub use tables::*;

/// Primitive type of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldType {
    Integer,
    Float,
    Text,
    /// Text restricted to a closed set of values.
    Enum(&'static [&'static str]),
}

impl FieldType {
    pub fn label(self) -> &'static str {
        match self {
            FieldType::Integer => "integer",
            FieldType::Float => "number",
            FieldType::Text | FieldType::Enum(_) => "string",
        }
    }
}

/// Numeric bound on a field value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", content = "limit", rename_all = "lowercase")]
pub enum Bound {
    Gt(f64),
    Ge(f64),
    Lt(f64),
    Le(f64),
}

impl Bound {
    pub fn admits(self, v: f64) -> bool {
        match self {
            Bound::Gt(limit) => v > limit,
            Bound::Ge(limit) => v >= limit,
            Bound::Lt(limit) => v < limit,
            Bound::Le(limit) => v <= limit,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Gt(limit) => write!(f, "greater than {limit}"),
            Bound::Ge(limit) => write!(f, "greater than or equal to {limit}"),
            Bound::Lt(limit) => write!(f, "less than {limit}"),
            Bound::Le(limit) => write!(f, "less than or equal to {limit}"),
        }
    }
}

/// One column of a schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDef {
    pub name: &'static str,
    pub ty: FieldType,
    /// Optional fields may be absent; when present their constraints still apply.
    pub required: bool,
    pub bounds: &'static [Bound],
}

impl FieldDef {
    pub const fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: true,
            bounds: &[],
        }
    }

    pub const fn optional(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: false,
            bounds: &[],
        }
    }

    pub const fn bounded(self, bounds: &'static [Bound]) -> Self {
        Self { bounds, ..self }
    }
}

/// A fixed, ordered set of field definitions describing one valid row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldDef],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}
