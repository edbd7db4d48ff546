//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - normalized cell values (`Value`) and loaded datasets (`Dataset`, `Row`)
//! - the dataset kinds the tool validates (`DatasetKind`)
//! - resolved run settings (`RunConfig`)

pub mod types;

pub use types::*;
