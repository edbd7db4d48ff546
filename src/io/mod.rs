//! Input/output helpers.
//!
//! - CSV ingest + missing-value normalization (`ingest`)
//! - JSON report export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
