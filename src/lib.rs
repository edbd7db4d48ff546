//! `dataset-validator` library crate.
//!
//! The binary (`dsv`) is a thin wrapper around this library so that:
//!
//! - validation is testable without spawning processes
//! - callers can get a `ValidationReport` back and decide exit behavior themselves
//! - each dataset kind's schema, profile and checks stay easy to find

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod schema;
pub mod validate;
