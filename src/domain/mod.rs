//! Domain layer: status model, checker capability, progress channel, errors.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{CheckError, CheckResult};
