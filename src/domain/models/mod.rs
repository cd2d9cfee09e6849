//! Domain models.

pub mod config;
pub mod status;

pub use config::{CheckConfig, Config, LoggingConfig};
pub use status::{Severity, StatusEntry, StatusReport};
