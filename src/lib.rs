//! refcheck - shared condition checking for multi-participant edits
//!
//! Several independent participants often contribute to one edit session,
//! and many of their preconditions overlap: every participant cares that the
//! files it touches are writable, but each file should be validated only
//! once. refcheck gives the session a [`ConditionCheckRegistry`] holding at
//! most one checker per type. Participants look up the shared checker and
//! feed it, then the session owner runs every checker once and gets a single
//! merged [`StatusReport`].
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): status model, checker and progress capabilities, errors
//! - **Service Layer** (`services`): the registry and built-in checkers
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```
//! use refcheck::{ConditionCheckRegistry, NullProgressMonitor, Severity, ValidateEditChecker};
//!
//! let mut registry = ConditionCheckRegistry::new();
//! registry
//!     .get_or_insert_with(ValidateEditChecker::new)
//!     .add_file("/definitely/not/here.rs");
//!
//! let report = registry.check_all(&NullProgressMonitor::new()).unwrap();
//! assert_eq!(report.severity(), Severity::Error);
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{CheckError, CheckResult};
pub use domain::models::{CheckConfig, Config, LoggingConfig, Severity, StatusEntry, StatusReport};
pub use domain::ports::{
    CancellationFlag, CheckerKey, ConditionChecker, NullProgressMonitor, ProgressMonitor,
    SubProgressMonitor,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ConditionCheckRegistry, ValidateEditChecker};
