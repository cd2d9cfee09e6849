//! Capabilities supplied by callers: condition checkers and progress monitors.

pub mod checker;
pub mod progress;

pub use checker::{CheckerKey, ConditionChecker};
pub use progress::{CancellationFlag, NullProgressMonitor, ProgressMonitor, SubProgressMonitor};
