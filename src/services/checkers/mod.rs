//! Built-in condition checkers.

pub mod validate_edit;

pub use validate_edit::ValidateEditChecker;
