//! Domain errors for condition checking.

use thiserror::Error;

use super::ports::checker::CheckerKey;

/// Errors raised by [`ConditionCheckRegistry`](crate::services::ConditionCheckRegistry).
#[derive(Debug, Error)]
pub enum CheckError {
    /// A checker with the same key is already registered. The existing
    /// checker stays in place.
    #[error("A condition checker of type {key} is already registered")]
    DuplicateChecker {
        /// Key of the rejected checker.
        key: CheckerKey,
    },

    /// The caller requested cancellation while checks were running.
    #[error("Condition checking was cancelled")]
    Cancelled,

    /// A checker failed. The checker's own error is carried unchanged.
    #[error(transparent)]
    Checker(anyhow::Error),
}

impl CheckError {
    /// True for [`CheckError::Cancelled`].
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result alias for condition-checking operations.
pub type CheckResult<T> = Result<T, CheckError>;
