//! Registry of shared condition checkers.
//!
//! Provides [`ConditionCheckRegistry`], the context handed to every
//! participant of an edit session. Participants look up (or register) the
//! checkers they need, feed them, and the session owner finally runs
//! [`check_all`](ConditionCheckRegistry::check_all) once to get a single
//! merged [`StatusReport`].

use std::any::Any;
use std::collections::HashMap;
use std::time::Instant;

use crate::domain::errors::{CheckError, CheckResult};
use crate::domain::models::status::StatusReport;
use crate::domain::ports::checker::{CheckerKey, ConditionChecker};
use crate::domain::ports::progress::{ProgressMonitor, SubProgressMonitor};

struct Registered {
    key: CheckerKey,
    checker: Box<dyn ConditionChecker>,
}

fn as_any(checker: &dyn ConditionChecker) -> &dyn Any {
    checker
}

fn as_any_mut(checker: &mut dyn ConditionChecker) -> &mut dyn Any {
    checker
}

/// Keyed collection of condition checkers, at most one per checker type.
///
/// Checkers run in registration order.
#[derive(Default)]
pub struct ConditionCheckRegistry {
    checkers: Vec<Registered>,
    index: HashMap<CheckerKey, usize>,
}

impl ConditionCheckRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `checker` under its type key.
    ///
    /// Fails with [`CheckError::DuplicateChecker`] if a checker of the same
    /// type is already present; the existing checker is kept.
    pub fn add<C: ConditionChecker>(&mut self, checker: C) -> CheckResult<()> {
        let key = CheckerKey::of::<C>();
        if self.index.contains_key(&key) {
            tracing::debug!(checker = %key, "Rejecting duplicate condition checker");
            return Err(CheckError::DuplicateChecker { key });
        }

        tracing::debug!(checker = %key, "Registering condition checker");
        self.index.insert(key, self.checkers.len());
        self.checkers.push(Registered {
            key,
            checker: Box::new(checker),
        });
        Ok(())
    }

    /// The registered checker of type `C`, if any.
    pub fn get<C: ConditionChecker>(&self) -> Option<&C> {
        let idx = *self.index.get(&CheckerKey::of::<C>())?;
        as_any(self.checkers[idx].checker.as_ref()).downcast_ref::<C>()
    }

    /// Mutable access to the registered checker of type `C`, if any.
    pub fn get_mut<C: ConditionChecker>(&mut self) -> Option<&mut C> {
        let idx = *self.index.get(&CheckerKey::of::<C>())?;
        as_any_mut(self.checkers[idx].checker.as_mut()).downcast_mut::<C>()
    }

    /// The registered checker of type `C`, registering `init()` first if
    /// none is present.
    pub fn get_or_insert_with<C, F>(&mut self, init: F) -> &mut C
    where
        C: ConditionChecker,
        F: FnOnce() -> C,
    {
        let key = CheckerKey::of::<C>();
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                tracing::debug!(checker = %key, "Registering condition checker");
                self.checkers.push(Registered {
                    key,
                    checker: Box::new(init()),
                });
                let idx = self.checkers.len() - 1;
                self.index.insert(key, idx);
                idx
            }
        };
        // The index maps `key` to a checker of type `C`.
        as_any_mut(self.checkers[idx].checker.as_mut())
            .downcast_mut::<C>()
            .unwrap_or_else(|| unreachable!("checker registered under {key} has another type"))
    }

    /// The checker registered under `key`, as a trait object.
    pub fn get_by_key(&self, key: &CheckerKey) -> Option<&dyn ConditionChecker> {
        self.index
            .get(key)
            .map(|&idx| self.checkers[idx].checker.as_ref())
    }

    /// Whether a checker is registered under `key`.
    pub fn contains(&self, key: &CheckerKey) -> bool {
        self.index.contains_key(key)
    }

    /// Keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = CheckerKey> + '_ {
        self.checkers.iter().map(|r| r.key)
    }

    /// Number of registered checkers.
    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    /// True when no checker is registered.
    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }

    /// Run every registered checker and merge the results.
    ///
    /// `progress` is given one unit per checker; each checker sees a
    /// sub-monitor covering its unit. Cancellation is polled after every
    /// checker: if it was requested the run stops with
    /// [`CheckError::Cancelled`] and the partial report is dropped. A checker
    /// failure stops the run and is returned as [`CheckError::Checker`].
    pub fn check_all(&self, progress: &dyn ProgressMonitor) -> CheckResult<StatusReport> {
        let total = self.checkers.len();
        tracing::info!(checker_count = total, "Starting condition checks");

        let run_start = Instant::now();
        let mut result = StatusReport::new();
        progress.begin_task("Checking conditions", total as u64);

        for (position, registered) in self.checkers.iter().enumerate() {
            let checker = registered.checker.as_ref();
            let start = Instant::now();
            let sub = SubProgressMonitor::new(progress, 1);

            let mut status = match checker.check(&sub) {
                Ok(status) => status,
                Err(err) => {
                    tracing::warn!(
                        checker = checker.name(),
                        error = %err,
                        duration_ms = start.elapsed().as_millis() as u64,
                        "Condition checker failed"
                    );
                    return Err(CheckError::Checker(err));
                }
            };
            sub.done();

            tracing::debug!(
                checker = checker.name(),
                severity = %status.severity(),
                entries = status.len(),
                duration_ms = start.elapsed().as_millis() as u64,
                "Condition checker complete"
            );

            status.attribute_to(checker.name());
            result.merge(status);

            if progress.is_canceled() {
                tracing::warn!(
                    completed = position + 1,
                    remaining = total - position - 1,
                    "Condition checks cancelled"
                );
                return Err(CheckError::Cancelled);
            }
        }

        progress.done();
        tracing::info!(
            severity = %result.severity(),
            entries = result.len(),
            elapsed_ms = run_start.elapsed().as_millis() as u64,
            "Condition checks complete"
        );
        Ok(result)
    }
}
