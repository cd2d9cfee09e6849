//! Progress reporting and cooperative cancellation.
//!
//! Checks receive a [`ProgressMonitor`] explicitly. Monitors take `&self`
//! everywhere so a parent can be shared by reference with the sub-monitors
//! carved out of it.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Channel through which long-running checks report progress and learn about
/// cancellation.
pub trait ProgressMonitor {
    /// Start the main task with `total_work` units.
    fn begin_task(&self, name: &str, total_work: u64);

    /// Advance by `work` units.
    #[allow(clippy::cast_precision_loss)]
    fn worked(&self, work: u64) {
        self.internal_worked(work as f64);
    }

    /// Advance by a possibly fractional amount of work.
    fn internal_worked(&self, work: f64);

    /// Describe the step currently running.
    fn sub_task(&self, _name: &str) {}

    /// The task is complete. Further `worked` calls are ignored.
    fn done(&self);

    /// Whether cancellation was requested.
    fn is_canceled(&self) -> bool;

    /// Request or clear cancellation.
    fn set_canceled(&self, canceled: bool);
}

/// Shared cancellation switch.
///
/// Clones refer to the same flag, so a signal handler on another thread can
/// flip it while checks run.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    /// A fresh, unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Clear a previous request.
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn set(&self, cancelled: bool) {
        self.0.store(cancelled, Ordering::SeqCst);
    }
}

/// Monitor that discards progress and only tracks cancellation.
#[derive(Debug, Clone, Default)]
pub struct NullProgressMonitor {
    flag: CancellationFlag,
}

impl NullProgressMonitor {
    /// Monitor with its own private flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Monitor observing an externally owned flag.
    pub const fn with_flag(flag: CancellationFlag) -> Self {
        Self { flag }
    }

    /// The flag this monitor reads.
    pub const fn flag(&self) -> &CancellationFlag {
        &self.flag
    }
}

impl ProgressMonitor for NullProgressMonitor {
    fn begin_task(&self, _name: &str, _total_work: u64) {}

    fn internal_worked(&self, _work: f64) {}

    fn done(&self) {}

    fn is_canceled(&self) -> bool {
        self.flag.is_cancelled()
    }

    fn set_canceled(&self, canceled: bool) {
        self.flag.set(canceled);
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct SubState {
    scale: f64,
    sent: f64,
    begun: bool,
    done: bool,
}

/// A monitor bound to `parent_ticks` units of a parent monitor.
///
/// Whatever total the child announces in `begin_task` is scaled onto those
/// ticks. `done` tops the parent up to exactly `parent_ticks`, so the parent
/// always advances by the full slice even if the child under-reports.
pub struct SubProgressMonitor<'a> {
    parent: &'a dyn ProgressMonitor,
    parent_ticks: f64,
    state: Cell<SubState>,
}

impl<'a> SubProgressMonitor<'a> {
    /// Carve `parent_ticks` units out of `parent`.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(parent: &'a dyn ProgressMonitor, parent_ticks: u64) -> Self {
        Self {
            parent,
            parent_ticks: parent_ticks as f64,
            state: Cell::new(SubState::default()),
        }
    }
}

impl ProgressMonitor for SubProgressMonitor<'_> {
    #[allow(clippy::cast_precision_loss)]
    fn begin_task(&self, name: &str, total_work: u64) {
        let mut state = self.state.get();
        // Nested begin_task calls keep the first scale.
        if state.begun {
            return;
        }
        state.begun = true;
        state.scale = if total_work == 0 {
            0.0
        } else {
            self.parent_ticks / total_work as f64
        };
        self.state.set(state);

        if !name.is_empty() {
            self.parent.sub_task(name);
        }
    }

    fn internal_worked(&self, work: f64) {
        let mut state = self.state.get();
        if state.done || !state.begun || work <= 0.0 {
            return;
        }
        let delta = (work * state.scale).min(self.parent_ticks - state.sent);
        if delta > 0.0 {
            self.parent.internal_worked(delta);
            state.sent += delta;
            self.state.set(state);
        }
    }

    fn sub_task(&self, name: &str) {
        self.parent.sub_task(name);
    }

    fn done(&self) {
        let mut state = self.state.get();
        if state.done {
            return;
        }
        let remaining = self.parent_ticks - state.sent;
        if remaining > 0.0 {
            self.parent.internal_worked(remaining);
            state.sent = self.parent_ticks;
        }
        state.done = true;
        self.state.set(state);
    }

    fn is_canceled(&self) -> bool {
        self.parent.is_canceled()
    }

    fn set_canceled(&self, canceled: bool) {
        self.parent.set_canceled(canceled);
    }
}
