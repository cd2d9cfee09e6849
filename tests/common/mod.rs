//! Common test utilities for integration tests
//!
//! Provides scripted checkers and a recording progress monitor shared by
//! the registry tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use refcheck::{CancellationFlag, ConditionChecker, ProgressMonitor, Severity, StatusReport};

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Shared log of which checkers ran, in order.
pub type CallLog = Rc<RefCell<Vec<&'static str>>>;

pub fn call_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Behaviour of a scripted checker.
pub enum Script {
    Report(Severity, &'static str),
    Fail(&'static str),
    CancelAfter(Severity, &'static str),
}

/// Defines a distinct checker type per name so each gets its own key.
macro_rules! scripted_checker {
    ($name:ident) => {
        pub struct $name {
            pub log: CallLog,
            pub script: Script,
        }

        impl $name {
            pub fn new(log: &CallLog, script: Script) -> Self {
                Self {
                    log: Rc::clone(log),
                    script,
                }
            }
        }

        impl ConditionChecker for $name {
            fn check(&self, progress: &dyn ProgressMonitor) -> anyhow::Result<StatusReport> {
                self.log.borrow_mut().push(stringify!($name));
                progress.begin_task(stringify!($name), 2);
                progress.worked(1);
                match &self.script {
                    Script::Report(severity, message) => {
                        progress.worked(1);
                        Ok(report(*severity, message))
                    }
                    Script::Fail(message) => Err(anyhow::Error::new(ScriptedFailure(message))),
                    Script::CancelAfter(severity, message) => {
                        progress.set_canceled(true);
                        Ok(report(*severity, message))
                    }
                }
            }
        }
    };
}

scripted_checker!(CheckerA);
scripted_checker!(CheckerB);
scripted_checker!(CheckerC);
scripted_checker!(CheckerD);

fn report(severity: Severity, message: &str) -> StatusReport {
    if severity == Severity::Ok && message.is_empty() {
        StatusReport::ok()
    } else {
        StatusReport::with_entry(severity, message)
    }
}

/// Error type raised by `Script::Fail`, so tests can downcast it.
#[derive(Debug, thiserror::Error)]
#[error("scripted failure: {0}")]
pub struct ScriptedFailure(pub &'static str);

/// Progress monitor that records every call.
#[derive(Default)]
pub struct RecordingMonitor {
    pub begun: RefCell<Vec<(String, u64)>>,
    pub worked: RefCell<f64>,
    pub sub_tasks: RefCell<Vec<String>>,
    pub done_calls: RefCell<u32>,
    pub flag: CancellationFlag,
}

impl ProgressMonitor for RecordingMonitor {
    fn begin_task(&self, name: &str, total_work: u64) {
        self.begun.borrow_mut().push((name.to_string(), total_work));
    }

    fn internal_worked(&self, work: f64) {
        *self.worked.borrow_mut() += work;
    }

    fn sub_task(&self, name: &str) {
        self.sub_tasks.borrow_mut().push(name.to_string());
    }

    fn done(&self) {
        *self.done_calls.borrow_mut() += 1;
    }

    fn is_canceled(&self) -> bool {
        self.flag.is_cancelled()
    }

    fn set_canceled(&self, canceled: bool) {
        if canceled {
            self.flag.cancel();
        } else {
            self.flag.reset();
        }
    }
}
