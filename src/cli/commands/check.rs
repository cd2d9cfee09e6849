//! `refcheck check` command handler.

use std::future::Future;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::display::output;
use crate::cli::output::{BarProgressMonitor, CheckOutput};
use crate::cli::{EXIT_CANCELLED, EXIT_CHECK_FAILED, EXIT_OK};
use crate::domain::errors::{CheckError, CheckResult};
use crate::domain::models::config::{CheckConfig, Config};
use crate::domain::models::status::Severity;
use crate::domain::ports::progress::{CancellationFlag, NullProgressMonitor, ProgressMonitor};
use crate::infrastructure::config::ConfigError;
use crate::services::{ConditionCheckRegistry, ValidateEditChecker};

/// Build a registry for `files`, run it, and judge the result against
/// `fail_on`.
pub fn run_checks(
    config: &CheckConfig,
    files: &[PathBuf],
    fail_on: Severity,
    progress: &dyn ProgressMonitor,
) -> CheckResult<CheckOutput> {
    let mut registry = ConditionCheckRegistry::new();
    registry
        .get_or_insert_with(|| ValidateEditChecker::from_config(config))
        .add_files(files.iter().cloned());

    let report = registry.check_all(progress)?;

    let checkers = registry
        .keys()
        .filter_map(|key| registry.get_by_key(&key))
        .map(|checker| checker.name().to_string())
        .collect();
    let files_checked = registry
        .get::<ValidateEditChecker>()
        .map_or(0, |checker| checker.files().len());

    Ok(CheckOutput::new(report, fail_on, files_checked, checkers))
}

/// Forward interrupts from `next_interrupt` to `flag`.
///
/// The first interrupt cancels the run cooperatively. Returns `true` when a
/// second one arrives before the run finishes, and `false` when no more
/// interrupts can be received.
async fn relay_interrupts<F, Fut>(mut next_interrupt: F, flag: CancellationFlag) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    let mut interrupts = 0;
    while next_interrupt().await.is_ok() {
        interrupts += 1;
        if interrupts > 1 {
            return true;
        }
        tracing::warn!("Interrupt received; stopping after the current checker");
        flag.cancel();
    }
    false
}

/// Handle check command
///
/// Returns the process exit code.
pub async fn handle_check(
    config: &Config,
    files: Vec<PathBuf>,
    fail_on: Option<Severity>,
    no_progress: bool,
    json: bool,
) -> Result<i32> {
    let fail_on = fail_on.unwrap_or(config.check.fail_on);
    if fail_on == Severity::Ok {
        return Err(ConfigError::InvalidFailOn(fail_on).into());
    }
    let check_config = config.check.clone();
    let show_progress = !no_progress && !json && console::Term::stderr().is_term();

    let flag = CancellationFlag::new();
    let signal_flag = flag.clone();
    let signal_task = tokio::spawn(async move {
        if relay_interrupts(tokio::signal::ctrl_c, signal_flag).await {
            eprintln!("Interrupted again; exiting without waiting for the current checker");
            std::process::exit(EXIT_CANCELLED);
        }
    });

    let outcome = tokio::task::spawn_blocking(move || {
        if show_progress {
            let monitor = BarProgressMonitor::new(flag);
            let outcome = run_checks(&check_config, &files, fail_on, &monitor);
            monitor.bar().finish_and_clear();
            outcome
        } else {
            let monitor = NullProgressMonitor::with_flag(flag);
            run_checks(&check_config, &files, fail_on, &monitor)
        }
    })
    .await
    .context("Condition check task did not complete")?;
    signal_task.abort();

    match outcome {
        Ok(result) => {
            output(&result, json);
            Ok(if result.passed {
                EXIT_OK
            } else {
                EXIT_CHECK_FAILED
            })
        }
        Err(CheckError::Cancelled) => {
            if json {
                println!("{}", serde_json::json!({ "cancelled": true }));
            } else {
                eprintln!("Condition checks cancelled");
            }
            Ok(EXIT_CANCELLED)
        }
        Err(err) => Err(anyhow::Error::new(err).context("Condition checks failed")),
    }
}
