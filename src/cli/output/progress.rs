//! Progress bar utilities using indicatif for terminal output
//!
//! [`BarProgressMonitor`] adapts an indicatif bar to the
//! [`ProgressMonitor`] channel that condition checks report through.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::ports::progress::{CancellationFlag, ProgressMonitor};

const PROGRESS_TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {percent:>3}% {msg}";
const PROGRESS_CHARS: &str = "█▓▒░ ";

/// Bar positions per unit of work, so fractional sub-monitor work still moves
/// the bar.
const TICKS_PER_UNIT: f64 = 1000.0;

/// Create a progress bar styled for condition checks
pub fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_TEMPLATE) {
        pb.set_style(style.progress_chars(PROGRESS_CHARS));
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// [`ProgressMonitor`] that draws an indicatif progress bar
pub struct BarProgressMonitor {
    bar: ProgressBar,
    worked: Mutex<f64>,
    flag: CancellationFlag,
}

impl BarProgressMonitor {
    /// Monitor drawing to the terminal
    pub fn new(flag: CancellationFlag) -> Self {
        Self::with_bar(create_progress_bar(), flag)
    }

    /// Monitor that tracks progress without drawing (for testing)
    pub fn hidden(flag: CancellationFlag) -> Self {
        Self::with_bar(ProgressBar::hidden(), flag)
    }

    fn with_bar(bar: ProgressBar, flag: CancellationFlag) -> Self {
        Self {
            bar,
            worked: Mutex::new(0.0),
            flag,
        }
    }

    /// Units of work reported so far
    pub fn worked_units(&self) -> f64 {
        self.worked.lock().map_or(0.0, |w| *w)
    }

    /// Underlying bar
    pub const fn bar(&self) -> &ProgressBar {
        &self.bar
    }
}

impl ProgressMonitor for BarProgressMonitor {
    fn begin_task(&self, name: &str, total_work: u64) {
        if let Ok(mut worked) = self.worked.lock() {
            *worked = 0.0;
        }
        self.bar.set_length(total_work.saturating_mul(TICKS_PER_UNIT as u64));
        self.bar.set_position(0);
        self.bar.set_message(name.to_string());
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn internal_worked(&self, work: f64) {
        if let Ok(mut worked) = self.worked.lock() {
            *worked += work;
            self.bar.set_position((*worked * TICKS_PER_UNIT).round() as u64);
        }
    }

    fn sub_task(&self, name: &str) {
        self.bar.set_message(name.to_string());
    }

    fn done(&self) {
        self.bar.finish_and_clear();
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
