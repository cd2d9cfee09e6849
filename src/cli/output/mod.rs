//! Command outputs and terminal progress.

pub mod progress;
pub mod report;

pub use progress::{create_progress_bar, BarProgressMonitor};
pub use report::{CheckOutput, ConfigOutput};
