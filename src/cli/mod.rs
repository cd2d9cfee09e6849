//! Command-line interface.

pub mod commands;
pub mod display;
pub mod output;
pub mod types;

pub use types::{Cli, Commands, ConfigCommands};

/// Checks ran and the merged severity stayed below the threshold.
pub const EXIT_OK: i32 = 0;
/// Checks ran and the merged severity reached the threshold.
pub const EXIT_CHECK_FAILED: i32 = 1;
/// The command failed before producing a verdict.
pub const EXIT_ERROR: i32 = 2;
/// The user interrupted the checks.
pub const EXIT_CANCELLED: i32 = 130;

/// Report a command failure and return the exit code to use.
pub fn handle_error(err: &anyhow::Error, json: bool) -> i32 {
    if json {
        let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
        eprintln!(
            "{}",
            serde_json::json!({ "error": err.to_string(), "causes": chain })
        );
    } else {
        eprintln!("{} {:#}", console::style("Error:").red().bold(), err);
    }
    EXIT_ERROR
}
