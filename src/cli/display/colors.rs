//! Severity color mapping for CLI output.
//!
//! Coloring goes through `console`, which drops styling when the output is
//! not a terminal.

use console::{style, StyledObject};

use crate::domain::models::status::Severity;

/// Returns a styled string for a severity.
///
/// Color scheme:
/// - Green:  ok
/// - Blue:   info
/// - Yellow: warning
/// - Red:    error
/// - Red bold + reverse: fatal
pub fn colorize_severity(severity: Severity) -> StyledObject<&'static str> {
    let label = severity.as_str();
    match severity {
        Severity::Ok => style(label).green().bold(),
        Severity::Info => style(label).blue(),
        Severity::Warning => style(label).yellow(),
        Severity::Error => style(label).red(),
        Severity::Fatal => style(label).red().bold().reverse(),
    }
}

/// Styled label for detail views (bold + dimmed colon).
pub fn label(name: &str) -> String {
    format!("{}{}", style(name).bold(), style(":").dim())
}
