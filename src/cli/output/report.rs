//! Outputs of the `check` and `config` commands.

use serde::Serialize;

use crate::cli::display::{
    action_failure, action_success, colorize_severity, label, list_table, render_list, truncate,
    CommandOutput,
};
use crate::domain::models::config::Config;
use crate::domain::models::status::{Severity, StatusReport};

const MAX_MESSAGE_WIDTH: usize = 80;

/// Result of `refcheck check`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutput {
    /// Number of distinct files validated.
    pub files_checked: usize,
    /// Names of the checkers that ran, in order.
    pub checkers: Vec<String>,
    /// Threshold the run was judged against.
    pub fail_on: Severity,
    /// Whether the merged severity stayed below `fail_on`.
    pub passed: bool,
    /// Merged report.
    pub report: StatusReport,
}

impl CheckOutput {
    /// Judge `report` against `fail_on`.
    pub fn new(
        report: StatusReport,
        fail_on: Severity,
        files_checked: usize,
        checkers: Vec<String>,
    ) -> Self {
        Self {
            files_checked,
            checkers,
            fail_on,
            passed: report.severity() < fail_on,
            report,
        }
    }
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let mut lines = Vec::new();

        let summary = format!(
            "{} file(s) checked, merged severity {}",
            self.files_checked,
            colorize_severity(self.report.severity())
        );
        lines.push(if self.passed {
            action_success(&summary)
        } else {
            action_failure(&summary)
        });

        if !self.report.is_empty() {
            let mut table = list_table(&["severity", "checker", "subject", "message"]);
            for entry in self.report.entries() {
                table.add_row(vec![
                    colorize_severity(entry.severity).to_string(),
                    entry.checker.clone().unwrap_or_else(|| "-".to_string()),
                    entry.context.clone().unwrap_or_else(|| "-".to_string()),
                    truncate(&entry.message, MAX_MESSAGE_WIDTH),
                ]);
            }
            lines.push(String::new());
            lines.push(render_list("finding", &table, self.report.len()));
        }

        if !self.passed {
            lines.push(String::new());
            lines.push(format!(
                "{} {}",
                label("Threshold"),
                colorize_severity(self.fail_on)
            ));
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Result of `refcheck config show`.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigOutput {
    /// Effective configuration.
    pub config: Config,
}

impl CommandOutput for ConfigOutput {
    fn to_human(&self) -> String {
        serde_yaml::to_string(&self.config).unwrap_or_default()
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or_default()
    }
}
