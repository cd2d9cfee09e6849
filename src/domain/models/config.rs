use serde::{Deserialize, Serialize};

use super::status::Severity;

/// Main configuration structure for refcheck
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Condition check configuration
    #[serde(default)]
    pub check: CheckConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<String>,

    /// Rotation of the log file: daily, hourly or never
    #[serde(default = "default_log_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_log_rotation(),
        }
    }
}

/// Condition check configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CheckConfig {
    /// Aggregate severity at or above which `refcheck check` exits non-zero
    #[serde(default = "default_fail_on")]
    pub fail_on: Severity,

    /// Severity reported for files that exist but are read-only
    #[serde(default = "default_read_only_severity")]
    pub read_only_severity: Severity,

    /// Severity reported for files that do not exist
    #[serde(default = "default_missing_severity")]
    pub missing_severity: Severity,
}

const fn default_fail_on() -> Severity {
    Severity::Error
}

const fn default_read_only_severity() -> Severity {
    Severity::Fatal
}

const fn default_missing_severity() -> Severity {
    Severity::Error
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            fail_on: default_fail_on(),
            read_only_severity: default_read_only_severity(),
            missing_severity: default_missing_severity(),
        }
    }
}
