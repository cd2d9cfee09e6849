//! Severity-leveled status reports produced by condition checkers.
//!
//! A [`StatusReport`] is an ordered list of [`StatusEntry`] values. Its
//! overall severity is the worst severity among its entries, and merging two
//! reports appends entries so that nothing a checker reported is lost.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ordered outcome level. Merging always keeps the maximum.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Nothing to report.
    #[default]
    Ok,
    /// Informational; does not block anything.
    Info,
    /// The operation can proceed but the user should look at it.
    Warning,
    /// The operation can proceed only if the user explicitly accepts it.
    Error,
    /// The operation must not proceed.
    Fatal,
}

impl Severity {
    /// All severities, lowest first.
    pub const ALL: [Self; 5] = [
        Self::Ok,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Fatal,
    ];

    /// Lowercase name as used in configuration and JSON output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }

    /// Whether this severity indicates a problem (warning or worse).
    pub fn is_problem(self) -> bool {
        self >= Self::Warning
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ok" => Ok(Self::Ok),
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            other => Err(format!(
                "invalid severity '{other}': expected one of ok, info, warning, error, fatal"
            )),
        }
    }
}

/// A single finding inside a [`StatusReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    /// Severity of this finding.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// What the finding is about, e.g. a file path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Name of the checker that produced the finding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checker: Option<String>,
}

impl StatusEntry {
    /// Create an entry with no context or checker attribution.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            context: None,
            checker: None,
        }
    }

    /// Attach a context string.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Attribute the entry to a checker.
    #[must_use]
    pub fn with_checker(mut self, checker: impl Into<String>) -> Self {
        self.checker = Some(checker.into());
        self
    }
}

impl fmt::Display for StatusEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(context) => write!(f, "[{}] {}: {}", self.severity, context, self.message),
            None => write!(f, "[{}] {}", self.severity, self.message),
        }
    }
}

/// Outcome of one or more condition checks.
///
/// Deserialization recomputes the severity from the entries, so a serialized
/// `severity` field that disagrees with them is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SerializedReport")]
pub struct StatusReport {
    severity: Severity,
    entries: Vec<StatusEntry>,
}

#[derive(Deserialize)]
struct SerializedReport {
    #[serde(default)]
    entries: Vec<StatusEntry>,
}

impl From<SerializedReport> for StatusReport {
    fn from(raw: SerializedReport) -> Self {
        let mut report = Self::new();
        report.extend(raw.entries);
        report
    }
}

impl StatusReport {
    /// An empty report with [`Severity::Ok`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias for [`StatusReport::new`].
    pub fn ok() -> Self {
        Self::new()
    }

    /// A report holding a single entry of the given severity.
    pub fn with_entry(severity: Severity, message: impl Into<String>) -> Self {
        let mut report = Self::new();
        report.add_entry(StatusEntry::new(severity, message));
        report
    }

    /// A report holding one informational entry.
    pub fn info(message: impl Into<String>) -> Self {
        Self::with_entry(Severity::Info, message)
    }

    /// A report holding one warning.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_entry(Severity::Warning, message)
    }

    /// A report holding one error.
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_entry(Severity::Error, message)
    }

    /// A report holding one fatal error.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::with_entry(Severity::Fatal, message)
    }

    /// Worst severity among all entries, `Ok` if there are none.
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Entries in the order they were added.
    pub fn entries(&self) -> &[StatusEntry] {
        &self.entries
    }

    /// Append an entry, raising the report severity if needed.
    pub fn add_entry(&mut self, entry: StatusEntry) {
        self.severity = self.severity.max(entry.severity);
        self.entries.push(entry);
    }

    /// Convenience for `add_entry(StatusEntry::new(..).with_context(..))`.
    pub fn add(&mut self, severity: Severity, message: impl Into<String>, context: Option<String>) {
        let mut entry = StatusEntry::new(severity, message);
        entry.context = context;
        self.add_entry(entry);
    }

    /// Merge `other` into this report.
    ///
    /// Entries of `other` are appended after the existing ones and the
    /// severity becomes the worse of the two.
    pub fn merge(&mut self, other: Self) {
        self.severity = self.severity.max(other.severity);
        self.entries.extend(other.entries);
    }

    /// Stamp every entry that has no checker attribution with `checker`.
    pub fn attribute_to(&mut self, checker: &str) {
        for entry in self.entries.iter_mut().filter(|e| e.checker.is_none()) {
            entry.checker = Some(checker.to_string());
        }
    }

    /// True when nothing worse than `Info` was reported.
    pub fn is_ok(&self) -> bool {
        !self.severity.is_problem()
    }

    /// True when the severity is `Warning` or worse.
    pub fn has_warning(&self) -> bool {
        self.severity >= Severity::Warning
    }

    /// True when the severity is `Error` or worse.
    pub fn has_error(&self) -> bool {
        self.severity >= Severity::Error
    }

    /// True when the severity is `Fatal`.
    pub fn has_fatal_error(&self) -> bool {
        self.severity == Severity::Fatal
    }

    /// First entry carrying the report's highest severity.
    pub fn entry_with_highest_severity(&self) -> Option<&StatusEntry> {
        self.entries.iter().find(|e| e.severity == self.severity)
    }

    /// First entry whose severity is at least `severity`.
    pub fn entry_matching_severity(&self, severity: Severity) -> Option<&StatusEntry> {
        self.entries.iter().find(|e| e.severity >= severity)
    }

    /// Message of the first entry whose severity is at least `severity`.
    pub fn message_matching_severity(&self, severity: Severity) -> Option<&str> {
        self.entry_matching_severity(severity)
            .map(|e| e.message.as_str())
    }

    /// All entries whose severity is at least `severity`.
    pub fn entries_at_least(&self, severity: Severity) -> impl Iterator<Item = &StatusEntry> {
        self.entries.iter().filter(move |e| e.severity >= severity)
    }

    /// Entry messages joined with `"; "`.
    pub fn message(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<StatusEntry> for StatusReport {
    fn extend<I: IntoIterator<Item = StatusEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.add_entry(entry);
        }
    }
}

impl FromIterator<StatusReport> for StatusReport {
    fn from_iter<I: IntoIterator<Item = StatusReport>>(iter: I) -> Self {
        let mut merged = Self::new();
        for report in iter {
            merged.merge(report);
        }
        merged
    }
}
