//! Edit validation checker.
//!
//! Every participant that is about to modify files adds them to the one
//! shared [`ValidateEditChecker`] instead of validating them itself, so each
//! file is validated exactly once per session no matter how many
//! participants touch it.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::domain::models::config::CheckConfig;
use crate::domain::models::status::{Severity, StatusReport};
use crate::domain::ports::checker::ConditionChecker;
use crate::domain::ports::progress::ProgressMonitor;

// ---------------------------------------------------------------------------
// ValidateEditChecker
// ---------------------------------------------------------------------------

/// Checker that verifies every file scheduled for modification exists and
/// can be written.
#[derive(Debug, Clone)]
pub struct ValidateEditChecker {
    files: Vec<PathBuf>,
    read_only_severity: Severity,
    missing_severity: Severity,
}

impl Default for ValidateEditChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidateEditChecker {
    /// Create a checker with no files. Read-only files are fatal, missing
    /// files are errors.
    pub const fn new() -> Self {
        Self {
            files: Vec::new(),
            read_only_severity: Severity::Fatal,
            missing_severity: Severity::Error,
        }
    }

    /// Create a checker using the severities from `config`.
    pub const fn from_config(config: &CheckConfig) -> Self {
        Self {
            files: Vec::new(),
            read_only_severity: config.read_only_severity,
            missing_severity: config.missing_severity,
        }
    }

    /// Override the severity reported for read-only files.
    #[must_use]
    pub const fn with_read_only_severity(mut self, severity: Severity) -> Self {
        self.read_only_severity = severity;
        self
    }

    /// Override the severity reported for missing files.
    #[must_use]
    pub const fn with_missing_severity(mut self, severity: Severity) -> Self {
        self.missing_severity = severity;
        self
    }

    /// Schedule `path` for validation. Returns `false` if it was already
    /// scheduled.
    pub fn add_file(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.files.contains(&path) {
            return false;
        }
        self.files.push(path);
        true
    }

    /// Schedule several files.
    pub fn add_files<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        for path in paths {
            self.add_file(path);
        }
    }

    /// Files scheduled so far, in the order they were added.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    fn validate(&self, path: &Path, report: &mut StatusReport) -> anyhow::Result<()> {
        let context = Some(path.display().to_string());
        match fs::metadata(path) {
            Ok(meta) if !meta.is_file() => {
                report.add(Severity::Error, "Not a regular file", context);
            }
            Ok(meta) if meta.permissions().readonly() => {
                report.add(self.read_only_severity, "File is read-only", context);
            }
            Ok(_) => {}
            // A parent component that is a regular file also means there is
            // nothing to edit at this path.
            Err(err) if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                report.add(self.missing_severity, "File does not exist", context);
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read metadata for {}", path.display()));
            }
        }
        Ok(())
    }
}

impl ConditionChecker for ValidateEditChecker {
    fn name(&self) -> &str {
        "validate-edit"
    }

    fn check(&self, progress: &dyn ProgressMonitor) -> anyhow::Result<StatusReport> {
        let mut report = StatusReport::new();
        progress.begin_task("Validating edits", self.files.len() as u64);

        for path in &self.files {
            if progress.is_canceled() {
                tracing::debug!("Edit validation interrupted by cancellation");
                break;
            }
            progress.sub_task(&path.display().to_string());
            self.validate(path, &mut report)?;
            progress.worked(1);
        }

        progress.done();
        tracing::debug!(
            files = self.files.len(),
            severity = %report.severity(),
            "Edit validation finished"
        );
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::progress::NullProgressMonitor;

    fn make_read_only(path: &Path) {
        let mut perms = fs::metadata(path).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(path, perms).unwrap();
    }

    #[test]
    fn no_files_is_ok() {
        let checker = ValidateEditChecker::new();
        let report = checker.check(&NullProgressMonitor::new()).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.severity(), Severity::Ok);
    }

    #[test]
    fn duplicate_files_are_collapsed() {
        let mut checker = ValidateEditChecker::new();
        assert!(checker.add_file("a.rs"));
        assert!(!checker.add_file("a.rs"));
        checker.add_files(["b.rs", "a.rs"]);
        assert_eq!(checker.files(), &[PathBuf::from("a.rs"), PathBuf::from("b.rs")]);
    }

    #[test]
    fn writable_file_passes() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("ok.txt");
        fs::write(&file, "content").unwrap();

        let mut checker = ValidateEditChecker::new();
        checker.add_file(&file);
        let report = checker.check(&NullProgressMonitor::new()).unwrap();
        assert!(report.is_ok());
    }

    #[test]
    fn missing_file_reports_configured_severity() {
        let dir = tempfile::tempdir().unwrap();
        let mut checker = ValidateEditChecker::new().with_missing_severity(Severity::Warning);
        checker.add_file(dir.path().join("nope.txt"));

        let report = checker.check(&NullProgressMonitor::new()).unwrap();
        assert_eq!(report.severity(), Severity::Warning);
        assert_eq!(report.message(), "File does not exist");
        assert!(report.entries()[0]
            .context
            .as_deref()
            .unwrap()
            .ends_with("nope.txt"));
    }

    #[test]
    fn read_only_file_is_fatal_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("locked.txt");
        fs::write(&file, "content").unwrap();
        make_read_only(&file);

        let mut checker = ValidateEditChecker::new();
        checker.add_file(&file);
        let report = checker.check(&NullProgressMonitor::new()).unwrap();
        assert!(report.has_fatal_error());
        assert_eq!(report.message(), "File is read-only");
    }

    #[test]
    fn directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut checker = ValidateEditChecker::new();
        checker.add_file(dir.path());

        let report = checker.check(&NullProgressMonitor::new()).unwrap();
        assert_eq!(report.severity(), Severity::Error);
        assert_eq!(report.message(), "Not a regular file");
    }

    #[test]
    fn path_below_a_regular_file_counts_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("a.txt");
        fs::write(&parent, "content").unwrap();

        let mut checker = ValidateEditChecker::new();
        checker.add_file(parent.join("child.rs"));
        let report = checker.check(&NullProgressMonitor::new()).unwrap();
        assert_eq!(report.severity(), Severity::Error);
        assert_eq!(report.message(), "File does not exist");
    }

    #[test]
    fn unexpected_metadata_error_is_propagated() {
        // Interior NUL bytes fail before any syscall, regardless of privileges.
        let mut checker = ValidateEditChecker::new();
        checker.add_file("bad\0name.rs");

        let err = checker.check(&NullProgressMonitor::new()).unwrap_err();
        assert!(err.to_string().contains("Failed to read metadata"));
        let io = err.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn stops_when_cancelled() {
        let mut checker = ValidateEditChecker::new();
        checker.add_files(["/definitely/missing/a", "/definitely/missing/b"]);

        let monitor = NullProgressMonitor::new();
        monitor.set_canceled(true);
        let report = checker.check(&monitor).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn severities_come_from_config() {
        let config = CheckConfig {
            read_only_severity: Severity::Warning,
            missing_severity: Severity::Info,
            ..CheckConfig::default()
        };
        let mut checker = ValidateEditChecker::from_config(&config);
        checker.add_file("/definitely/missing/file");

        let report = checker.check(&NullProgressMonitor::new()).unwrap();
        assert_eq!(report.severity(), Severity::Info);
    }
}
