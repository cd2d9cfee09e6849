use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;
use crate::domain::models::status::Severity;

/// Project-local configuration directory.
pub const CONFIG_DIR: &str = ".refcheck";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "REFCHECK_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid fail_on: {0}. Must be info or higher")]
    InvalidFailOn(Severity),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    #[error("Log directory cannot be empty")]
    EmptyLogDir,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration relative to the current directory.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .refcheck/config.yaml (project config)
    /// 3. .refcheck/local.yaml (project local overrides, optional)
    /// 4. Environment variables (REFCHECK_* prefix, `__` separates sections)
    pub fn load() -> Result<Config> {
        Self::load_from_dir(Path::new("."))
    }

    /// Load configuration with `base` as the project root.
    pub fn load_from_dir(base: impl AsRef<Path>) -> Result<Config> {
        let dir = base.as_ref().join(CONFIG_DIR);
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Environment overrides still apply on top of the file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogRotation(
                config.logging.rotation.clone(),
            ));
        }

        if matches!(&config.logging.log_dir, Some(dir) if dir.trim().is_empty()) {
            return Err(ConfigError::EmptyLogDir);
        }

        // fail_on = ok would fail every run, including clean ones.
        if config.check.fail_on == Severity::Ok {
            return Err(ConfigError::InvalidFailOn(config.check.fail_on));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(base: &Path, name: &str, contents: &str) {
        let dir = base.join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.logging.rotation, "daily");
        assert_eq!(config.check.fail_on, Severity::Error);
        assert_eq!(config.check.read_only_severity, Severity::Fatal);
        assert_eq!(config.check.missing_severity, Severity::Error);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
logging:
  level: debug
  format: json
check:
  fail_on: warning
  read_only_severity: error
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.check.fail_on, Severity::Warning);
        assert_eq!(config.check.read_only_severity, Severity::Error);
        assert_eq!(config.check.missing_severity, Severity::Error);

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_load_from_dir_without_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = temp_env::with_vars_unset(
            ["REFCHECK_CHECK__FAIL_ON", "REFCHECK_LOGGING__LEVEL"],
            || ConfigLoader::load_from_dir(dir.path()),
        )
        .unwrap();
        assert_eq!(config.check.fail_on, Severity::Error);
    }

    #[test]
    fn test_local_overrides_project_config() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "config.yaml", "check:\n  fail_on: fatal\n");
        write_config(dir.path(), "local.yaml", "check:\n  fail_on: warning\n");

        let config = temp_env::with_vars_unset(["REFCHECK_CHECK__FAIL_ON"], || {
            ConfigLoader::load_from_dir(dir.path())
        })
        .unwrap();
        assert_eq!(config.check.fail_on, Severity::Warning);
    }

    #[test]
    fn test_env_overrides_files() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "config.yaml", "logging:\n  level: info\n");

        let config = temp_env::with_vars(
            [
                ("REFCHECK_LOGGING__LEVEL", Some("debug")),
                ("REFCHECK_CHECK__MISSING_SEVERITY", Some("warning")),
            ],
            || ConfigLoader::load_from_dir(dir.path()),
        )
        .unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.check.missing_severity, Severity::Warning);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigLoader::load_from_file(dir.path().join("absent.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        fs::write(&path, "logging:\n  format: xml\n").unwrap();

        let err = temp_env::with_vars_unset(["REFCHECK_LOGGING__FORMAT"], || {
            ConfigLoader::load_from_file(&path)
        })
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidLogFormat(format)) if format == "xml"
        ));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "invalid"),
            _ => panic!("Expected InvalidLogLevel error"),
        }
    }

    #[test]
    fn test_validate_accepts_uppercase_level_and_format() {
        let mut config = Config::default();
        config.logging.level = "DEBUG".to_string();
        config.logging.format = "Json".to_string();
        config.logging.rotation = "Hourly".to_string();

        ConfigLoader::validate(&config).expect("Case should not matter");
    }

    #[test]
    fn test_validate_invalid_rotation() {
        let mut config = Config::default();
        config.logging.rotation = "weekly".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogRotation(rotation) => assert_eq!(rotation, "weekly"),
            _ => panic!("Expected InvalidLogRotation error"),
        }
    }

    #[test]
    fn test_rotation_from_yaml_and_env() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "config.yaml", "logging:\n  rotation: never\n");

        let config = temp_env::with_vars_unset(["REFCHECK_LOGGING__ROTATION"], || {
            ConfigLoader::load_from_dir(dir.path())
        })
        .unwrap();
        assert_eq!(config.logging.rotation, "never");

        let config = temp_env::with_vars([("REFCHECK_LOGGING__ROTATION", Some("hourly"))], || {
            ConfigLoader::load_from_dir(dir.path())
        })
        .unwrap();
        assert_eq!(config.logging.rotation, "hourly");
    }

    #[test]
    fn test_validate_fail_on_ok() {
        let mut config = Config::default();
        config.check.fail_on = Severity::Ok;

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidFailOn(Severity::Ok)
        ));
    }

    #[test]
    fn test_validate_empty_log_dir() {
        let mut config = Config::default();
        config.logging.log_dir = Some("  ".to_string());

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::EmptyLogDir
        ));
    }
}
