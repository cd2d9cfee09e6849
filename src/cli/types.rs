//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::models::status::Severity;
use crate::infrastructure::config::ConfigError;

#[derive(Parser)]
#[command(name = "refcheck")]
#[command(about = "refcheck - validate files before a multi-participant edit", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .refcheck/
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run condition checks for the files about to be edited
    Check {
        /// Files that will be modified
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Exit non-zero when the merged severity reaches this level
        #[arg(short, long, value_parser = parse_fail_on)]
        fail_on: Option<Severity>,

        /// Do not draw a progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
}

/// Parse a `--fail-on` threshold, applying the same rule as the config file.
fn parse_fail_on(value: &str) -> Result<Severity, String> {
    match value.parse::<Severity>()? {
        Severity::Ok => Err(ConfigError::InvalidFailOn(Severity::Ok).to_string()),
        severity => Ok(severity),
    }
}
