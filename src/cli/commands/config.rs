//! `refcheck config` command handlers.

use anyhow::Result;

use crate::cli::display::output;
use crate::cli::output::ConfigOutput;
use crate::domain::models::config::Config;

/// Handle config show command
pub fn handle_show(config: &Config, json: bool) -> Result<()> {
    output(
        &ConfigOutput {
            config: config.clone(),
        },
        json,
    );
    Ok(())
}
