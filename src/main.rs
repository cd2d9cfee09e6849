//! refcheck CLI entry point.

use anyhow::Result;
use clap::Parser;

use refcheck::cli::commands::{check, config as config_cmd};
use refcheck::cli::{Cli, Commands, ConfigCommands, EXIT_OK};
use refcheck::infrastructure::config::ConfigLoader;
use refcheck::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    let code = match run(cli).await {
        Ok(code) => code,
        Err(err) => refcheck::cli::handle_error(&err, json),
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<i32> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;

    match cli.command {
        Commands::Check {
            files,
            fail_on,
            no_progress,
        } => check::handle_check(&config, files, fail_on, no_progress, cli.json).await,
        Commands::Config(ConfigCommands::Show) => {
            config_cmd::handle_show(&config, cli.json)?;
            Ok(EXIT_OK)
        }
    }
}
