//! Technical analysis CLI application.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use logging::setup_logging;
use ta_config::load_config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;

    // Setup logging; CLI flags win over the config file
    let level = cli
        .log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let json = cli.json_logs || config.logging.is_json();
    let _guard = setup_logging(&level, json, config.logging.file.as_deref())?;

    // Execute command
    match cli.command {
        Commands::Analyze(args) => cli::commands::analyze::run(args, &config).await,
        Commands::Levels(args) => cli::commands::levels::run(args, &config).await,
        Commands::Series(args) => cli::commands::series::run(args, &config).await,
        Commands::ValidateConfig => cli::commands::validate::run(&config, cli.config.as_deref()),
    }
}
