//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use ta_config::AppConfig;

pub fn run(config: &AppConfig, config_path: Option<&Path>) -> Result<()> {
    match config_path {
        Some(path) => println!("Validating configuration: {:?}", path),
        None => println!("Validating default configuration with environment overrides"),
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("S/R tolerance: {:.2}%", config.analysis.tolerance * 100.0);
    println!("Levels per side: {}", config.analysis.max_levels);
    println!("Default history: {} days", config.analysis.default_days);
    println!();
    println!("Effective configuration:");
    println!("{}", config.to_toml()?);

    Ok(())
}
