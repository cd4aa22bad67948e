//! CLI definitions.

pub mod commands;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use ta_config::AppConfig;
use ta_data::CsvPriceSource;

#[derive(Parser)]
#[command(name = "crypto-ta")]
#[command(author, version, about = "Technical analysis for crypto price histories")]
pub struct Cli {
    /// Configuration file path; defaults and CRYPTO_TA__* variables apply without one
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level, overriding the configured one
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the technical analysis report for a symbol
    Analyze(AnalyzeArgs),
    /// Detect support and resistance levels
    Levels(LevelsArgs),
    /// Print a raw indicator series as JSON
    Series(SeriesArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Where the price history comes from.
#[derive(clap::Args)]
pub struct DataArgs {
    /// Symbol to analyze (e.g. BTC)
    #[arg(short = 'S', long)]
    pub symbol: String,

    /// CSV file or directory of `<symbol>.csv` files; falls back to data.dir
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Days of history; falls back to analysis.default_days
    #[arg(short, long)]
    pub days: Option<u32>,
}

impl DataArgs {
    /// Open the CSV source named on the command line or in the config.
    pub fn source(&self, config: &AppConfig) -> Result<CsvPriceSource> {
        let Some(path) = self.data.as_ref().or(config.data.dir.as_ref()) else {
            bail!("Please provide a data file or directory with --data (e.g. --data ./data)");
        };
        if !path.exists() {
            bail!(
                "Data path '{}' does not exist. Provide a CSV file or directory containing CSV files",
                path.display()
            );
        }
        Ok(CsvPriceSource::new(path)?)
    }

    /// Requested history length.
    pub fn days(&self, config: &AppConfig) -> u32 {
        self.days.unwrap_or(config.analysis.default_days)
    }
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Indicators to compute (comma-separated: all, rsi, macd, bollinger, support)
    #[arg(short, long, value_delimiter = ',')]
    pub indicators: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Save the JSON response to a file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct LevelsArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Relative clustering tolerance; falls back to analysis.tolerance
    #[arg(short, long)]
    pub tolerance: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SeriesIndicator {
    Rsi,
    Macd,
    Sma,
    Ema,
    Bollinger,
    Stochastic,
    Atr,
    Adx,
}

#[derive(clap::Args)]
pub struct SeriesArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Indicator to compute
    #[arg(short, long, value_enum)]
    pub indicator: SeriesIndicator,

    /// Lookback period; each indicator has its own default
    #[arg(short, long)]
    pub period: Option<usize>,
}
