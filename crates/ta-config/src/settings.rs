//! Configuration structures.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use ta_core::error::{TaError, TaResult};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub data: DataSettings,
}

impl AppConfig {
    /// Check value ranges.
    pub fn validate(&self) -> TaResult<()> {
        self.logging.validate()?;
        self.analysis.validate()
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> TaResult<String> {
        toml::to_string_pretty(self).map_err(|e| TaError::Serialization(e.to_string()))
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "crypto-ta".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// Optional log file; rotated daily
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Whether JSON output is configured.
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }

    fn validate(&self) -> TaResult<()> {
        match self.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(TaError::Config(format!(
                "logging.format must be 'pretty' or 'json', got '{}'",
                other
            ))),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Analysis parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Relative support/resistance clustering tolerance
    pub tolerance: f64,
    /// Levels kept per side
    pub max_levels: usize,
    /// History length when a request does not give one
    pub default_days: u32,
}

impl AnalysisSettings {
    fn validate(&self) -> TaResult<()> {
        if !(self.tolerance > 0.0 && self.tolerance < 1.0) {
            return Err(TaError::Config(format!(
                "analysis.tolerance must be between 0 and 1, got {}",
                self.tolerance
            )));
        }
        if self.max_levels == 0 {
            return Err(TaError::Config(
                "analysis.max_levels must be at least 1".into(),
            ));
        }
        if self.default_days == 0 {
            return Err(TaError::Config(
                "analysis.default_days must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            tolerance: 0.02,
            max_levels: 3,
            default_days: 30,
        }
    }
}

/// Price data location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Directory holding `<symbol>.csv` files, or a single CSV file
    pub dir: Option<PathBuf>,
}
