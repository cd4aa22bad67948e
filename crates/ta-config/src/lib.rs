//! Configuration management.

mod settings;

pub use settings::{AnalysisSettings, AppConfig, AppSettings, DataSettings, LoggingConfig};

use config::{Config, Environment, File};
use std::path::Path;
use ta_core::error::{TaError, TaResult};

/// Environment variable prefix, e.g. `CRYPTO_TA__ANALYSIS__TOLERANCE`.
pub const ENV_PREFIX: &str = "CRYPTO_TA";

/// Load configuration from an optional file and the environment.
///
/// Without a file, defaults apply and only environment overrides are read.
/// The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> TaResult<AppConfig> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config: AppConfig = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .and_then(|c| c.try_deserialize())
        .map_err(|e| TaError::Config(e.to_string()))?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.toml", name, std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_from_file() {
        let path = write_temp(
            "ta-config-load",
            r#"
            [logging]
            level = "debug"
            format = "json"

            [analysis]
            tolerance = 0.05
            max_levels = 5

            [data]
            dir = "./data"
            "#,
        );

        let config = load_config(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.is_json());
        assert!((config.analysis.tolerance - 0.05).abs() < 1e-12);
        assert_eq!(config.analysis.max_levels, 5);
        assert_eq!(config.analysis.default_days, 30);
        assert_eq!(config.data.dir.as_deref(), Some(Path::new("./data")));
        assert_eq!(config.app.name, "crypto-ta");
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let path = write_temp(
            "ta-config-invalid",
            r#"
            [analysis]
            tolerance = 1.5
            "#,
        );

        let result = load_config(Some(&path));
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(TaError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("ta-config-does-not-exist.toml");
        assert!(load_config(Some(&path)).is_err());
    }
}
