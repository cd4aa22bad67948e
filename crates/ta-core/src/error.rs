//! Error types for the analysis system.

use thiserror::Error;

/// Top-level analysis error.
#[derive(Error, Debug)]
pub enum TaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for TaError {
    fn from(err: serde_json::Error) -> Self {
        TaError::Serialization(err.to_string())
    }
}

/// Price data source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Data source error: {0}")]
    Internal(String),
}

/// Indicator calculation errors.
#[derive(Error, Debug, PartialEq)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unknown indicator: {0}")]
    UnknownIndicator(String),
}

/// Result type alias for analysis operations.
pub type TaResult<T> = Result<T, TaError>;
