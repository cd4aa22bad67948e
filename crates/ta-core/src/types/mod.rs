//! Core data types for the analysis system.

mod analysis;
mod ohlcv;

pub use analysis::{Signal, SupportResistanceLevels, TechnicalAnalysisResult};
pub use ohlcv::{Bar, OhlcSeries};
