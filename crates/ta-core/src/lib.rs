//! Core types and traits for technical analysis.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, OhlcSeries)
//! - Analysis output types (Signal, TechnicalAnalysisResult, SupportResistanceLevels)
//! - Core traits for indicators and price sources

pub mod types;
pub mod traits;
pub mod error;

pub use error::{TaError, TaResult};
pub use types::*;
pub use traits::*;
