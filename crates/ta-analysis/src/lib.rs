//! Signal classification and support/resistance detection.
//!
//! Turns a close-price series into the technical analysis report:
//! - [`TechnicalAnalyzer`] runs RSI, MACD, the SMA20/SMA50 cross and
//!   Bollinger Bands, in that order, skipping any whose window does not fit.
//! - [`OverallSignal`] folds the per-indicator signals into one verdict.
//! - [`SupportResistanceDetector`] clusters local extrema into price levels.
//! - [`AnalysisEngine`] and [`TechnicalService`] dispatch an indicator
//!   selection against a price source.
//!
//! Everything here is a pure function of its inputs except the service,
//! which only adds the price source lookup.

mod levels;
mod overall;
mod reading;
mod report;
mod selection;
mod service;

pub use levels::{compute_support_resistance, Extrema, SupportResistanceDetector, DEFAULT_TOLERANCE};
pub use overall::{OverallSignal, Verdict};
pub use reading::{IndicatorReading, RSI_OVERBOUGHT, RSI_OVERSOLD};
pub use report::{compute_indicator_report, TechnicalAnalyzer};
pub use selection::{AnalysisData, AnalysisEngine, IndicatorKind, IndicatorSelection};
pub use service::{TechnicalRequest, TechnicalResponse, TechnicalService};
