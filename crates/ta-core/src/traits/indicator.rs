//! Indicator trait definitions.

use crate::error::IndicatorError;

fn require(required: usize, available: usize) -> Result<(), IndicatorError> {
    if available >= required {
        Ok(())
    } else {
        Err(IndicatorError::InsufficientData {
            required,
            available,
        })
    }
}

/// Single-valued indicator over a price series.
///
/// Input shorter than [`Indicator::period`] yields an empty output,
/// never a panic or an error.
pub trait Indicator: Send + Sync {
    /// Value produced per output index.
    type Output;

    /// Indicator values for `data` (typically closes), oldest first.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Minimum input length that produces one output.
    fn period(&self) -> usize;

    /// Display name used in reports and logs.
    fn name(&self) -> &str;

    /// Check `data` is long enough for one output.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        require(self.period(), data.len())
    }
}

/// Indicator producing a struct of related values per index (MACD, Bollinger Bands).
pub trait MultiOutputIndicator: Send + Sync {
    /// Values produced per output index.
    type Outputs;

    /// Indicator values for `data`, oldest first.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Outputs>;

    /// Minimum input length that produces one output.
    fn period(&self) -> usize;

    /// Display name used in reports and logs.
    fn name(&self) -> &str;

    /// Check `data` is long enough for one output.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        require(self.period(), data.len())
    }
}

/// Indicator computed from index-aligned high/low/close series.
///
/// When the three series differ in length, only the shortest common
/// prefix is used.
pub trait OhlcIndicator: Send + Sync {
    /// Value produced per output index.
    type Output;

    /// Indicator values from high/low/close data, oldest first.
    fn calculate_ohlc(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<Self::Output>;

    /// Minimum number of bars that produces one output.
    fn period(&self) -> usize;

    /// Display name used in reports and logs.
    fn name(&self) -> &str;

    /// Check `bars` is enough for one output.
    fn validate_bars(&self, bars: usize) -> Result<(), IndicatorError> {
        require(self.period(), bars)
    }
}
