//! OHLCV (Open, High, Low, Close, Volume) data types.

use serde::{Deserialize, Serialize};

/// Compact OHLCV bar.
/// Uses f64 for fast indicator calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Create a flat bar from a single price point.
    ///
    /// Price feeds that only report one value per interval end up here.
    pub fn from_close(timestamp: i64, close: f64) -> Self {
        Self::new(timestamp, close, close, close, close, 0.0)
    }

    /// Calculate the bar's range (high - low).
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// Index-aligned high/low/close series for the OHLC indicators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OhlcSeries {
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
}

impl OhlcSeries {
    /// Create a series from parallel vectors.
    ///
    /// Vectors of different lengths are truncated to the shortest one.
    pub fn new(mut high: Vec<f64>, mut low: Vec<f64>, mut close: Vec<f64>) -> Self {
        let len = high.len().min(low.len()).min(close.len());
        high.truncate(len);
        low.truncate(len);
        close.truncate(len);
        Self { high, low, close }
    }

    /// Build a series from bars (oldest first).
    pub fn from_bars(bars: &[Bar]) -> Self {
        bars.iter().copied().collect()
    }

    /// Number of aligned bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.close.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// High prices.
    pub fn high(&self) -> &[f64] {
        &self.high
    }

    /// Low prices.
    pub fn low(&self) -> &[f64] {
        &self.low
    }

    /// Close prices.
    pub fn close(&self) -> &[f64] {
        &self.close
    }
}

impl FromIterator<Bar> for OhlcSeries {
    fn from_iter<T: IntoIterator<Item = Bar>>(iter: T) -> Self {
        let mut series = OhlcSeries::default();
        for bar in iter {
            series.high.push(bar.high);
            series.low.push(bar.low);
            series.close.push(bar.close);
        }
        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_calculations() {
        let bar = Bar::new(1000, 100.0, 110.0, 95.0, 105.0, 1000000.0);
        assert!((bar.range() - 15.0).abs() < 0.001);

        let flat = Bar::from_close(1000, 42.0);
        assert_eq!(flat.open, 42.0);
        assert_eq!(flat.range(), 0.0);
    }

    #[test]
    fn test_series_from_bars() {
        let bars = vec![
            Bar::new(1, 100.0, 101.0, 99.0, 100.5, 1000.0),
            Bar::new(2, 100.5, 102.0, 100.0, 101.5, 2000.0),
        ];
        let series = OhlcSeries::from_bars(&bars);

        assert_eq!(series.len(), 2);
        assert_eq!(series.high(), &[101.0, 102.0]);
        assert_eq!(series.low(), &[99.0, 100.0]);
        assert_eq!(series.close(), &[100.5, 101.5]);
    }

    #[test]
    fn test_series_truncates_to_shortest() {
        let series = OhlcSeries::new(vec![1.0, 2.0, 3.0], vec![0.5, 1.5], vec![0.8, 1.8, 2.8]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.high().len(), 2);
        assert!(!series.is_empty());
    }
}
