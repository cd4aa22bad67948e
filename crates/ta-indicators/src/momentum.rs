//! Momentum indicators.

use serde::{Deserialize, Serialize};
use ta_core::traits::{Indicator, MultiOutputIndicator, OhlcIndicator};

use crate::moving_average::{wilder, Ema};

/// Relative Strength Index (RSI).
///
/// Wilder-smoothed ratio of average gain to average loss, mapped onto 0..100.
/// A window with no losses reads 100, including a perfectly flat window.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            return 100.0;
        }
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let (gains, losses): (Vec<f64>, Vec<f64>) = data
            .windows(2)
            .map(|pair| {
                let change = pair[1] - pair[0];
                (change.max(0.0), (-change).max(0.0))
            })
            .unzip();

        wilder(&gains, self.period)
            .into_iter()
            .zip(wilder(&losses, self.period))
            .map(|(gain, loss)| Self::from_averages(gain, loss))
            .collect()
    }

    fn period(&self) -> usize {
        self.period + 1
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// Latest MACD reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// Fast EMA minus slow EMA
    #[serde(rename = "MACD")]
    pub macd: f64,
    /// EMA of the MACD line
    pub signal: f64,
    /// MACD minus signal
    pub histogram: f64,
}

/// Moving Average Convergence Divergence.
///
/// The first output needs `slow + signal - 1` prices: `slow` for the first
/// MACD value, then `signal - 1` more to seed the signal line.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast: Ema::new(fast),
            slow: Ema::new(slow),
            signal: Ema::new(signal),
        }
    }

    /// MACD line, aligned with the slow EMA.
    fn macd_line(&self, data: &[f64]) -> Vec<f64> {
        let fast = self.fast.calculate(data);
        let slow = self.slow.calculate(data);
        // Both end on the last price; the fast EMA starts earlier
        let skip = fast.len().saturating_sub(slow.len());
        fast[skip..].iter().zip(&slow).map(|(f, s)| f - s).collect()
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdOutput;

    fn calculate(&self, data: &[f64]) -> Vec<MacdOutput> {
        if data.len() < self.period() {
            return vec![];
        }

        let line = self.macd_line(data);
        let signal = self.signal.calculate(&line);
        let skip = line.len() - signal.len();

        line[skip..]
            .iter()
            .zip(signal)
            .map(|(&macd, signal)| MacdOutput {
                macd,
                signal,
                histogram: macd - signal,
            })
            .collect()
    }

    fn period(&self) -> usize {
        Indicator::period(&self.slow) + Indicator::period(&self.signal) - 1
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

/// Stochastic oscillator reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StochasticOutput {
    /// %K: close within the `k_period` high/low range
    pub k: f64,
    /// %D: mean of the last `d_period` %K values
    pub d: f64,
}

/// Stochastic oscillator.
///
/// A window whose high equals its low has no defined position and reads 50.
#[derive(Debug, Clone)]
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
}

impl Stochastic {
    /// Create a new stochastic oscillator with default parameters (14, 3).
    pub fn new() -> Self {
        Self::with_periods(14, 3)
    }

    /// Create with custom periods.
    pub fn with_periods(k_period: usize, d_period: usize) -> Self {
        assert!(k_period > 0 && d_period > 0);
        Self { k_period, d_period }
    }

    fn percent_k(high: &[f64], low: &[f64], close: f64) -> f64 {
        let highest = high.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let lowest = low.iter().copied().fold(f64::INFINITY, f64::min);
        let range = highest - lowest;
        if range == 0.0 {
            50.0
        } else {
            (close - lowest) / range * 100.0
        }
    }
}

impl Default for Stochastic {
    fn default() -> Self {
        Self::new()
    }
}

impl OhlcIndicator for Stochastic {
    type Output = StochasticOutput;

    fn calculate_ohlc(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<StochasticOutput> {
        let len = high.len().min(low.len()).min(close.len());
        if len < self.period() {
            return vec![];
        }

        let k_values: Vec<f64> = high[..len]
            .windows(self.k_period)
            .zip(low[..len].windows(self.k_period))
            .zip(&close[self.k_period - 1..len])
            .map(|((h, l), &c)| Self::percent_k(h, l, c))
            .collect();

        k_values
            .windows(self.d_period)
            .map(|recent| StochasticOutput {
                k: recent[recent.len() - 1],
                d: recent.iter().sum::<f64>() / recent.len() as f64,
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.k_period + self.d_period - 1
    }

    fn name(&self) -> &str {
        "Stochastic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oscillating(n: usize) -> Vec<f64> {
        (0..n).map(|i| 250.0 + (i as f64 * 0.9).cos() * 12.0).collect()
    }

    #[test]
    fn test_rsi_stays_in_range() {
        let data = oscillating(45);
        let values = Rsi::default().calculate(&data);

        assert_eq!(values.len(), 31);
        assert!(values.iter().all(|v| (0.0..=100.0).contains(v)));
    }

    #[test]
    fn test_rsi_extremes() {
        let rising: Vec<f64> = (1..=8).map(f64::from).collect();
        let falling: Vec<f64> = rising.iter().rev().copied().collect();

        let up = Rsi::new(4).calculate(&rising);
        assert_eq!(up.len(), 4);
        assert!(up.iter().all(|v| (v - 100.0).abs() < 1e-10));

        let down = Rsi::new(4).calculate(&falling);
        assert!(down.iter().all(|v| v.abs() < 1e-10));
    }

    #[test]
    fn test_rsi_flat_series_reads_100() {
        let values = Rsi::default().calculate(&[50.0; 20]);

        assert_eq!(values.len(), 6);
        assert!(values.iter().all(|v| (*v - 100.0).abs() < 1e-10));
    }

    #[test]
    fn test_rsi_window_check() {
        let rsi = Rsi::default();

        assert!(rsi.calculate(&[1.0; 14]).is_empty());
        assert!(rsi.validate_data(&[1.0; 14]).is_err());
        assert!(rsi.validate_data(&[1.0; 15]).is_ok());
        assert!(rsi.calculate(&[]).is_empty());
    }

    #[test]
    fn test_rsi_wilder_smoothing() {
        // Gains 1, 1, then a loss of 2 with period 2:
        // seed avg gain 1.0, avg loss 0.0 -> 100
        // next: gain (1*1 + 0)/2 = 0.5, loss (0*1 + 2)/2 = 1.0 -> 100 - 100/1.5
        let values = Rsi::new(2).calculate(&[10.0, 11.0, 12.0, 10.0]);

        assert_eq!(values.len(), 2);
        assert!((values[0] - 100.0).abs() < 1e-10);
        assert!((values[1] - (100.0 - 100.0 / 1.5)).abs() < 1e-10);
    }

    #[test]
    fn test_macd_compounding_trend() {
        let prices: Vec<f64> = (0..60).map(|i| 50.0 * 1.02f64.powi(i)).collect();
        let outputs = Macd::new().calculate(&prices);

        assert_eq!(outputs.len(), 27);
        let latest = outputs[outputs.len() - 1];
        assert!(latest.macd > 0.0);
        assert!(latest.macd > latest.signal);
        assert!((latest.histogram - (latest.macd - latest.signal)).abs() < 1e-12);
    }

    #[test]
    fn test_macd_alignment() {
        // fast EMA(2): 1.5, 2.5, 3.5, 4.5, 5.5
        // slow EMA(3): 2, 3, 4, 5
        // MACD line: 0.5, 0.5, 0.5, 0.5; signal EMA(2): 0.5, 0.5, 0.5
        let outputs = Macd::with_periods(2, 3, 2).calculate(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        assert_eq!(outputs.len(), 3);
        for output in &outputs {
            assert!((output.macd - 0.5).abs() < 1e-10);
            assert!((output.signal - 0.5).abs() < 1e-10);
            assert!(output.histogram.abs() < 1e-10);
        }
    }

    #[test]
    fn test_macd_minimum_length() {
        let macd = Macd::new();
        assert_eq!(macd.period(), 34);

        let prices = oscillating(34);
        assert_eq!(macd.calculate(&prices).len(), 1);
        assert!(macd.calculate(&prices[..33]).is_empty());
    }

    #[test]
    fn test_macd_serializes_consumer_keys() {
        let output = MacdOutput {
            macd: 1.0,
            signal: 0.5,
            histogram: 0.5,
        };
        let json = serde_json::to_value(output).unwrap();
        assert_eq!(json["MACD"], 1.0);
        assert_eq!(json["signal"], 0.5);
        assert_eq!(json["histogram"], 0.5);
    }

    #[test]
    fn test_stochastic_in_range() {
        let close = oscillating(30);
        let high: Vec<f64> = close.iter().map(|c| c + 2.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 2.0).collect();

        let outputs = Stochastic::new().calculate_ohlc(&high, &low, &close);
        assert_eq!(outputs.len(), 15);
        assert!(outputs
            .iter()
            .all(|o| (0.0..=100.0).contains(&o.k) && (0.0..=100.0).contains(&o.d)));
    }

    #[test]
    fn test_stochastic_close_at_extremes() {
        let high: Vec<f64> = (0..8).map(|i| 20.0 + i as f64).collect();
        let low: Vec<f64> = high.iter().map(|h| h - 4.0).collect();

        let at_high = Stochastic::with_periods(4, 2).calculate_ohlc(&high, &low, &high);
        let latest = at_high[at_high.len() - 1];
        assert!((latest.k - 100.0).abs() < 1e-10);
        assert!((latest.d - 100.0).abs() < 1e-10);

        // Falling closes pinned to the window low
        let high: Vec<f64> = high.into_iter().rev().collect();
        let low: Vec<f64> = low.into_iter().rev().collect();
        let at_low = Stochastic::with_periods(4, 2).calculate_ohlc(&high, &low, &low);
        assert!(at_low.iter().all(|o| o.k.abs() < 1e-10));
    }

    #[test]
    fn test_stochastic_flat_range() {
        let flat = [10.0; 5];
        let outputs = Stochastic::with_periods(3, 2).calculate_ohlc(&flat, &flat, &flat);

        assert_eq!(outputs.len(), 2);
        assert!(outputs.iter().all(|o| o.k == 50.0 && o.d == 50.0));
    }

    #[test]
    fn test_stochastic_window_check() {
        let stoch = Stochastic::new();
        let data = [1.0; 15];

        assert!(stoch.calculate_ohlc(&data, &data, &data).is_empty());
        assert!(stoch.validate_bars(15).is_err());
        assert!(stoch.validate_bars(16).is_ok());
    }
}
