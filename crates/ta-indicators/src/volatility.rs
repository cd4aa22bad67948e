//! Volatility indicators.

use serde::{Deserialize, Serialize};
use ta_core::traits::{Indicator, MultiOutputIndicator, OhlcIndicator};

use crate::moving_average::wilder;

/// Largest of the bar's own range and its gaps from the previous close.
#[inline]
fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// True range for every bar after the first.
pub(crate) fn true_ranges(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    high.iter()
        .zip(low)
        .skip(1)
        .zip(close)
        .map(|((&h, &l), &prev_close)| true_range(h, l, prev_close))
        .collect()
}

/// Average True Range (ATR).
///
/// Wilder-smoothed true range, seeded with the mean of the first `period`.
#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
}

impl Atr {
    /// Create a new ATR indicator.
    ///
    /// Common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Default for Atr {
    fn default() -> Self {
        Self::new(14)
    }
}

impl OhlcIndicator for Atr {
    type Output = f64;

    fn calculate_ohlc(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
        wilder(&true_ranges(high, low, close), self.period)
    }

    fn period(&self) -> usize {
        self.period + 1
    }

    fn name(&self) -> &str {
        "ATR"
    }
}

/// Population standard deviation of a window around its mean.
fn population_std_dev(window: &[f64], mean: f64) -> f64 {
    let n = window.len() as f64;
    (window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt()
}

/// Rolling population standard deviation.
#[derive(Debug, Clone)]
pub struct StdDev {
    period: usize,
}

impl StdDev {
    /// Create a rolling standard deviation over `period` values.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for StdDev {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        data.windows(self.period)
            .map(|w| population_std_dev(w, w.iter().sum::<f64>() / w.len() as f64))
            .collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "StdDev"
    }
}

/// Bollinger Bands output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerOutput {
    /// Upper band
    pub upper: f64,
    /// Middle band (SMA)
    pub middle: f64,
    /// Lower band
    pub lower: f64,
    /// %B ((price - lower) / (upper - lower))
    #[serde(rename = "pb")]
    pub percent_b: f64,
    /// Bandwidth ((upper - lower) / middle)
    pub bandwidth: f64,
}

impl BollingerOutput {
    /// Check if price is above upper band.
    pub fn is_overbought(&self, price: f64) -> bool {
        price > self.upper
    }

    /// Check if price is below lower band.
    pub fn is_oversold(&self, price: f64) -> bool {
        price < self.lower
    }
}

/// Bollinger Bands.
///
/// Consists of a middle band (SMA) with upper and lower bands
/// at a specified number of population standard deviations.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl BollingerBands {
    /// Create new Bollinger Bands with default parameters (20, 2.0).
    pub fn new() -> Self {
        Self::with_params(20, 2.0)
    }

    /// Create Bollinger Bands with custom parameters.
    pub fn with_params(period: usize, std_dev_multiplier: f64) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        assert!(
            std_dev_multiplier > 0.0,
            "Std dev multiplier must be positive"
        );
        Self {
            period,
            std_dev_multiplier,
        }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

impl BollingerBands {
    fn band(&self, window: &[f64]) -> BollingerOutput {
        let middle = window.iter().sum::<f64>() / window.len() as f64;
        let offset = self.std_dev_multiplier * population_std_dev(window, middle);
        let (upper, lower) = (middle + offset, middle - offset);

        let price = window[window.len() - 1];
        let width = upper - lower;
        BollingerOutput {
            upper,
            middle,
            lower,
            percent_b: if width == 0.0 { 0.5 } else { (price - lower) / width },
            bandwidth: if middle == 0.0 { 0.0 } else { width / middle },
        }
    }
}

impl MultiOutputIndicator for BollingerBands {
    type Outputs = BollingerOutput;

    fn calculate(&self, data: &[f64]) -> Vec<BollingerOutput> {
        data.windows(self.period).map(|w| self.band(w)).collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_true_range_gaps() {
        // Inside the previous close: own range wins
        assert!((true_range(52.0, 48.0, 50.0) - 4.0).abs() < 1e-10);
        // Gap up and gap down
        assert!((true_range(60.0, 57.0, 50.0) - 10.0).abs() < 1e-10);
        assert!((true_range(45.0, 41.0, 50.0) - 9.0).abs() < 1e-10);
        assert_eq!(true_ranges(&[1.0], &[1.0], &[1.0]), Vec::<f64>::new());
    }

    #[test]
    fn test_atr_ohlc() {
        let atr = Atr::new(3);
        let high = vec![10.0, 11.0, 12.0, 11.0, 13.0, 14.0];
        let low = vec![8.0, 9.0, 10.0, 9.0, 11.0, 12.0];
        let close = vec![9.0, 10.0, 11.0, 10.0, 12.0, 13.0];

        let result = atr.calculate_ohlc(&high, &low, &close);
        assert_eq!(result.len(), 6 - 3);

        // TR: 2, 2, 2, 3, 2 -> seed 2, then (2*2+3)/3, ...
        assert!((result[0] - 2.0).abs() < 1e-10);
        assert!((result[1] - 7.0 / 3.0).abs() < 1e-10);
        for value in &result {
            assert!(*value > 0.0);
        }
    }

    #[test]
    fn test_atr_insufficient_data() {
        let atr = Atr::default();
        let data = vec![1.0; 14];
        assert!(atr.calculate_ohlc(&data, &data, &data).is_empty());
        assert!(atr.validate_bars(15).is_ok());
    }

    #[test]
    fn test_bollinger_default_window() {
        let data: Vec<f64> = (0..32)
            .map(|i| 40.0 + (i as f64 * 0.35).cos() * 3.0)
            .collect();

        let bands = BollingerBands::new().calculate(&data);
        assert_eq!(bands.len(), 13);
        assert!(bands
            .iter()
            .all(|b| b.upper > b.middle && b.middle > b.lower && b.bandwidth > 0.0));
    }

    #[test]
    fn test_bollinger_band_ordering_holds_for_any_series() {
        let bb = BollingerBands::with_params(4, 2.0);
        let series = [
            vec![5.0, 5.0, 5.0, 5.0, 5.0],
            vec![1.0, 100.0, 0.5, 300.0, -4.0, 7.0],
            vec![-3.0, -2.0, -8.0, -1.0],
        ];

        for data in &series {
            for output in bb.calculate(data) {
                assert!(output.upper >= output.middle);
                assert!(output.middle >= output.lower);
            }
        }
    }

    #[test]
    fn test_bollinger_population_std_dev() {
        // Window [2, 4, 6]: mean 4, population variance 8/3
        let bb = BollingerBands::with_params(3, 2.0);
        let result = bb.calculate(&[2.0, 4.0, 6.0]);
        let std_dev = (8.0f64 / 3.0).sqrt();

        assert_eq!(result.len(), 1);
        assert!((result[0].middle - 4.0).abs() < 1e-10);
        assert!((result[0].upper - (4.0 + 2.0 * std_dev)).abs() < 1e-10);
        assert!((result[0].lower - (4.0 - 2.0 * std_dev)).abs() < 1e-10);
    }

    #[test]
    fn test_bollinger_percent_b() {
        let bb = BollingerBands::with_params(4, 2.0);

        // Collapsed bands put the price in the middle
        let flat = bb.calculate(&[7.5; 4]);
        assert_eq!(flat[0].percent_b, 0.5);
        assert_eq!(flat[0].bandwidth, 0.0);

        // Window [1, 3, 1, 3]: mean 2, std dev 1, bands 0..4, last price 3
        let swing = bb.calculate(&[1.0, 3.0, 1.0, 3.0]);
        assert!((swing[0].percent_b - 0.75).abs() < 1e-10);
        assert!((swing[0].bandwidth - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_std_dev_matches_band_width() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let std_dev = StdDev::new(8).calculate(&data);

        // Mean 5, population variance 4
        assert_eq!(std_dev.len(), 1);
        assert!((std_dev[0] - 2.0).abs() < 1e-10);

        let band = BollingerBands::with_params(8, 2.0).calculate(&data)[0];
        assert!((band.upper - band.lower - 4.0 * std_dev[0]).abs() < 1e-10);
        assert!(StdDev::new(3).calculate(&[1.0]).is_empty());
    }

    #[test]
    fn test_bollinger_overbought_oversold() {
        let output = BollingerOutput {
            upper: 110.0,
            middle: 100.0,
            lower: 90.0,
            percent_b: 0.5,
            bandwidth: 0.2,
        };

        assert!(output.is_overbought(115.0));
        assert!(!output.is_overbought(105.0));
        assert!(output.is_oversold(85.0));
        assert!(!output.is_oversold(95.0));
        // Touching a band is still inside
        assert!(!output.is_overbought(110.0));
        assert!(!output.is_oversold(90.0));
    }
}
