//! Composite technical analysis report.

use ta_core::error::IndicatorError;
use ta_core::traits::{Indicator, MultiOutputIndicator};
use ta_core::types::TechnicalAnalysisResult;
use ta_indicators::{BollingerBands, Macd, Rsi, Sma};
use tracing::debug;

use crate::reading::IndicatorReading;

/// Log and swallow an insufficient-data check.
fn applicable(name: &str, check: Result<(), IndicatorError>) -> bool {
    match check {
        Ok(()) => true,
        Err(err) => {
            debug!(indicator = name, error = %err, "skipping indicator");
            false
        }
    }
}

/// Runs the report indicators over a close-price series.
///
/// Uses RSI(14), MACD(12, 26, 9), SMA(20) vs SMA(50) and Bollinger(20, 2).
/// Before each indicator contributes, its window is checked against the
/// input length; indicators that do not fit are left out of the report.
#[derive(Debug, Clone)]
pub struct TechnicalAnalyzer {
    pub(crate) rsi: Rsi,
    pub(crate) macd: Macd,
    sma_short: Sma,
    sma_long: Sma,
    pub(crate) bollinger: BollingerBands,
}

impl TechnicalAnalyzer {
    /// Create an analyzer with the standard report parameters.
    pub fn new() -> Self {
        Self {
            rsi: Rsi::new(14),
            macd: Macd::new(),
            sma_short: Sma::new(20),
            sma_long: Sma::new(50),
            bollinger: BollingerBands::new(),
        }
    }

    /// Latest reading of every applicable indicator, in report order.
    pub fn readings(&self, prices: &[f64]) -> Vec<IndicatorReading> {
        let mut readings = Vec::with_capacity(4);
        let Some(&price) = prices.last() else {
            return readings;
        };

        if applicable(self.rsi.name(), self.rsi.validate_data(prices)) {
            if let Some(&value) = self.rsi.calculate(prices).last() {
                readings.push(IndicatorReading::Rsi { value });
            }
        }

        if applicable(self.macd.name(), self.macd.validate_data(prices)) {
            if let Some(latest) = self.macd.calculate(prices).last() {
                readings.push(IndicatorReading::Macd {
                    macd: latest.macd,
                    signal: latest.signal,
                    histogram: latest.histogram,
                });
            }
        }

        let ma_check = self
            .sma_short
            .validate_data(prices)
            .and(self.sma_long.validate_data(prices));
        if applicable("Moving Averages", ma_check) {
            let short = self.sma_short.calculate(prices);
            let long = self.sma_long.calculate(prices);
            if let (Some(&sma20), Some(&sma50)) = (short.last(), long.last()) {
                readings.push(IndicatorReading::MovingAverages {
                    sma20,
                    sma50,
                    price,
                });
            }
        }

        if applicable(self.bollinger.name(), self.bollinger.validate_data(prices)) {
            if let Some(latest) = self.bollinger.calculate(prices).last() {
                readings.push(IndicatorReading::Bollinger {
                    upper: latest.upper,
                    middle: latest.middle,
                    lower: latest.lower,
                    price,
                });
            }
        }

        readings
    }

    /// Build the report rows for a price series.
    pub fn report(&self, prices: &[f64]) -> Vec<TechnicalAnalysisResult> {
        self.readings(prices)
            .iter()
            .map(TechnicalAnalysisResult::from)
            .collect()
    }
}

impl Default for TechnicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Run RSI, MACD, the moving-average cross and Bollinger Bands over `prices`.
pub fn compute_indicator_report(prices: &[f64]) -> Vec<TechnicalAnalysisResult> {
    TechnicalAnalyzer::new().report(prices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ta_core::types::Signal;

    fn names(results: &[TechnicalAnalysisResult]) -> Vec<&str> {
        results.iter().map(|r| r.indicator.as_str()).collect()
    }

    #[test]
    fn test_empty_series() {
        assert!(compute_indicator_report(&[]).is_empty());
    }

    #[test]
    fn test_indicators_drop_out_by_window() {
        let series = |n: usize| -> Vec<f64> {
            (0..n)
                .map(|i| 100.0 + (i as f64 * 0.3).sin() * 4.0)
                .collect()
        };

        assert!(compute_indicator_report(&series(14)).is_empty());
        assert_eq!(names(&compute_indicator_report(&series(15))), vec!["RSI"]);
        assert_eq!(
            names(&compute_indicator_report(&series(20))),
            vec!["RSI", "Bollinger Bands"]
        );
        assert_eq!(
            names(&compute_indicator_report(&series(34))),
            vec!["RSI", "MACD", "Bollinger Bands"]
        );
        assert_eq!(
            names(&compute_indicator_report(&series(49))),
            vec!["RSI", "MACD", "Bollinger Bands"]
        );
        assert_eq!(
            names(&compute_indicator_report(&series(50))),
            vec!["RSI", "MACD", "Moving Averages", "Bollinger Bands"]
        );
    }

    #[test]
    fn test_rising_series_is_bullish_on_trend_indicators() {
        let prices: Vec<f64> = (0..60).map(|i| 100.0 * 1.01f64.powi(i)).collect();
        let report = compute_indicator_report(&prices);

        assert_eq!(report.len(), 4);
        let macd = &report[1];
        assert_eq!(macd.indicator, "MACD");
        assert_eq!(macd.signal, Signal::Buy);
        assert_eq!(macd.description, "MACD line is above signal line");

        let ma = &report[2];
        assert_eq!(ma.indicator, "Moving Averages");
        assert_eq!(ma.signal, Signal::Buy);
        assert_eq!(
            ma.description,
            "Price is above SMA20. Short-term MA above long-term (bullish)"
        );
    }

    #[test]
    fn test_falling_series_is_oversold() {
        let prices: Vec<f64> = (0..25).map(|i| 200.0 - i as f64 * 3.0).collect();
        let readings = TechnicalAnalyzer::new().readings(&prices);

        match readings[0] {
            IndicatorReading::Rsi { value } => assert!(value < 30.0),
            other => panic!("expected RSI first, got {:?}", other),
        }

        let report = compute_indicator_report(&prices);
        assert_eq!(report[0].signal, Signal::Buy);
        assert_eq!(report[0].value, "0.00");
    }

    #[test]
    fn test_flat_series_rsi_reads_100() {
        let prices = vec![42.0; 15];
        let report = compute_indicator_report(&prices);

        assert_eq!(report.len(), 1);
        assert_eq!(report[0].value, "100.00");
        assert_eq!(report[0].signal, Signal::Sell);
    }

    #[test]
    fn test_flat_series_bollinger_within_bands() {
        let prices = vec![42.0; 20];
        let report = compute_indicator_report(&prices);

        let bb = report.iter().find(|r| r.indicator == "Bollinger Bands").unwrap();
        assert_eq!(bb.signal, Signal::Neutral);
        assert_eq!(bb.value, "U: 42.00 | M: 42.00 | L: 42.00");
    }

    #[test]
    fn test_bollinger_breakout_sells() {
        let mut prices = vec![100.0; 19];
        prices.push(150.0);
        let report = compute_indicator_report(&prices);

        let bb = report.iter().find(|r| r.indicator == "Bollinger Bands").unwrap();
        assert_eq!(bb.signal, Signal::Sell);
        assert_eq!(bb.description, "Price is above upper band. Potentially overbought");
    }

    #[test]
    fn test_report_is_deterministic() {
        let prices: Vec<f64> = (0..80)
            .map(|i| 100.0 + (i as f64 * 0.2).cos() * 7.0)
            .collect();
        assert_eq!(
            compute_indicator_report(&prices),
            compute_indicator_report(&prices)
        );
    }
}
