//! Typed indicator readings and their signal rules.

use serde::Serialize;
use ta_core::types::{Signal, TechnicalAnalysisResult};

/// RSI below this reads oversold (buy).
pub const RSI_OVERSOLD: f64 = 30.0;
/// RSI above this reads overbought (sell).
pub const RSI_OVERBOUGHT: f64 = 70.0;

/// Latest value(s) of one report indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IndicatorReading {
    Rsi {
        value: f64,
    },
    Macd {
        macd: f64,
        signal: f64,
        histogram: f64,
    },
    MovingAverages {
        sma20: f64,
        sma50: f64,
        price: f64,
    },
    Bollinger {
        upper: f64,
        middle: f64,
        lower: f64,
        price: f64,
    },
}

/// `Buy` when `fast` is above `slow`, `Sell` when below.
fn cross_signal(fast: f64, slow: f64) -> Signal {
    if fast > slow {
        Signal::Buy
    } else if fast < slow {
        Signal::Sell
    } else {
        Signal::Neutral
    }
}

impl IndicatorReading {
    /// Display name used in the report.
    pub fn name(&self) -> &'static str {
        match self {
            IndicatorReading::Rsi { .. } => "RSI",
            IndicatorReading::Macd { .. } => "MACD",
            IndicatorReading::MovingAverages { .. } => "Moving Averages",
            IndicatorReading::Bollinger { .. } => "Bollinger Bands",
        }
    }

    /// Classify the reading.
    pub fn signal(&self) -> Signal {
        match *self {
            IndicatorReading::Rsi { value } => {
                if value < RSI_OVERSOLD {
                    Signal::Buy
                } else if value > RSI_OVERBOUGHT {
                    Signal::Sell
                } else {
                    Signal::Neutral
                }
            }
            IndicatorReading::Macd { macd, signal, .. } => cross_signal(macd, signal),
            IndicatorReading::MovingAverages { sma20, sma50, .. } => cross_signal(sma20, sma50),
            IndicatorReading::Bollinger {
                upper,
                lower,
                price,
                ..
            } => {
                if price < lower {
                    Signal::Buy
                } else if price > upper {
                    Signal::Sell
                } else {
                    Signal::Neutral
                }
            }
        }
    }

    /// Formatted value column.
    pub fn value_text(&self) -> String {
        match *self {
            IndicatorReading::Rsi { value } => format!("{:.2}", value),
            IndicatorReading::Macd { macd, signal, .. } => format!("{:.4} / {:.4}", macd, signal),
            IndicatorReading::MovingAverages { sma20, sma50, .. } => {
                format!("SMA20: {:.2} | SMA50: {:.2}", sma20, sma50)
            }
            IndicatorReading::Bollinger {
                upper,
                middle,
                lower,
                ..
            } => format!("U: {:.2} | M: {:.2} | L: {:.2}", upper, middle, lower),
        }
    }

    /// Human-readable explanation of the signal.
    ///
    /// The moving-average text reports the price against SMA20 on its own,
    /// so it can read "above" while the cross itself is neutral.
    pub fn description(&self) -> String {
        let signal = self.signal();
        match *self {
            IndicatorReading::Rsi { value } => {
                let reading = match signal {
                    Signal::Buy => "Oversold condition - potential buy signal",
                    Signal::Sell => "Overbought condition - potential sell signal",
                    Signal::Neutral => "Neutral territory",
                };
                format!("RSI is {:.2}. {}", value, reading)
            }
            IndicatorReading::Macd { .. } => {
                let position = match signal {
                    Signal::Buy => "above",
                    Signal::Sell => "below",
                    Signal::Neutral => "at",
                };
                format!("MACD line is {} signal line", position)
            }
            IndicatorReading::MovingAverages { sma20, price, .. } => {
                let position = if price > sma20 { "above" } else { "below" };
                let trend = match signal {
                    Signal::Buy => "Short-term MA above long-term (bullish)",
                    Signal::Sell => "Short-term MA below long-term (bearish)",
                    Signal::Neutral => "Neutral",
                };
                format!("Price is {} SMA20. {}", position, trend)
            }
            IndicatorReading::Bollinger { .. } => {
                let (position, note) = match signal {
                    Signal::Buy => ("below lower band", "Potentially oversold"),
                    Signal::Sell => ("above upper band", "Potentially overbought"),
                    Signal::Neutral => ("within bands", "Normal volatility range"),
                };
                format!("Price is {}. {}", position, note)
            }
        }
    }
}

impl From<&IndicatorReading> for TechnicalAnalysisResult {
    fn from(reading: &IndicatorReading) -> Self {
        TechnicalAnalysisResult {
            indicator: reading.name().to_string(),
            value: reading.value_text(),
            signal: reading.signal(),
            description: reading.description(),
        }
    }
}

impl From<IndicatorReading> for TechnicalAnalysisResult {
    fn from(reading: IndicatorReading) -> Self {
        (&reading).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_thresholds() {
        let cases = [
            (29.99, Signal::Buy, "Oversold condition - potential buy signal"),
            (30.0, Signal::Neutral, "Neutral territory"),
            (70.0, Signal::Neutral, "Neutral territory"),
            (70.01, Signal::Sell, "Overbought condition - potential sell signal"),
        ];

        for (value, expected, text) in cases {
            let reading = IndicatorReading::Rsi { value };
            assert_eq!(reading.signal(), expected, "RSI {}", value);
            assert!(reading.description().ends_with(text));
        }
    }

    #[test]
    fn test_rsi_result() {
        let result: TechnicalAnalysisResult = IndicatorReading::Rsi { value: 25.4567 }.into();

        assert_eq!(result.indicator, "RSI");
        assert_eq!(result.value, "25.46");
        assert_eq!(result.signal, Signal::Buy);
        assert_eq!(
            result.description,
            "RSI is 25.46. Oversold condition - potential buy signal"
        );
    }

    #[test]
    fn test_macd_result() {
        let above = IndicatorReading::Macd {
            macd: 1.5,
            signal: 1.25,
            histogram: 0.25,
        };
        let result = TechnicalAnalysisResult::from(above);
        assert_eq!(result.value, "1.5000 / 1.2500");
        assert_eq!(result.signal, Signal::Buy);
        assert_eq!(result.description, "MACD line is above signal line");

        let at = IndicatorReading::Macd {
            macd: 0.5,
            signal: 0.5,
            histogram: 0.0,
        };
        assert_eq!(at.signal(), Signal::Neutral);
        assert_eq!(at.description(), "MACD line is at signal line");

        let below = IndicatorReading::Macd {
            macd: -0.1,
            signal: 0.2,
            histogram: -0.3,
        };
        assert_eq!(below.signal(), Signal::Sell);
        assert_eq!(below.description(), "MACD line is below signal line");
    }

    #[test]
    fn test_moving_average_result() {
        let bearish = IndicatorReading::MovingAverages {
            sma20: 95.0,
            sma50: 100.0,
            price: 90.0,
        };
        let result = TechnicalAnalysisResult::from(bearish);
        assert_eq!(result.indicator, "Moving Averages");
        assert_eq!(result.value, "SMA20: 95.00 | SMA50: 100.00");
        assert_eq!(result.signal, Signal::Sell);
        assert_eq!(
            result.description,
            "Price is below SMA20. Short-term MA below long-term (bearish)"
        );
    }

    #[test]
    fn test_moving_average_neutral_cross_keeps_price_position() {
        let reading = IndicatorReading::MovingAverages {
            sma20: 100.0,
            sma50: 100.0,
            price: 105.0,
        };
        assert_eq!(reading.signal(), Signal::Neutral);
        assert_eq!(reading.description(), "Price is above SMA20. Neutral");

        // Price equal to SMA20 reads "below"
        let reading = IndicatorReading::MovingAverages {
            sma20: 100.0,
            sma50: 90.0,
            price: 100.0,
        };
        assert_eq!(
            reading.description(),
            "Price is below SMA20. Short-term MA above long-term (bullish)"
        );
    }

    #[test]
    fn test_bollinger_result() {
        let band = |price| IndicatorReading::Bollinger {
            upper: 110.0,
            middle: 100.0,
            lower: 90.0,
            price,
        };

        let result = TechnicalAnalysisResult::from(band(85.0));
        assert_eq!(result.indicator, "Bollinger Bands");
        assert_eq!(result.value, "U: 110.00 | M: 100.00 | L: 90.00");
        assert_eq!(result.signal, Signal::Buy);
        assert_eq!(result.description, "Price is below lower band. Potentially oversold");

        assert_eq!(band(115.0).signal(), Signal::Sell);
        assert_eq!(
            band(115.0).description(),
            "Price is above upper band. Potentially overbought"
        );

        // Touching a band stays within
        assert_eq!(band(110.0).signal(), Signal::Neutral);
        assert_eq!(
            band(90.0).description(),
            "Price is within bands. Normal volatility range"
        );
    }

    #[test]
    fn test_reading_serialization_is_tagged() {
        let json = serde_json::to_value(IndicatorReading::Rsi { value: 50.0 }).unwrap();
        assert_eq!(json["type"], "rsi");
        assert_eq!(json["value"], 50.0);

        let json = serde_json::to_value(IndicatorReading::MovingAverages {
            sma20: 1.0,
            sma50: 2.0,
            price: 3.0,
        })
        .unwrap();
        assert_eq!(json["type"], "moving_averages");
    }
}
