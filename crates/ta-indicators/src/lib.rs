//! Technical indicators over price and OHLC series.
//!
//! This crate provides batch implementations of common technical indicators:
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (RSI, MACD, Stochastic)
//! - Volatility indicators (ATR, standard deviation, Bollinger Bands)
//! - Trend strength (ADX)
//!
//! Every indicator returns an empty vector when the input is shorter than
//! its window. Outputs are ordered oldest first; the last element is the
//! latest reading.

pub mod momentum;
pub mod moving_average;
pub mod trend;
pub mod volatility;

pub use momentum::{Macd, MacdOutput, Rsi, Stochastic, StochasticOutput};
pub use moving_average::{Ema, Sma};
pub use trend::{Adx, AdxOutput};
pub use volatility::{Atr, BollingerBands, BollingerOutput, StdDev};
