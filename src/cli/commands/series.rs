//! Raw indicator series command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use ta_config::AppConfig;
use ta_core::error::IndicatorError;
use ta_core::traits::{Indicator, MultiOutputIndicator, OhlcIndicator, PriceSource};
use ta_core::types::OhlcSeries;
use ta_indicators::{Adx, Atr, BollingerBands, Ema, Macd, Rsi, Sma, Stochastic};
use tracing::{info, warn};

use crate::cli::{SeriesArgs, SeriesIndicator};

/// Lookback used when `--period` is not given.
fn default_period(indicator: SeriesIndicator) -> Option<usize> {
    match indicator {
        SeriesIndicator::Rsi | SeriesIndicator::Stochastic | SeriesIndicator::Atr | SeriesIndicator::Adx => Some(14),
        SeriesIndicator::Sma | SeriesIndicator::Ema | SeriesIndicator::Bollinger => Some(20),
        SeriesIndicator::Macd => None,
    }
}

/// Smallest period the indicator accepts.
fn min_period(indicator: SeriesIndicator) -> usize {
    match indicator {
        // A one-value window has no spread
        SeriesIndicator::Bollinger => 2,
        _ => 1,
    }
}

/// Resolve the effective period, rejecting ones the indicator cannot use.
fn resolve_period(indicator: SeriesIndicator, period: Option<usize>) -> Result<Option<usize>, IndicatorError> {
    match (period, default_period(indicator)) {
        (Some(_), None) => {
            warn!("{:?} uses fixed 12/26/9 periods; --period ignored", indicator);
            Ok(None)
        }
        (Some(p), Some(_)) if p < min_period(indicator) => Err(IndicatorError::InvalidParameter(format!(
            "{:?} period must be at least {}, got {}",
            indicator,
            min_period(indicator),
            p
        ))),
        (Some(p), Some(_)) => Ok(Some(p)),
        (None, default) => Ok(default),
    }
}

fn to_json<T: Serialize>(values: Vec<T>) -> Result<(usize, Value)> {
    Ok((values.len(), serde_json::to_value(values)?))
}

/// Compute one indicator over the series as JSON values.
fn compute(indicator: SeriesIndicator, period: Option<usize>, series: &OhlcSeries) -> Result<(usize, Value)> {
    let close = series.close();
    let (high, low) = (series.high(), series.low());
    let p = period.or_else(|| default_period(indicator)).unwrap_or_default();

    match indicator {
        SeriesIndicator::Rsi => to_json(Rsi::new(p).calculate(close)),
        SeriesIndicator::Macd => to_json(Macd::new().calculate(close)),
        SeriesIndicator::Sma => to_json(Sma::new(p).calculate(close)),
        SeriesIndicator::Ema => to_json(Ema::new(p).calculate(close)),
        SeriesIndicator::Bollinger => to_json(BollingerBands::with_params(p, 2.0).calculate(close)),
        SeriesIndicator::Stochastic => to_json(Stochastic::with_periods(p, 3).calculate_ohlc(high, low, close)),
        SeriesIndicator::Atr => to_json(Atr::new(p).calculate_ohlc(high, low, close)),
        SeriesIndicator::Adx => to_json(Adx::new(p).calculate_ohlc(high, low, close)),
    }
}

pub async fn run(args: SeriesArgs, config: &AppConfig) -> Result<()> {
    let period = resolve_period(args.indicator, args.period)?;

    let source = args.data.source(config)?;
    let days = args.data.days(config);
    let bars = source
        .historical_bars(&args.data.symbol, days)
        .await
        .with_context(|| format!("Failed to load prices for {}", args.data.symbol))?;
    let series = OhlcSeries::from_bars(&bars);

    let (count, values) = compute(args.indicator, period, &series)?;
    if count == 0 {
        warn!(
            points = series.len(),
            "Not enough data for {:?}; series is empty", args.indicator
        );
    }
    info!(symbol = %args.data.symbol, count, "Computed {:?} series", args.indicator);

    let body = json!({
        "symbol": args.data.symbol,
        "days": days,
        "indicator": format!("{:?}", args.indicator).to_lowercase(),
        "period": period,
        "values": values,
    });
    println!("{}", serde_json::to_string_pretty(&body)?);

    Ok(())
}
