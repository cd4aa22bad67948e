//! CSV price source.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use ta_core::error::DataError;
use ta_core::traits::PriceSource;
use ta_core::types::Bar;
use tracing::debug;

/// CSV record format.
///
/// Only a date and a close are required; missing open/high/low fall back
/// to the close so single-price exports load as flat bars. `Adj Close`
/// is only used when there is no plain close column.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp", alias = "time")]
    date: String,
    #[serde(alias = "Open", alias = "open", default)]
    open: Option<f64>,
    #[serde(alias = "High", alias = "high", default)]
    high: Option<f64>,
    #[serde(alias = "Low", alias = "low", default)]
    low: Option<f64>,
    #[serde(alias = "Close", alias = "close", alias = "price", alias = "Price", default)]
    close: Option<f64>,
    #[serde(rename = "Adj Close", alias = "adj_close", alias = "adjclose", default)]
    adj_close: Option<f64>,
    #[serde(alias = "Volume", alias = "volume", default)]
    volume: Option<f64>,
}

impl CsvRecord {
    fn into_bar(self, timestamp: i64) -> Result<Bar, DataError> {
        let close = self.close.or(self.adj_close).ok_or_else(|| {
            DataError::ParseError(format!("Row dated {} has no close price", self.date))
        })?;
        Ok(Bar::new(
            timestamp,
            self.open.unwrap_or(close),
            self.high.unwrap_or(close),
            self.low.unwrap_or(close),
            close,
            self.volume.unwrap_or(0.0),
        ))
    }
}

/// CSV price source for historical data.
///
/// Points either at a single file, used for every symbol, or at a
/// directory holding `<symbol>.csv` / `<symbol>_daily.csv` files.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    path: PathBuf,
}

impl CsvPriceSource {
    /// Create a new CSV price source.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, DataError> {
        let path = path.into();
        if !path.exists() {
            return Err(DataError::Internal(format!(
                "Data path '{}' does not exist",
                path.display()
            )));
        }
        Ok(Self { path })
    }

    /// Find the file holding `symbol`.
    fn resolve(&self, symbol: &str) -> Result<PathBuf, DataError> {
        if self.path.is_file() {
            return Ok(self.path.clone());
        }

        let lower = symbol.to_lowercase();
        let candidates = [
            self.path.join(format!("{}.csv", symbol)),
            self.path.join(format!("{}.csv", lower)),
            self.path.join(format!("{}_daily.csv", symbol)),
            self.path.join(format!("{}_daily.csv", lower)),
        ];
        candidates
            .into_iter()
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))
    }

    /// Parse bars from CSV content, sorted oldest first.
    pub fn parse_reader<R: Read>(reader: R) -> Result<Vec<Bar>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut bars = Vec::new();

        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;
            let timestamp = parse_timestamp(&record.date)?;
            bars.push(record.into_bar(timestamp)?);
        }

        bars.sort_by_key(|b| b.timestamp);

        Ok(bars)
    }

    /// Load every bar from a file.
    async fn load_file(path: &Path) -> Result<Vec<Bar>, DataError> {
        let content = tokio::fs::read(path)
            .await
            .map_err(|e| DataError::Internal(format!("{}: {}", path.display(), e)))?;
        Self::parse_reader(content.as_slice())
    }
}

#[async_trait]
impl PriceSource for CsvPriceSource {
    async fn historical_bars(&self, symbol: &str, days: u32) -> Result<Vec<Bar>, DataError> {
        let path = self.resolve(symbol)?;
        let bars = Self::load_file(&path).await?;
        let total = bars.len();
        let bars = trim_to_days(bars, days);

        debug!(
            symbol,
            path = %path.display(),
            total,
            kept = bars.len(),
            "loaded CSV price history"
        );

        if bars.is_empty() {
            return Err(DataError::NoDataAvailable);
        }
        Ok(bars)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Keep bars no older than `days` before the newest bar.
pub fn trim_to_days(mut bars: Vec<Bar>, days: u32) -> Vec<Bar> {
    let Some(newest) = bars.iter().map(|b| b.timestamp).max() else {
        return bars;
    };
    let cutoff = newest - Duration::days(i64::from(days)).num_milliseconds();
    bars.retain(|b| b.timestamp >= cutoff);
    bars
}

/// Parse various timestamp formats into Unix milliseconds.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%SZ"];
    const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d.and_time(Default::default()).and_utc().timestamp_millis());
        }
    }

    // Unix timestamp, milliseconds if > 10 digits
    if let Ok(ts) = date_str.parse::<i64>() {
        if ts > 10_000_000_000 {
            return Ok(ts);
        } else {
            return Ok(ts * 1000);
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}
