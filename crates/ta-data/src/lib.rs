//! Price history sources.

mod csv_source;

pub use csv_source::{trim_to_days, CsvPriceSource};

use ta_core::error::DataError;
use ta_core::traits::PriceSource;
use ta_core::types::Bar;

/// Load `days` of bars for `symbol` from a CSV file or directory.
pub async fn load_csv(path: &str, symbol: &str, days: u32) -> Result<Vec<Bar>, DataError> {
    let source = CsvPriceSource::new(path)?;
    source.historical_bars(symbol, days).await
}
