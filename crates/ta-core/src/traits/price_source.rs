//! Price source trait definitions.

use crate::error::DataError;
use crate::types::Bar;
use async_trait::async_trait;

/// Trait for historical price sources.
///
/// The analysis core only ever sees the bars a source returns; where they
/// come from (files, a market-data provider) is up to the implementation.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch historical bars.
    ///
    /// # Arguments
    /// * `symbol` - The symbol to fetch
    /// * `days` - How many days of history, counted back from the newest bar
    ///
    /// # Returns
    /// A vector of bars ordered from oldest to newest
    async fn historical_bars(&self, symbol: &str, days: u32) -> Result<Vec<Bar>, DataError>;

    /// Get the price source name.
    fn name(&self) -> &str;
}
