//! Core traits for the analysis system.

mod indicator;
mod price_source;

pub use indicator::{Indicator, MultiOutputIndicator, OhlcIndicator};
pub use price_source::PriceSource;
