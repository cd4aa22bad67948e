//! Analysis output types shared with downstream consumers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete trading signal derived from an indicator reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Buy,
    Sell,
    Neutral,
}

impl Signal {
    /// Signal name as consumers expect it on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "buy",
            Signal::Sell => "sell",
            Signal::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the technical analysis report.
///
/// Field names are part of the JSON contract and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalAnalysisResult {
    /// Indicator display name
    pub indicator: String,
    /// Formatted latest value(s)
    pub value: String,
    /// Classified signal
    pub signal: Signal,
    /// Human-readable explanation
    pub description: String,
}

/// Clustered support and resistance price levels, ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportResistanceLevels {
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
}

impl SupportResistanceLevels {
    /// Check if neither side found a level.
    pub fn is_empty(&self) -> bool {
        self.support.is_empty() && self.resistance.is_empty()
    }
}
