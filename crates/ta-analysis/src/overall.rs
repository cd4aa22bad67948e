//! Overall signal aggregation.

use serde::{Deserialize, Serialize};
use std::fmt;
use ta_core::types::{Signal, TechnicalAnalysisResult};

/// Aggregate market read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Bullish,
    Bearish,
    #[serde(rename = "Mixed Signals")]
    MixedSignals,
    Neutral,
}

/// Overall signal across the report rows.
///
/// Only `buy` and `sell` rows count; `neutral` rows are ignored entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallSignal {
    pub verdict: Verdict,
    /// `buy / (buy + sell)`, absent when there are no directional rows
    pub buy_share: Option<f64>,
}

impl OverallSignal {
    const BULLISH_ABOVE: f64 = 0.6;
    const BEARISH_BELOW: f64 = 0.4;

    /// Aggregate a sequence of signals.
    pub fn from_signals<I>(signals: I) -> Self
    where
        I: IntoIterator<Item = Signal>,
    {
        let (buys, sells) = signals
            .into_iter()
            .fold((0usize, 0usize), |(buys, sells), signal| match signal {
                Signal::Buy => (buys + 1, sells),
                Signal::Sell => (buys, sells + 1),
                Signal::Neutral => (buys, sells),
            });

        let total = buys + sells;
        if total == 0 {
            return Self {
                verdict: Verdict::Neutral,
                buy_share: None,
            };
        }

        let share = buys as f64 / total as f64;
        let verdict = if share > Self::BULLISH_ABOVE {
            Verdict::Bullish
        } else if share < Self::BEARISH_BELOW {
            Verdict::Bearish
        } else {
            Verdict::MixedSignals
        };

        Self {
            verdict,
            buy_share: Some(share),
        }
    }

    /// Aggregate report rows.
    pub fn from_results(results: &[TechnicalAnalysisResult]) -> Self {
        Self::from_signals(results.iter().map(|r| r.signal))
    }
}

impl fmt::Display for OverallSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let buy_pct = self.buy_share.unwrap_or(0.0) * 100.0;
        match self.verdict {
            Verdict::Bullish => write!(f, "Bullish ({:.0}%)", buy_pct),
            Verdict::Bearish => write!(f, "Bearish ({:.0}%)", 100.0 - buy_pct),
            Verdict::MixedSignals => f.write_str("Mixed Signals"),
            Verdict::Neutral => f.write_str("Neutral"),
        }
    }
}
