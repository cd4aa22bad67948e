//! Technical analysis requests against a price source.

use serde::{Deserialize, Serialize};
use ta_core::error::{TaError, TaResult};
use ta_core::traits::PriceSource;
use tracing::{debug, info};

use crate::overall::OverallSignal;
use crate::selection::{AnalysisData, AnalysisEngine, IndicatorSelection};

fn default_days() -> u32 {
    30
}

/// Analysis request: which symbol, how much history, which indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalRequest {
    pub symbol: String,
    #[serde(default = "default_days")]
    pub days: u32,
    #[serde(default)]
    pub indicators: Vec<String>,
}

impl TechnicalRequest {
    /// Request the composite analysis for a symbol.
    pub fn new(symbol: impl Into<String>, days: u32) -> Self {
        Self {
            symbol: symbol.into(),
            days,
            indicators: vec![],
        }
    }

    /// Restrict the request to named indicators.
    pub fn with_indicators(mut self, indicators: Vec<String>) -> Self {
        self.indicators = indicators;
        self
    }
}

/// Analysis response, including the close prices the analysis ran on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalResponse {
    pub symbol: String,
    pub days: u32,
    pub data: AnalysisData,
    pub prices: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall: Option<OverallSignal>,
}

impl TechnicalResponse {
    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str(&format!(
            "            TECHNICAL ANALYSIS: {} ({} days)\n",
            self.symbol, self.days
        ));
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str(&format!("  Data points:         {}\n", self.prices.len()));
        if let Some(price) = self.prices.last() {
            s.push_str(&format!("  Last price:          {:.2}\n", price));
        }
        s.push('\n');

        if let Some(analysis) = &self.data.analysis {
            s.push_str("INDICATORS\n");
            s.push_str("───────────────────────────────────────────────────────────\n");
            if analysis.is_empty() {
                s.push_str("  Not enough data for any indicator\n");
            }
            for row in analysis {
                s.push_str(&format!(
                    "  {:<17} {:<8} {}\n",
                    row.indicator,
                    row.signal.as_str().to_uppercase(),
                    row.value
                ));
                s.push_str(&format!("  {:<17} {}\n", "", row.description));
            }
            s.push('\n');
        }

        if let Some(overall) = &self.overall {
            s.push_str(&format!("  Overall Signal:      {}\n\n", overall));
        }

        if let Some(levels) = &self.data.support_resistance {
            let join = |values: &[f64]| -> String {
                if values.is_empty() {
                    "none".to_string()
                } else {
                    values
                        .iter()
                        .map(|v| format!("{:.2}", v))
                        .collect::<Vec<_>>()
                        .join(", ")
                }
            };
            s.push_str("SUPPORT / RESISTANCE\n");
            s.push_str("───────────────────────────────────────────────────────────\n");
            s.push_str(&format!("  Support:             {}\n", join(&levels.support)));
            s.push_str(&format!("  Resistance:          {}\n", join(&levels.resistance)));
            s.push('\n');
        }

        let series = [
            ("RSI", self.data.rsi.as_ref().map(Vec::len)),
            ("MACD", self.data.macd.as_ref().map(Vec::len)),
            ("Bollinger Bands", self.data.bollinger_bands.as_ref().map(Vec::len)),
        ];
        if series.iter().any(|(_, len)| len.is_some()) {
            s.push_str("SERIES\n");
            s.push_str("───────────────────────────────────────────────────────────\n");
            for (name, len) in series {
                if let Some(len) = len {
                    s.push_str(&format!("  {:<20} {} values\n", format!("{}:", name), len));
                }
            }
            s.push('\n');
        }

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s
    }

    /// Convert to JSON.
    pub fn to_json(&self) -> TaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Serves analysis requests from a price source.
pub struct TechnicalService<S> {
    source: S,
    engine: AnalysisEngine,
}

impl<S: PriceSource> TechnicalService<S> {
    /// Create a service over a price source.
    pub fn new(source: S, engine: AnalysisEngine) -> Self {
        Self { source, engine }
    }

    /// Load the price history and compute the requested analysis.
    pub async fn handle(&self, request: &TechnicalRequest) -> TaResult<TechnicalResponse> {
        let symbol = request.symbol.trim();
        if symbol.is_empty() {
            return Err(TaError::Validation("Symbol is required".to_string()));
        }

        let selection = IndicatorSelection::parse(&request.indicators);

        let bars = self.source.historical_bars(symbol, request.days).await?;
        let prices: Vec<f64> = bars.iter().map(|b| b.close).collect();
        debug!(
            symbol,
            source = self.source.name(),
            bars = prices.len(),
            "loaded price history"
        );

        let data = self.engine.compute(&prices, &selection);
        let overall = data.analysis.as_deref().map(OverallSignal::from_results);

        info!(
            symbol,
            days = request.days,
            points = prices.len(),
            "technical analysis computed"
        );

        Ok(TechnicalResponse {
            symbol: symbol.to_string(),
            days: request.days,
            data,
            prices,
            overall,
        })
    }
}
