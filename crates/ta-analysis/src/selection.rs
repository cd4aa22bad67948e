//! Indicator selection and analysis dispatch.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ta_core::error::IndicatorError;
use ta_core::traits::{Indicator, MultiOutputIndicator};
use ta_core::types::{SupportResistanceLevels, TechnicalAnalysisResult};
use ta_indicators::{BollingerOutput, MacdOutput};
use tracing::warn;

use crate::levels::SupportResistanceDetector;
use crate::report::TechnicalAnalyzer;

/// Requestable analysis component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    All,
    Rsi,
    Macd,
    Bollinger,
    Support,
}

impl FromStr for IndicatorKind {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(IndicatorKind::All),
            "rsi" => Ok(IndicatorKind::Rsi),
            "macd" => Ok(IndicatorKind::Macd),
            "bollinger" => Ok(IndicatorKind::Bollinger),
            "support" => Ok(IndicatorKind::Support),
            other => Err(IndicatorError::UnknownIndicator(other.to_string())),
        }
    }
}

/// Which parts of the analysis to compute.
///
/// An empty request, or one naming `all`, asks for the composite report
/// plus support/resistance. Unrecognized names are skipped, so a request
/// naming only unknown indicators computes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorSelection {
    kinds: Vec<IndicatorKind>,
    composite: bool,
}

impl Default for IndicatorSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl IndicatorSelection {
    /// Select the composite analysis.
    pub fn all() -> Self {
        Self {
            kinds: vec![],
            composite: true,
        }
    }

    /// Select specific components.
    pub fn new(kinds: Vec<IndicatorKind>) -> Self {
        let composite = kinds.is_empty() || kinds.contains(&IndicatorKind::All);
        Self { kinds, composite }
    }

    /// Parse indicator names, skipping ones that are not recognized.
    pub fn parse<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut requested = 0;
        let mut kinds = Vec::new();
        for name in names {
            requested += 1;
            match name.as_ref().parse::<IndicatorKind>() {
                Ok(kind) => kinds.push(kind),
                Err(err) => warn!(error = %err, "ignoring requested indicator"),
            }
        }

        let composite = requested == 0 || kinds.contains(&IndicatorKind::All);
        Self { kinds, composite }
    }

    /// Whether the composite analysis was requested.
    pub fn is_composite(&self) -> bool {
        self.composite
    }

    /// Whether a specific component was requested.
    pub fn includes(&self, kind: IndicatorKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// Analysis payload; only the requested parts are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Vec<TechnicalAnalysisResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_resistance: Option<SupportResistanceLevels>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsi: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macd: Option<Vec<MacdOutput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bollinger_bands: Option<Vec<BollingerOutput>>,
}

/// Report analyzer paired with a support/resistance detector.
#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    analyzer: TechnicalAnalyzer,
    detector: SupportResistanceDetector,
}

impl AnalysisEngine {
    /// Create an engine from its parts.
    pub fn new(analyzer: TechnicalAnalyzer, detector: SupportResistanceDetector) -> Self {
        Self { analyzer, detector }
    }

    /// Engine with the default analyzer and the given detector.
    pub fn with_detector(detector: SupportResistanceDetector) -> Self {
        Self::new(TechnicalAnalyzer::new(), detector)
    }

    /// Support/resistance detector in use.
    pub fn detector(&self) -> &SupportResistanceDetector {
        &self.detector
    }

    /// Compute the selected parts of the analysis.
    pub fn compute(&self, prices: &[f64], selection: &IndicatorSelection) -> AnalysisData {
        if selection.is_composite() {
            return AnalysisData {
                analysis: Some(self.analyzer.report(prices)),
                support_resistance: Some(self.detector.detect(prices)),
                ..AnalysisData::default()
            };
        }

        let mut data = AnalysisData::default();
        if selection.includes(IndicatorKind::Rsi) {
            data.rsi = Some(self.analyzer.rsi.calculate(prices));
        }
        if selection.includes(IndicatorKind::Macd) {
            data.macd = Some(self.analyzer.macd.calculate(prices));
        }
        if selection.includes(IndicatorKind::Bollinger) {
            data.bollinger_bands = Some(self.analyzer.bollinger.calculate(prices));
        }
        if selection.includes(IndicatorKind::Support) {
            data.support_resistance = Some(self.detector.detect(prices));
        }
        data
    }
}
