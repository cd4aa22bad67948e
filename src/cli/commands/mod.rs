//! CLI command implementations.

pub mod analyze;
pub mod levels;
pub mod series;
pub mod validate;

use ta_analysis::SupportResistanceDetector;
use ta_config::AnalysisSettings;

/// Detector configured from the analysis settings.
fn detector(settings: &AnalysisSettings, tolerance: Option<f64>) -> SupportResistanceDetector {
    SupportResistanceDetector::new(tolerance.unwrap_or(settings.tolerance))
        .with_max_levels(settings.max_levels)
}
