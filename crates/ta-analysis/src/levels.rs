//! Support and resistance detection.
//!
//! Local extrema are found with a strict five-point test, then nearby
//! extrema are merged into a single level when consecutive values (in
//! ascending order) differ by less than the relative tolerance.

use ta_core::types::SupportResistanceLevels;

/// Default relative clustering tolerance (2%).
pub const DEFAULT_TOLERANCE: f64 = 0.02;

const DEFAULT_MAX_LEVELS: usize = 3;

/// Indices of local extrema in a price series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extrema {
    /// Local minima (support candidates)
    pub minima: Vec<usize>,
    /// Local maxima (resistance candidates)
    pub maxima: Vec<usize>,
}

impl Extrema {
    /// Scan for points strictly below (or above) both neighbors on each side.
    ///
    /// A point tying any of its four neighbors is neither.
    pub fn scan(prices: &[f64]) -> Self {
        let mut extrema = Extrema::default();

        for (offset, window) in prices.windows(5).enumerate() {
            let center = window[2];
            let neighbors = [window[0], window[1], window[3], window[4]];

            if neighbors.iter().all(|&p| center < p) {
                extrema.minima.push(offset + 2);
            }
            if neighbors.iter().all(|&p| center > p) {
                extrema.maxima.push(offset + 2);
            }
        }

        extrema
    }
}

/// Clusters local extrema into support and resistance levels.
#[derive(Debug, Clone, PartialEq)]
pub struct SupportResistanceDetector {
    tolerance: f64,
    max_levels: usize,
}

impl SupportResistanceDetector {
    /// Create a detector with the given relative tolerance.
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            max_levels: DEFAULT_MAX_LEVELS,
        }
    }

    /// Keep at most `max_levels` levels per side.
    pub fn with_max_levels(mut self, max_levels: usize) -> Self {
        self.max_levels = max_levels;
        self
    }

    /// Relative clustering tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Merge nearby values into cluster means, ascending.
    pub fn cluster_levels(&self, levels: &[f64]) -> Vec<f64> {
        if levels.is_empty() {
            return vec![];
        }

        let mut sorted = levels.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mut clustered = Vec::new();
        let mut cluster = vec![sorted[0]];

        for pair in sorted.windows(2) {
            let diff = (pair[1] - pair[0]).abs() / pair[0];
            if diff < self.tolerance {
                cluster.push(pair[1]);
            } else {
                clustered.push(mean(&cluster));
                cluster.clear();
                cluster.push(pair[1]);
            }
        }
        clustered.push(mean(&cluster));

        clustered
    }

    /// Detect support and resistance levels in a price series.
    ///
    /// Each side keeps its highest `max_levels` clusters, still ascending.
    pub fn detect(&self, prices: &[f64]) -> SupportResistanceLevels {
        let extrema = Extrema::scan(prices);
        let pick = |indices: &[usize]| -> Vec<f64> {
            let values: Vec<f64> = indices.iter().map(|&i| prices[i]).collect();
            let mut levels = self.cluster_levels(&values);
            let skip = levels.len().saturating_sub(self.max_levels);
            levels.split_off(skip)
        };

        SupportResistanceLevels {
            support: pick(&extrema.minima),
            resistance: pick(&extrema.maxima),
        }
    }
}

impl Default for SupportResistanceDetector {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Detect support and resistance, with the default 2% tolerance when none is given.
pub fn compute_support_resistance(prices: &[f64], tolerance: Option<f64>) -> SupportResistanceLevels {
    SupportResistanceDetector::new(tolerance.unwrap_or(DEFAULT_TOLERANCE)).detect(prices)
}
