//! Trend strength indicators.

use serde::{Deserialize, Serialize};
use ta_core::traits::OhlcIndicator;

use crate::moving_average::wilder;
use crate::volatility::true_ranges;

/// ADX output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdxOutput {
    /// Average Directional Index
    pub adx: f64,
    /// Positive directional indicator (+DI)
    pub pdi: f64,
    /// Negative directional indicator (-DI)
    pub mdi: f64,
}

/// Average Directional Index (ADX).
///
/// Quantifies trend strength regardless of direction:
/// 1. +DM, -DM and true range per bar transition.
/// 2. Wilder smoothing of each over `period`.
/// 3. +DI / -DI = smoothed DM / smoothed TR * 100, DX = |+DI - -DI| / (+DI + -DI) * 100.
/// 4. ADX = Wilder average of DX, seeded with the mean of the first `period` DX values.
#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
}

impl Adx {
    /// Create a new ADX indicator.
    ///
    /// Common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    fn directional_index(plus_dm: f64, minus_dm: f64, tr: f64) -> (f64, f64, f64) {
        if tr == 0.0 {
            return (0.0, 0.0, 0.0);
        }
        let pdi = plus_dm / tr * 100.0;
        let mdi = minus_dm / tr * 100.0;
        let sum = pdi + mdi;
        let dx = if sum == 0.0 {
            0.0
        } else {
            (pdi - mdi).abs() / sum * 100.0
        };
        (pdi, mdi, dx)
    }
}

impl Default for Adx {
    fn default() -> Self {
        Self::new(14)
    }
}

impl OhlcIndicator for Adx {
    type Output = AdxOutput;

    fn calculate_ohlc(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<AdxOutput> {
        let len = high.len().min(low.len()).min(close.len());
        if len < self.period() {
            return vec![];
        }

        let (plus_dm, minus_dm): (Vec<f64>, Vec<f64>) = high[..len]
            .windows(2)
            .zip(low[..len].windows(2))
            .map(|(h, l)| {
                let up = h[1] - h[0];
                let down = l[0] - l[1];
                (
                    if up > down && up > 0.0 { up } else { 0.0 },
                    if down > up && down > 0.0 { down } else { 0.0 },
                )
            })
            .unzip();
        let tr = true_ranges(&high[..len], &low[..len], &close[..len]);

        // Wilder averages; the DI ratios match the running-sum formulation
        let readings: Vec<(f64, f64, f64)> = wilder(&plus_dm, self.period)
            .into_iter()
            .zip(wilder(&minus_dm, self.period))
            .zip(wilder(&tr, self.period))
            .map(|((p, m), t)| Self::directional_index(p, m, t))
            .collect();

        let dx: Vec<f64> = readings.iter().map(|r| r.2).collect();
        wilder(&dx, self.period)
            .into_iter()
            .zip(&readings[self.period - 1..])
            .map(|(adx, &(pdi, mdi, _))| AdxOutput { adx, pdi, mdi })
            .collect()
    }

    fn period(&self) -> usize {
        2 * self.period
    }

    fn name(&self) -> &str {
        "ADX"
    }
}
