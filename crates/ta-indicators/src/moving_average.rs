//! Moving averages and the recursive smoothing shared by other indicators.

use ta_core::traits::Indicator;

/// Recursive average seeded with the mean of the first `period` values.
///
/// Each later value moves the average by `alpha * (value - avg)`.
/// Output has `values.len() - period + 1` entries, or none for short input.
fn seeded_average(values: &[f64], period: usize, alpha: f64) -> Vec<f64> {
    let Some(seed_window) = values.get(..period) else {
        return vec![];
    };

    let mut avg = seed_window.iter().sum::<f64>() / period as f64;
    let mut out = Vec::with_capacity(values.len() - period + 1);
    out.push(avg);
    out.extend(values[period..].iter().map(|&v| {
        avg += alpha * (v - avg);
        avg
    }));
    out
}

/// Wilder's smoothing (`alpha = 1 / period`), as used by RSI and ATR.
pub(crate) fn wilder(values: &[f64], period: usize) -> Vec<f64> {
    seeded_average(values, period, 1.0 / period as f64)
}

/// Simple Moving Average (SMA).
///
/// Arithmetic mean over a sliding window of `period` values.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let window = self.period;
        let divisor = window as f64;
        let mut running = 0.0;

        data.iter()
            .enumerate()
            .filter_map(|(i, &value)| {
                running += value;
                if i >= window {
                    running -= data[i - window];
                }
                (i + 1 >= window).then(|| running / divisor)
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Seeded with the SMA of the first `period` values, then
/// `ema = prev + k * (value - prev)` with `k = 2 / (period + 1)`.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    k: f64,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self {
            period,
            k: 2.0 / (period as f64 + 1.0),
        }
    }

    /// Smoothing factor `k`.
    pub fn multiplier(&self) -> f64 {
        self.k
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        seeded_average(data, self.period, self.k)
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "EMA"
    }
}
