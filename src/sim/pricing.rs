//! Distributional price statistics used by the arbitrage rules.

use crate::sim::profile::HourlyVector;

/// Quantile of the sorted day prices that marks the cheap tier.
pub const LOW_QUANTILE: f64 = 0.25;
/// Quantile of the sorted day prices that marks the peak tier.
pub const HIGH_QUANTILE: f64 = 0.75;

/// Price tiers for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBands {
    /// 25th-percentile price (nearest-rank on the sorted tariffs).
    pub low: f64,
    /// 75th-percentile price.
    pub high: f64,
    /// Highest price of the day.
    pub max: f64,
    /// Arithmetic mean price.
    pub mean: f64,
    /// Hours with `tariff >= high`, ascending.
    pub peak_hours: Vec<usize>,
}

impl PriceBands {
    /// Classifies the tariffs of a day profile.
    ///
    /// An empty profile yields all-zero bands with no peak hours.
    pub fn classify(day: &[HourlyVector]) -> Self {
        let mut sorted: Vec<f64> = day.iter().map(|v| v.tariff).collect();
        if sorted.is_empty() {
            return Self {
                low: 0.0,
                high: 0.0,
                max: 0.0,
                mean: 0.0,
                peak_hours: Vec::new(),
            };
        }
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let at = |q: f64| sorted[((n as f64 * q).floor() as usize).min(n - 1)];
        let low = at(LOW_QUANTILE);
        let high = at(HIGH_QUANTILE);
        let max = sorted[n - 1];
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let peak_hours = day
            .iter()
            .filter(|v| v.tariff >= high)
            .map(|v| v.hour)
            .collect();

        Self {
            low,
            high,
            max,
            mean,
            peak_hours,
        }
    }

    /// First peak hour strictly after `hour`.
    pub fn next_peak_after(&self, hour: usize) -> Option<usize> {
        self.peak_hours.iter().copied().find(|&h| h > hour)
    }

    pub fn is_peak(&self, tariff: f64) -> bool {
        tariff >= self.high
    }

    pub fn is_cheap(&self, tariff: f64) -> bool {
        tariff <= self.low
    }
}
