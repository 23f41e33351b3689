//! Tariff lookup tables.

use serde::{Deserialize, Serialize};

/// Default day-ahead market price curve, per kWh, indexed by hour.
pub const DEFAULT_MARKET_CURVE: [f64; 24] = [
    4.20, 3.80, 3.50, 3.20, 3.10, 3.50, // 00-05 night trough
    5.50, 6.80, 8.20, 7.50, 6.50, 6.20, // 06-11 morning ramp
    5.80, 5.50, 5.40, 6.00, 7.50, 9.80, // 12-17 midday / early evening
    12.50, 11.20, 9.50, 7.80, 6.20, 5.10, // 18-23 peak and cooling
];

/// Three-tier time-of-day tariff.
///
/// Window bounds are half-open hour ranges; the discount window is checked
/// before the peak window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeOfDayTariff {
    /// Price inside the solar discount window.
    pub discount: f64,
    /// Discount window `[start, end)`.
    pub discount_hours: (usize, usize),
    /// Price inside the evening peak window.
    pub peak: f64,
    /// Peak window `[start, end)`.
    pub peak_hours: (usize, usize),
    /// Price at all other hours.
    pub normal: f64,
}

impl Default for TimeOfDayTariff {
    fn default() -> Self {
        Self {
            discount: 6.00,
            discount_hours: (6, 10),
            peak: 9.00,
            peak_hours: (17, 21),
            normal: 7.50,
        }
    }
}

impl TimeOfDayTariff {
    /// Returns the price for `hour`.
    pub fn price_at(&self, hour: usize) -> f64 {
        let (ds, de) = self.discount_hours;
        let (ps, pe) = self.peak_hours;
        if hour >= ds && hour < de {
            self.discount
        } else if hour >= ps && hour < pe {
            self.peak
        } else {
            self.normal
        }
    }
}

/// Tariff source for a day: fixed time-of-day tiers or a dynamic market curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffTables {
    /// Use the market curve instead of the time-of-day tiers.
    pub dynamic: bool,
    /// Time-of-day tiers.
    pub time_of_day: TimeOfDayTariff,
    /// Market price per hour.
    pub market_curve: Vec<f64>,
}

impl Default for TariffTables {
    fn default() -> Self {
        Self {
            dynamic: true,
            time_of_day: TimeOfDayTariff::default(),
            market_curve: DEFAULT_MARKET_CURVE.to_vec(),
        }
    }
}

impl TariffTables {
    /// Returns the table price for `hour`, before any manual override.
    ///
    /// The market curve is indexed with the hour clamped to its last entry;
    /// an empty curve falls back to the time-of-day tiers.
    pub fn price_at(&self, hour: usize) -> f64 {
        if self.dynamic {
            let last = self.market_curve.len().saturating_sub(1);
            if let Some(price) = self.market_curve.get(hour.min(last)) {
                return *price;
            }
        }
        self.time_of_day.price_at(hour)
    }
}
