use crate::devices::types::{Device, HourContext};

/// Default site demand per hour of day (MW).
pub const DEFAULT_LOAD_CURVE_MW: [f64; 24] = [
    0.115, 0.115, 0.115, 0.115, 0.115, 0.115, // 00-05
    0.250, 0.250, 0.250, // 06-08
    0.475, 0.475, 0.475, 0.475, // 09-12
    0.475, 0.475, 0.475, 0.475, // 13-16
    0.375, 0.375, 0.375, // 17-19
    0.225, 0.225, 0.225, 0.225, // 20-23
];

/// Site demand following a fixed 24-value curve.
///
/// Manual per-hour overrides are applied on top of this curve by the profile
/// builder; the curve itself stays the reported "base" load.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseLoad {
    /// Demand in MW indexed by hour of day.
    pub curve_mw: Vec<f64>,
}

impl BaseLoad {
    /// Creates a base load from a curve. Hours past the end of the curve draw 0 MW.
    pub fn new(curve_mw: Vec<f64>) -> Self {
        Self { curve_mw }
    }

    /// Returns the curve value for `hour`.
    pub fn at(&self, hour: usize) -> f64 {
        self.curve_mw.get(hour).copied().unwrap_or(0.0)
    }
}

impl Default for BaseLoad {
    fn default() -> Self {
        Self::new(DEFAULT_LOAD_CURVE_MW.to_vec())
    }
}

impl Device for BaseLoad {
    fn power_mw(&self, context: &HourContext) -> f64 {
        self.at(context.hour)
    }
}
