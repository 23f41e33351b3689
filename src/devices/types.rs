//! Common types and traits for site device models.

/// Ambient temperature used when the weather feed has no entry for an hour (°C).
pub const FALLBACK_TEMP_C: f64 = 25.0;
/// Cloud cover used when the weather feed has no entry for an hour (%).
pub const FALLBACK_CLOUD_PCT: f64 = 0.0;
/// Relative humidity used when the weather feed has no entry for an hour (%).
pub const FALLBACK_HUMIDITY_PCT: f64 = 50.0;

/// Environmental conditions for a single hour, passed to device models.
///
/// # Fields
/// * `hour` - Hour of day (0..24)
/// * `temp_c` - Ambient temperature (°C)
/// * `humidity_pct` - Relative humidity (%)
/// * `cloud_pct` - Cloud cover (%)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourContext {
    pub hour: usize,
    pub temp_c: f64,
    pub humidity_pct: f64,
    pub cloud_pct: f64,
}

impl HourContext {
    /// Creates a context with fallback weather for the given hour.
    pub fn new(hour: usize) -> Self {
        Self {
            hour,
            temp_c: FALLBACK_TEMP_C,
            humidity_pct: FALLBACK_HUMIDITY_PCT,
            cloud_pct: FALLBACK_CLOUD_PCT,
        }
    }

    /// Builds the context for `hour` from per-hour weather arrays.
    ///
    /// Entries missing from any array fall back to [`FALLBACK_TEMP_C`],
    /// [`FALLBACK_HUMIDITY_PCT`] and [`FALLBACK_CLOUD_PCT`] instead of failing.
    pub fn from_weather(hour: usize, temp_c: &[f64], humidity_pct: &[f64], cloud_pct: &[f64]) -> Self {
        Self {
            hour,
            temp_c: temp_c.get(hour).copied().unwrap_or(FALLBACK_TEMP_C),
            humidity_pct: humidity_pct
                .get(hour)
                .copied()
                .unwrap_or(FALLBACK_HUMIDITY_PCT),
            cloud_pct: cloud_pct.get(hour).copied().unwrap_or(FALLBACK_CLOUD_PCT),
        }
    }
}

/// Trait for a site device that produces or consumes power on an hourly basis.
///
/// Implementations are pure: the same context always yields the same power,
/// so a day profile can be rebuilt for every pass without carrying state.
pub trait Device {
    /// Returns the device power for the hour described by `context`, in MW.
    ///
    /// Generators return output as a positive value, loads return demand as a
    /// positive value. The caller decides the sign convention when balancing.
    fn power_mw(&self, context: &HourContext) -> f64;
}
