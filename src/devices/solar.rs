use std::f64::consts::PI;

use crate::devices::types::{Device, HourContext};

/// Clear-sky peak irradiance the array rating refers to (W/m²).
pub const REFERENCE_IRRADIANCE: f64 = 1000.0;
/// Output lost per °C above 25 °C.
pub const THERMAL_LOSS_PER_DEG: f64 = 0.004;
/// Output lost at 100 % relative humidity (scaled linearly).
pub const HUMIDITY_LOSS_COEFF: f64 = 0.2;

/// A solar PV array that models hourly generation from sun position and weather.
///
/// `SolarArray` produces a half-sine irradiance profile between sunrise and
/// sunset, evaluated at the middle of each hour, then attenuates it for cloud
/// cover, cell temperature and humidity.
#[derive(Debug, Clone)]
pub struct SolarArray {
    /// Rated output in MW at reference irradiance.
    pub capacity_mw: f64,

    /// Sunrise in decimal hours.
    pub sunrise_hour: f64,

    /// Sunset in decimal hours.
    pub sunset_hour: f64,
}

impl SolarArray {
    /// Creates a new solar array.
    ///
    /// # Arguments
    ///
    /// * `capacity_mw` - Rated output in MW
    /// * `sunrise_hour` - Sunrise in decimal hours (inclusive)
    /// * `sunset_hour` - Sunset in decimal hours (exclusive)
    pub fn new(capacity_mw: f64, sunrise_hour: f64, sunset_hour: f64) -> Self {
        Self {
            capacity_mw,
            sunrise_hour,
            sunset_hour,
        }
    }

    /// Returns the sun position factor for the middle of `hour`, or `None` at night.
    fn sun_position(&self, hour: usize) -> Option<f64> {
        let mid = hour as f64 + 0.5;
        if mid < self.sunrise_hour || mid >= self.sunset_hour {
            return None;
        }
        let day_length = self.sunset_hour - self.sunrise_hour;
        Some((PI * (mid - self.sunrise_hour) / day_length).sin())
    }
}

/// Fractional output loss from cell heating and humidity.
pub fn weather_loss(temp_c: f64, humidity_pct: f64) -> f64 {
    let thermal = ((temp_c - 25.0) * THERMAL_LOSS_PER_DEG).max(0.0);
    let humidity = (humidity_pct / 100.0) * HUMIDITY_LOSS_COEFF;
    thermal + humidity
}

impl Device for SolarArray {
    /// Generation in MW for the hour; 0.0 outside `[sunrise, sunset)`.
    fn power_mw(&self, context: &HourContext) -> f64 {
        let Some(position) = self.sun_position(context.hour) else {
            return 0.0;
        };

        let ghi = REFERENCE_IRRADIANCE * position;
        let effective = ghi * (1.0 - context.cloud_pct / 100.0);
        let clean = effective * (1.0 - weather_loss(context.temp_c, context.humidity_pct));
        (clean / REFERENCE_IRRADIANCE * self.capacity_mw).max(0.0)
    }
}
