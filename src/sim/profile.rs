//! Per-hour day profile: tariff, solar, load and net position.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::devices::{BaseLoad, Device, HourContext, SolarArray};
use crate::sim::tariff::TariffTables;
use crate::sim::types::HOURS;

/// Manual hour → value overrides (load in MW or tariff per kWh).
///
/// Serialized as a list of `{ hour, value }` entries so it can live in TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<HourValue>", into = "Vec<HourValue>")]
pub struct HourOverrides(BTreeMap<usize, f64>);

/// One override entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HourValue {
    pub hour: usize,
    pub value: f64,
}

impl HourOverrides {
    /// Creates an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value for `hour`, replacing any previous entry.
    pub fn insert(&mut self, hour: usize, value: f64) {
        self.0.insert(hour, value);
    }

    /// Returns the override for `hour`, if any.
    pub fn get(&self, hour: usize) -> Option<f64> {
        self.0.get(&hour).copied()
    }

    /// Iterates `(hour, value)` pairs in hour order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.0.iter().map(|(h, v)| (*h, *v))
    }
}

impl FromIterator<(usize, f64)> for HourOverrides {
    fn from_iter<I: IntoIterator<Item = (usize, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<HourValue>> for HourOverrides {
    fn from(entries: Vec<HourValue>) -> Self {
        entries.into_iter().map(|e| (e.hour, e.value)).collect()
    }
}

impl From<HourOverrides> for Vec<HourValue> {
    fn from(overrides: HourOverrides) -> Self {
        overrides
            .iter()
            .map(|(hour, value)| HourValue { hour, value })
            .collect()
    }
}

/// Derived inputs for one hour of the horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyVector {
    /// Hour of day.
    pub hour: usize,
    /// Effective tariff (per kWh).
    pub tariff: f64,
    /// Solar output estimate (MW).
    pub solar_mw: f64,
    /// Load from the base curve (MW).
    pub base_load_mw: f64,
    /// Load after manual override (MW).
    pub load_mw: f64,
    /// Whether `load_mw` came from an override.
    pub is_manual_override: bool,
    /// Weather for the hour, after fallbacks.
    pub weather: HourContext,
}

impl HourlyVector {
    /// `load - solar`: positive is deficit, negative is surplus (MW).
    pub fn net_mw(&self) -> f64 {
        self.load_mw - self.solar_mw
    }

    /// Solar left over after serving load (MW, >= 0).
    pub fn surplus_mw(&self) -> f64 {
        (self.solar_mw - self.load_mw).max(0.0)
    }

    /// Load not covered by solar (MW, >= 0).
    pub fn deficit_mw(&self) -> f64 {
        (self.load_mw - self.solar_mw).max(0.0)
    }
}

/// Builds the 24-hour profile that every dispatch pass reads from.
#[derive(Debug, Clone)]
pub struct ProfileBuilder<'a> {
    solar: SolarArray,
    load: BaseLoad,
    tariffs: &'a TariffTables,
    temp_c: &'a [f64],
    humidity_pct: &'a [f64],
    cloud_pct: &'a [f64],
}

impl<'a> ProfileBuilder<'a> {
    /// Creates a builder reading devices, tables and weather from `config`.
    pub fn new(config: &'a SimulationConfig) -> Self {
        Self {
            solar: config.solar_array(),
            load: config.base_load(),
            tariffs: &config.tariff,
            temp_c: &config.weather.temp_c,
            humidity_pct: &config.weather.humidity_pct,
            cloud_pct: &config.weather.cloud_pct,
        }
    }

    /// Builds the vector for a single hour.
    pub fn hour(
        &self,
        hour: usize,
        load_overrides: &HourOverrides,
        tariff_overrides: &HourOverrides,
    ) -> HourlyVector {
        let weather =
            HourContext::from_weather(hour, self.temp_c, self.humidity_pct, self.cloud_pct);
        let tariff = tariff_overrides
            .get(hour)
            .unwrap_or_else(|| self.tariffs.price_at(hour));
        let base_load_mw = self.load.power_mw(&weather);
        let override_mw = load_overrides.get(hour);

        HourlyVector {
            hour,
            tariff,
            solar_mw: self.solar.power_mw(&weather),
            base_load_mw,
            load_mw: override_mw.unwrap_or(base_load_mw),
            is_manual_override: override_mw.is_some(),
            weather,
        }
    }

    /// Builds all 24 hours.
    pub fn build(
        &self,
        load_overrides: &HourOverrides,
        tariff_overrides: &HourOverrides,
    ) -> Vec<HourlyVector> {
        (0..HOURS)
            .map(|h| self.hour(h, load_overrides, tariff_overrides))
            .collect()
    }
}
