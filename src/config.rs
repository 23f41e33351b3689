//! TOML-based site configuration and preset definitions.

use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::devices::baseload::DEFAULT_LOAD_CURVE_MW;
use crate::devices::types::{FALLBACK_CLOUD_PCT, FALLBACK_HUMIDITY_PCT, FALLBACK_TEMP_C};
use crate::devices::{BaseLoad, Battery, DieselGenerator, SolarArray};
use crate::error::{ConfigError, Result};
use crate::sim::audit::CostRates;
use crate::sim::grid::GridConnection;
use crate::sim::outage::OutageInterval;
use crate::sim::profile::HourOverrides;
use crate::sim::tariff::TariffTables;
use crate::sim::types::{HOURS, Scenario, Strategy};

/// Complete description of the site and the day to dispatch.
///
/// All sections have defaults matching the `agra_summer` preset. Load from
/// TOML with [`SimulationConfig::from_toml_file`] or pick a built-in with
/// [`SimulationConfig::from_preset`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Operating strategy.
    #[serde(default)]
    pub dispatch: DispatchConfig,
    /// Solar array parameters.
    #[serde(default)]
    pub solar: SolarConfig,
    /// Battery store parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Hourly weather arrays.
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Grid connection, import cap and outages.
    #[serde(default)]
    pub grid: GridConfig,
    /// Backup generator.
    #[serde(default)]
    pub diesel: DieselConfig,
    /// Tariff tables.
    #[serde(default)]
    pub tariff: TariffTables,
    /// Base-load curve.
    #[serde(default)]
    pub load: LoadConfig,
    /// Manual per-hour overrides.
    #[serde(default)]
    pub overrides: OverridesConfig,
}

/// Operating strategy for the requested pass.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
    /// `"standard"`, `"arbitrage"` or `"self_consumption"`.
    pub strategy: Strategy,
}

/// Solar array parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarConfig {
    /// Nameplate capacity (MW).
    pub capacity_mw: f64,
    /// Sunrise, decimal hours.
    pub sunrise_hour: f64,
    /// Sunset, decimal hours.
    pub sunset_hour: f64,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            capacity_mw: 1.2,
            sunrise_hour: 6.0,
            sunset_hour: 18.0,
        }
    }
}

/// Battery store parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Energy capacity (MWh).
    pub capacity_mwh: f64,
    /// Nameplate charge power (MW).
    pub max_charge_mw: f64,
    /// Nameplate discharge power (MW).
    pub max_discharge_mw: f64,
    /// Lower SoC bound (%).
    pub min_soc_pct: f64,
    /// Upper SoC bound (%).
    pub max_soc_pct: f64,
    /// Let the arbitrage strategy sell battery energy during peak hours.
    pub allow_export: bool,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            capacity_mwh: 2.5,
            max_charge_mw: 1.0,
            max_discharge_mw: 1.0,
            min_soc_pct: 20.0,
            max_soc_pct: 95.0,
            allow_export: false,
        }
    }
}

/// Hourly weather, one entry per hour.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeatherConfig {
    /// Ambient temperature (°C).
    pub temp_c: Vec<f64>,
    /// Relative humidity (%).
    pub humidity_pct: Vec<f64>,
    /// Cloud cover (%).
    pub cloud_pct: Vec<f64>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            temp_c: diurnal_curve(28.0, 42.0, 14, CurveShape::Bell),
            humidity_pct: diurnal_curve(30.0, 70.0, 4, CurveShape::Inverse),
            cloud_pct: vec![5.0; HOURS],
        }
    }
}

impl WeatherConfig {
    /// Brings every array to exactly 24 entries.
    ///
    /// See [`normalize_hourly`]; empty arrays become the model fallbacks.
    pub fn normalize(&mut self) {
        self.temp_c = normalize_hourly(&self.temp_c, FALLBACK_TEMP_C);
        self.humidity_pct = normalize_hourly(&self.humidity_pct, FALLBACK_HUMIDITY_PCT);
        self.cloud_pct = normalize_hourly(&self.cloud_pct, FALLBACK_CLOUD_PCT);
    }

    /// Mean cloud cover over the day (%), 0 for no data.
    pub fn mean_cloud_pct(&self) -> f64 {
        mean(&self.cloud_pct)
    }

    /// Mean temperature over the day (°C), 0 for no data.
    pub fn mean_temp_c(&self) -> f64 {
        mean(&self.temp_c)
    }
}

/// Grid connection parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// `"normal"` or `"islanded"`.
    pub scenario: Scenario,
    /// Import cap (MW).
    pub max_import_mw: f64,
    /// Price paid for exported energy (per kWh).
    pub feed_in_tariff: f64,
    /// Windows without grid import.
    pub import_outages: Vec<OutageInterval>,
    /// Windows without grid export.
    pub export_outages: Vec<OutageInterval>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::Normal,
            max_import_mw: 2.0,
            feed_in_tariff: 4.8,
            import_outages: Vec::new(),
            export_outages: Vec::new(),
        }
    }
}

/// Backup generator parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DieselConfig {
    /// Rated output (MW).
    pub capacity_mw: f64,
    /// Fuel cost per kWh generated.
    pub fuel_cost: f64,
}

impl Default for DieselConfig {
    fn default() -> Self {
        Self {
            capacity_mw: 0.5,
            fuel_cost: 95.0,
        }
    }
}

/// Base-load curve.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    /// Load per hour (MW).
    pub curve_mw: Vec<f64>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            curve_mw: DEFAULT_LOAD_CURVE_MW.to_vec(),
        }
    }
}

/// Manual per-hour overrides, written as `[[overrides.load]]` tables.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverridesConfig {
    /// Load override (MW).
    pub load: HourOverrides,
    /// Tariff override (per kWh).
    pub tariff: HourOverrides,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::agra_summer()
    }
}

impl SimulationConfig {
    /// Summer day in Agra on a dynamic market tariff, arbitrage strategy.
    pub fn agra_summer() -> Self {
        Self {
            dispatch: DispatchConfig::default(),
            solar: SolarConfig::default(),
            battery: BatteryConfig::default(),
            weather: WeatherConfig::default(),
            grid: GridConfig::default(),
            diesel: DieselConfig::default(),
            tariff: TariffTables::default(),
            load: LoadConfig::default(),
            overrides: OverridesConfig::default(),
        }
    }

    /// Same site on the fixed three-tier tariff, load-following strategy.
    pub fn time_of_day() -> Self {
        Self {
            dispatch: DispatchConfig {
                strategy: Strategy::Standard,
            },
            tariff: TariffTables {
                dynamic: false,
                ..TariffTables::default()
            },
            ..Self::agra_summer()
        }
    }

    /// No grid connection all day: battery and diesel carry the night.
    pub fn islanded() -> Self {
        Self {
            grid: GridConfig {
                scenario: Scenario::Islanded,
                ..GridConfig::default()
            },
            diesel: DieselConfig {
                capacity_mw: 0.3,
                ..DieselConfig::default()
            },
            ..Self::agra_summer()
        }
    }

    /// Hot, dry day: afternoon temperatures throttle charging hard.
    pub fn heatwave() -> Self {
        Self {
            weather: WeatherConfig {
                temp_c: diurnal_curve(33.0, 47.0, 15, CurveShape::Bell),
                humidity_pct: diurnal_curve(15.0, 40.0, 5, CurveShape::Inverse),
                cloud_pct: vec![0.0; HOURS],
            },
            ..Self::agra_summer()
        }
    }

    /// Import outage from 22:00 to 02:00 with battery market export enabled.
    pub fn evening_outage() -> Self {
        Self {
            battery: BatteryConfig {
                allow_export: true,
                ..BatteryConfig::default()
            },
            grid: GridConfig {
                import_outages: vec![OutageInterval::new(22, 2)],
                ..GridConfig::default()
            },
            ..Self::agra_summer()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &[
        "agra_summer",
        "time_of_day",
        "islanded",
        "heatwave",
        "evening_outage",
    ];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self> {
        match name {
            "agra_summer" => Ok(Self::agra_summer()),
            "time_of_day" => Ok(Self::time_of_day()),
            "islanded" => Ok(Self::islanded()),
            "heatwave" => Ok(Self::heatwave()),
            "evening_outage" => Ok(Self::evening_outage()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )
            .into()),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the file cannot be read, or [`crate::Error::Toml`]
    /// if the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string and normalises the weather
    /// arrays to 24 entries.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Toml`] if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(s)?;
        config.weather.normalize();
        Ok(config)
    }

    /// Returns a copy with `strategy` as the requested strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.dispatch.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.dispatch.strategy
    }

    pub fn solar_array(&self) -> SolarArray {
        SolarArray::new(
            self.solar.capacity_mw,
            self.solar.sunrise_hour,
            self.solar.sunset_hour,
        )
    }

    pub fn base_load(&self) -> BaseLoad {
        BaseLoad::new(self.load.curve_mw.clone())
    }

    pub fn battery(&self) -> Battery {
        let b = &self.battery;
        Battery::new(
            b.capacity_mwh,
            b.max_charge_mw,
            b.max_discharge_mw,
            b.min_soc_pct,
            b.max_soc_pct,
        )
    }

    pub fn grid_connection(&self) -> GridConnection {
        GridConnection::new(
            self.grid.scenario,
            self.grid.max_import_mw,
            self.grid.import_outages.clone(),
            self.grid.export_outages.clone(),
        )
    }

    pub fn diesel_generator(&self) -> DieselGenerator {
        DieselGenerator::new(self.diesel.capacity_mw)
    }

    pub fn cost_rates(&self) -> CostRates {
        CostRates {
            feed_in_tariff: self.grid.feed_in_tariff,
            diesel_fuel_cost: self.diesel.fuel_cost,
        }
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is physically consistent.
    /// The engine runs either way; this is a pre-flight check for callers.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let sol = &self.solar;
        if sol.capacity_mw < 0.0 {
            errors.push(ConfigError::new("solar.capacity_mw", "must be >= 0"));
        }
        // Equal times are a valid "no sun" day; only an inverted window is rejected.
        if sol.sunrise_hour > sol.sunset_hour {
            errors.push(ConfigError::new(
                "solar.sunrise_hour",
                "must be <= solar.sunset_hour",
            ));
        }
        if sol.sunrise_hour < 0.0 || sol.sunset_hour > HOURS as f64 {
            errors.push(ConfigError::new(
                "solar.sunset_hour",
                "sunrise and sunset must lie within [0, 24]",
            ));
        }

        let bat = &self.battery;
        if bat.capacity_mwh <= 0.0 {
            errors.push(ConfigError::new("battery.capacity_mwh", "must be > 0"));
        }
        if bat.max_charge_mw < 0.0 {
            errors.push(ConfigError::new("battery.max_charge_mw", "must be >= 0"));
        }
        if bat.max_discharge_mw < 0.0 {
            errors.push(ConfigError::new("battery.max_discharge_mw", "must be >= 0"));
        }
        if !(0.0..=100.0).contains(&bat.min_soc_pct) || !(0.0..=100.0).contains(&bat.max_soc_pct) {
            errors.push(ConfigError::new(
                "battery.min_soc_pct",
                "SoC bounds must lie within [0, 100]",
            ));
        }
        if bat.min_soc_pct > bat.max_soc_pct {
            errors.push(ConfigError::new(
                "battery.min_soc_pct",
                "must be <= battery.max_soc_pct",
            ));
        }

        let grid = &self.grid;
        if grid.max_import_mw < 0.0 {
            errors.push(ConfigError::new("grid.max_import_mw", "must be >= 0"));
        }
        if grid.feed_in_tariff < 0.0 {
            errors.push(ConfigError::new("grid.feed_in_tariff", "must be >= 0"));
        }
        check_outages("grid.import_outages", &grid.import_outages, &mut errors);
        check_outages("grid.export_outages", &grid.export_outages, &mut errors);

        if self.diesel.capacity_mw < 0.0 {
            errors.push(ConfigError::new("diesel.capacity_mw", "must be >= 0"));
        }
        if self.diesel.fuel_cost < 0.0 {
            errors.push(ConfigError::new("diesel.fuel_cost", "must be >= 0"));
        }

        if self.tariff.dynamic && self.tariff.market_curve.len() != HOURS {
            errors.push(ConfigError::new(
                "tariff.market_curve",
                format!("must have {HOURS} entries, got {}", self.tariff.market_curve.len()),
            ));
        }
        if self.load.curve_mw.len() != HOURS {
            errors.push(ConfigError::new(
                "load.curve_mw",
                format!("must have {HOURS} entries, got {}", self.load.curve_mw.len()),
            ));
        }

        for (field, overrides) in [
            ("overrides.load", &self.overrides.load),
            ("overrides.tariff", &self.overrides.tariff),
        ] {
            if overrides.iter().any(|(hour, _)| hour >= HOURS) {
                errors.push(ConfigError::new(field, "hours must be < 24"));
            }
        }

        errors
    }
}

fn check_outages(field: &str, outages: &[OutageInterval], errors: &mut Vec<ConfigError>) {
    for (i, o) in outages.iter().enumerate() {
        if o.start >= HOURS || o.end > HOURS {
            errors.push(ConfigError::new(
                format!("{field}[{i}]"),
                format!("hours out of range: start {} end {}", o.start, o.end),
            ));
        }
    }
}

/// Pads or truncates per-hour weather values to exactly 24 entries.
///
/// Short arrays repeat their last value; an empty array becomes 24 copies
/// of `fallback`; extra entries are dropped.
pub fn normalize_hourly(values: &[f64], fallback: f64) -> Vec<f64> {
    let pad = values.last().copied().unwrap_or(fallback);
    values
        .iter()
        .copied()
        .chain(std::iter::repeat(pad))
        .take(HOURS)
        .collect()
}

/// Shape of a synthetic diurnal curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveShape {
    /// Rises from `base` to `peak` at the peak hour.
    Bell,
    /// Falls from `peak` to `base` at the peak hour.
    Inverse,
}

/// Builds a smooth 24-hour curve that reaches its extreme at `peak_hour`
/// and flattens out 12 hours away from it.
pub fn diurnal_curve(base: f64, peak: f64, peak_hour: usize, shape: CurveShape) -> Vec<f64> {
    (0..HOURS)
        .map(|h| {
            let dist = h.abs_diff(peak_hour) as f64;
            let factor = (1.0 - dist / 12.0).max(0.0);
            let swing = (peak - base) * (factor * PI / 2.0).sin();
            match shape {
                CurveShape::Bell => base + swing,
                CurveShape::Inverse => peak - swing,
            }
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn default_preset_valid() {
        let cfg = SimulationConfig::default();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "default should be valid: {errors:?}");
        assert_eq!(cfg.strategy(), Strategy::Arbitrage);
        assert!(cfg.tariff.dynamic);
    }

    #[test]
    fn all_presets_are_valid() {
        for name in SimulationConfig::PRESETS {
            let cfg = SimulationConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn from_preset_unknown() {
        let err = SimulationConfig::from_preset("nonexistent");
        assert!(matches!(err, Err(Error::Config(ref e)) if e.message.contains("unknown preset")));
    }

    #[test]
    fn heatwave_runs_hotter() {
        let base = SimulationConfig::agra_summer();
        let hot = SimulationConfig::heatwave();
        assert!(hot.weather.mean_temp_c() > base.weather.mean_temp_c());
        assert!(hot.weather.temp_c.iter().any(|&t| t > 45.0));
    }

    #[test]
    fn evening_outage_wraps_midnight() {
        let cfg = SimulationConfig::evening_outage();
        let grid = cfg.grid_connection();
        assert!(grid.access(23).import_blocked);
        assert!(grid.access(1).import_blocked);
        assert!(!grid.access(2).import_blocked);
        assert!(cfg.battery.allow_export);
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[dispatch]
strategy = "self_consumption"

[solar]
capacity_mw = 2.0
sunrise_hour = 5.5
sunset_hour = 19.0

[battery]
capacity_mwh = 4.0
max_charge_mw = 1.5
max_discharge_mw = 1.5
min_soc_pct = 10.0
max_soc_pct = 90.0
allow_export = true

[weather]
temp_c = [30.0, 31.0]
cloud_pct = []

[grid]
scenario = "normal"
max_import_mw = 1.5
import_outages = [{ start = 18, end = 20 }]

[tariff]
dynamic = false

[tariff.time_of_day]
peak = 10.0

[[overrides.load]]
hour = 18
value = 0.6

[[overrides.tariff]]
hour = 3
value = 2.0
"#;
        let cfg = SimulationConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let Ok(cfg) = cfg else { return };
        assert_eq!(cfg.strategy(), Strategy::SelfConsumption);
        assert_eq!(cfg.solar.sunrise_hour, 5.5);
        assert_eq!(cfg.battery.capacity_mwh, 4.0);
        assert_eq!(cfg.weather.temp_c.len(), HOURS);
        assert_eq!(cfg.weather.temp_c[23], 31.0);
        assert_eq!(cfg.weather.cloud_pct, vec![0.0; HOURS]);
        assert_eq!(cfg.grid.import_outages, vec![OutageInterval::new(18, 20)]);
        assert_eq!(cfg.tariff.price_at(18), 10.0);
        assert_eq!(cfg.tariff.time_of_day.normal, 7.5);
        assert_eq!(cfg.overrides.load.get(18), Some(0.6));
        assert_eq!(cfg.overrides.tariff.get(3), Some(2.0));
        // untouched sections keep defaults
        assert_eq!(cfg.diesel, DieselConfig::default());
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[battery]
capacity_mwh = 2.0
bogus_field = true
"#;
        let result = SimulationConfig::from_toml_str(toml);
        assert!(matches!(result, Err(Error::Toml(_))));
    }

    #[test]
    fn validation_catches_inverted_soc() {
        let mut cfg = SimulationConfig::default();
        cfg.battery.min_soc_pct = 90.0;
        cfg.battery.max_soc_pct = 20.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "battery.min_soc_pct"));
    }

    #[test]
    fn validation_catches_zero_capacity_and_negative_rates() {
        let mut cfg = SimulationConfig::default();
        cfg.battery.capacity_mwh = 0.0;
        cfg.battery.max_discharge_mw = -1.0;
        cfg.diesel.capacity_mw = -0.5;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "battery.capacity_mwh"));
        assert!(errors.iter().any(|e| e.field == "battery.max_discharge_mw"));
        assert!(errors.iter().any(|e| e.field == "diesel.capacity_mw"));
    }

    #[test]
    fn validation_catches_bad_outage_and_sun_times() {
        let mut cfg = SimulationConfig::default();
        cfg.grid.export_outages.push(OutageInterval::new(25, 3));
        cfg.solar.sunrise_hour = 19.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "grid.export_outages[0]"));
        assert!(errors.iter().any(|e| e.field == "solar.sunrise_hour"));
    }

    #[test]
    fn diesel_price_flows_into_cost_rates() {
        let mut cfg = SimulationConfig::islanded();
        cfg.diesel.fuel_cost = 120.0;
        cfg.grid.feed_in_tariff = 3.0;
        let rates = cfg.cost_rates();
        assert_eq!(rates.diesel_fuel_cost, 120.0);
        assert_eq!(rates.feed_in_tariff, 3.0);
        assert_eq!(cfg.diesel_generator().capacity_mw, 0.3);
    }

    #[test]
    fn zero_length_sun_window_is_valid() {
        let mut cfg = SimulationConfig::default();
        cfg.solar.sunrise_hour = 0.0;
        cfg.solar.sunset_hour = 0.0;
        let errors = cfg.validate();
        assert!(errors.is_empty(), "sunrise == sunset should be valid: {errors:?}");
    }

    #[test]
    fn normalize_pads_and_truncates() {
        assert_eq!(normalize_hourly(&[], 25.0), vec![25.0; HOURS]);
        let short = normalize_hourly(&[1.0, 2.0], 0.0);
        assert_eq!(short.len(), HOURS);
        assert_eq!(short[0], 1.0);
        assert_eq!(short[23], 2.0);
        let long: Vec<f64> = (0..30).map(f64::from).collect();
        assert_eq!(normalize_hourly(&long, 0.0), long[..HOURS].to_vec());
    }

    #[test]
    fn diurnal_curve_hits_extremes() {
        let temp = diurnal_curve(28.0, 42.0, 14, CurveShape::Bell);
        assert!((temp[14] - 42.0).abs() < 1e-9);
        assert!((temp[2] - 28.0).abs() < 1e-9);
        let humidity = diurnal_curve(30.0, 70.0, 4, CurveShape::Inverse);
        assert!((humidity[4] - 30.0).abs() < 1e-9);
        assert!((humidity[16] - 70.0).abs() < 1e-9);
    }

    #[test]
    fn builders_reflect_sections() {
        let cfg = SimulationConfig::islanded();
        assert!(cfg.grid_connection().access(12).import_blocked);
        assert_eq!(cfg.battery().capacity_mwh, 2.5);
        assert_eq!(cfg.diesel_generator().capacity_mw, 0.3);
        assert_eq!(cfg.cost_rates().feed_in_tariff, 4.8);
        let cfg = cfg.with_strategy(Strategy::Standard);
        assert_eq!(cfg.strategy(), Strategy::Standard);
    }
}
