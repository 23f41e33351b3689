//! Shared test fixtures for integration tests.

use microgrid_dispatch::sim::profile::HourOverrides;
use microgrid_dispatch::sim::types::{HOURS, Strategy};
use microgrid_dispatch::{SimulationConfig, SimulationResult, run_simulation};

/// Tolerance for per-hour energy balance checks (MW).
pub const BALANCE_TOLERANCE: f64 = 1e-6;

/// Runs `config` with the overrides stored in the config itself.
pub fn run(config: &SimulationConfig) -> SimulationResult {
    run_simulation(config, &config.overrides.load, &config.overrides.tariff)
}

/// The same value for every hour of the day.
pub fn flat_overrides(value: f64) -> HourOverrides {
    (0..HOURS).map(|h| (h, value)).collect()
}

/// Dark site: no solar, a 1 MWh battery limited to 0.5 MW, constant 1 MW
/// load on a flat 7.5 tariff, load-following strategy.
pub fn dark_site() -> SimulationConfig {
    let mut config = SimulationConfig::default().with_strategy(Strategy::Standard);
    config.solar.capacity_mw = 0.0;
    config.battery.capacity_mwh = 1.0;
    config.battery.max_charge_mw = 0.5;
    config.battery.max_discharge_mw = 0.5;
    config.overrides.load = flat_overrides(1.0);
    config.overrides.tariff = flat_overrides(7.5);
    config
}

/// Every built-in preset, loaded by name.
pub fn all_presets() -> Vec<(&'static str, SimulationConfig)> {
    SimulationConfig::PRESETS
        .iter()
        .map(|&name| {
            let config = SimulationConfig::from_preset(name).expect("built-in preset should load");
            (name, config)
        })
        .collect()
}
