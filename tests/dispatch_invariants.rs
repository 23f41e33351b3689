//! Physical invariants that must hold for every preset and strategy.

mod common;

use microgrid_dispatch::sim::types::{HOURS, Rationale, Strategy};

const STRATEGIES: [Strategy; 3] = [
    Strategy::Standard,
    Strategy::Arbitrage,
    Strategy::SelfConsumption,
];

#[test]
fn every_run_covers_the_day() {
    for (name, config) in common::all_presets() {
        let result = common::run(&config);
        assert_eq!(result.records.len(), HOURS, "{name}");
        for (h, r) in result.records.iter().enumerate() {
            assert_eq!(r.hour, h, "{name}");
        }
    }
}

#[test]
fn served_hours_balance() {
    for (name, preset) in common::all_presets() {
        for strategy in STRATEGIES {
            let config = preset.clone().with_strategy(strategy);
            for r in common::run(&config).records {
                if matches!(r.rationale, Rationale::Curtailed | Rationale::CriticalDeficit) {
                    continue;
                }
                assert!(
                    r.balance_residual_mw().abs() < common::BALANCE_TOLERANCE,
                    "{name}/{strategy} hour {} residual {}",
                    r.hour,
                    r.balance_residual_mw()
                );
            }
        }
    }
}

#[test]
fn soc_stays_in_window() {
    for (name, preset) in common::all_presets() {
        for strategy in STRATEGIES {
            let config = preset.clone().with_strategy(strategy);
            let (lo, hi) = (config.battery.min_soc_pct, config.battery.max_soc_pct);
            for r in common::run(&config).records {
                assert!(
                    r.soc_pct >= lo - 1e-9 && r.soc_pct <= hi + 1e-9,
                    "{name}/{strategy} hour {} soc {}",
                    r.hour,
                    r.soc_pct
                );
            }
        }
    }
}

#[test]
fn flows_are_non_negative_and_capped() {
    for (name, preset) in common::all_presets() {
        for strategy in STRATEGIES {
            let config = preset.clone().with_strategy(strategy);
            for r in common::run(&config).records {
                assert!(r.grid_import_mw >= 0.0, "{name}/{strategy}");
                assert!(r.grid_export_mw >= 0.0, "{name}/{strategy}");
                assert!(r.diesel_mw >= 0.0, "{name}/{strategy}");
                assert!(
                    r.grid_import_mw <= config.grid.max_import_mw + 1e-9,
                    "{name}/{strategy} hour {} imports {}",
                    r.hour,
                    r.grid_import_mw
                );
                assert!(r.diesel_mw <= config.diesel.capacity_mw + 1e-9);
                assert!(r.battery_discharge_mw() <= config.battery.max_discharge_mw + 1e-9);
                assert!(r.battery_charge_mw() <= config.battery.max_charge_mw + 1e-9);
            }
        }
    }
}

#[test]
fn islanded_never_touches_the_grid() {
    for strategy in STRATEGIES {
        let config = microgrid_dispatch::SimulationConfig::islanded().with_strategy(strategy);
        for r in common::run(&config).records {
            assert_eq!(r.grid_import_mw, 0.0, "{strategy} hour {}", r.hour);
            assert_eq!(r.grid_export_mw, 0.0, "{strategy} hour {}", r.hour);
            assert_eq!(r.cost_microgrid, 0.0);
            assert_eq!(r.revenue_export, 0.0);
        }
    }
}

#[test]
fn import_outage_blocks_wrapped_hours() {
    let config = microgrid_dispatch::SimulationConfig::evening_outage();
    let records = common::run(&config).records;
    for h in [22, 23, 0, 1] {
        assert_eq!(records[h].grid_import_mw, 0.0, "hour {h}");
    }
}

#[test]
fn baseline_does_not_depend_on_requested_strategy() {
    for (name, preset) in common::all_presets() {
        let audits: Vec<_> = STRATEGIES
            .iter()
            .map(|&s| common::run(&preset.clone().with_strategy(s)).audit)
            .collect();
        for audit in &audits[1..] {
            let first = &audits[0];
            assert_eq!(audit.baseline_net_cost, first.baseline_net_cost, "{name}");
            assert_eq!(audit.baseline_grid_import_mwh, first.baseline_grid_import_mwh);
            assert_eq!(audit.baseline_diesel_mwh, first.baseline_diesel_mwh);
            assert_eq!(audit.baseline_peak_grid_mw, first.baseline_peak_grid_mw);
            assert_eq!(audit.baseline_battery_cycles, first.baseline_battery_cycles);
        }
    }
}

#[test]
fn repeated_runs_are_identical() {
    for (name, config) in common::all_presets() {
        assert_eq!(common::run(&config), common::run(&config), "{name}");
    }
}
