//! Comparative runner: dispatches the day under the requested strategy and
//! again under load-following, then folds the baseline into the audit.

use serde::Serialize;
use tracing::info;

use crate::config::SimulationConfig;
use crate::sim::audit::{FinancialAudit, battery_cycles, peak_grid_import_mw};
use crate::sim::controller::{ArbitrageController, Controller, LoadFollowingController};
use crate::sim::engine::Engine;
use crate::sim::profile::{HourOverrides, HourlyVector, ProfileBuilder};
use crate::sim::types::{DispatchRecord, Strategy};

/// Output of [`run_simulation`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    /// Hourly records of the requested strategy's pass.
    pub records: Vec<DispatchRecord>,
    /// Audit of the requested pass with baseline comparison filled in.
    pub audit: FinancialAudit,
}

/// Runs one full-day pass under `strategy`.
///
/// Each call builds its own profile and starts from a fresh battery, so
/// passes never observe each other.
pub fn run_pass(
    config: &SimulationConfig,
    strategy: Strategy,
    load_overrides: &HourOverrides,
    tariff_overrides: &HourOverrides,
) -> Vec<DispatchRecord> {
    let day = ProfileBuilder::new(config).build(load_overrides, tariff_overrides);
    match strategy {
        Strategy::Arbitrage => dispatch(
            config,
            ArbitrageController::new(config.battery.allow_export),
            &day,
        ),
        // Self-consumption has no rules of its own and follows the load.
        Strategy::Standard | Strategy::SelfConsumption => {
            dispatch(config, LoadFollowingController, &day)
        }
    }
}

fn dispatch<C: Controller>(
    config: &SimulationConfig,
    controller: C,
    day: &[HourlyVector],
) -> Vec<DispatchRecord> {
    Engine::new(
        config.battery(),
        config.grid_connection(),
        config.diesel_generator(),
        config.cost_rates(),
        controller,
    )
    .run(day)
}

/// Dispatches the day under the configured strategy and under `Standard`,
/// and returns the requested pass with a comparative audit.
///
/// The requested strategy is `config.dispatch.strategy`. The function is
/// pure: identical inputs give identical results.
pub fn run_simulation(
    config: &SimulationConfig,
    load_overrides: &HourOverrides,
    tariff_overrides: &HourOverrides,
) -> SimulationResult {
    let strategy = config.strategy();
    let actual = run_pass(config, strategy, load_overrides, tariff_overrides);
    let baseline = run_pass(config, Strategy::Standard, load_overrides, tariff_overrides);

    let audit = compare(
        FinancialAudit::from_records(&actual),
        &actual,
        &baseline,
        config.battery.capacity_mwh,
    );

    info!(
        %strategy,
        actual_cost = audit.actual_net_cost,
        baseline_cost = audit.baseline_net_cost,
        savings = audit.arbitrage_savings,
        "comparative run complete"
    );

    SimulationResult {
        records: actual,
        audit,
    }
}

/// Fills the cross-pass fields of `audit` from the two passes.
fn compare(
    mut audit: FinancialAudit,
    actual: &[DispatchRecord],
    baseline: &[DispatchRecord],
    capacity_mwh: f64,
) -> FinancialAudit {
    let base = FinancialAudit::from_records(baseline);
    let baseline_cost = base.total_cost();
    let actual_cost = audit.total_cost();
    let savings = baseline_cost - actual_cost;

    audit.baseline_net_cost = baseline_cost;
    audit.actual_net_cost = actual_cost;
    audit.arbitrage_savings = savings;
    audit.arbitrage_savings_pct = if baseline_cost.abs() > 0.0 {
        100.0 * savings / baseline_cost.abs()
    } else {
        0.0
    };

    audit.baseline_grid_import_mwh = base.total_grid_import_mwh;
    audit.baseline_diesel_mwh = base.total_diesel_mwh;
    audit.baseline_peak_grid_mw = peak_grid_import_mw(baseline);
    audit.baseline_battery_cycles = battery_cycles(base.total_battery_discharge_mwh, capacity_mwh);
    audit.baseline_bill_microgrid = base.total_bill_microgrid;
    audit.baseline_revenue_export = base.total_revenue_export;
    audit.baseline_diesel_cost = base.total_diesel_cost;

    audit.actual_peak_grid_mw = peak_grid_import_mw(actual);
    audit.actual_battery_cycles = battery_cycles(audit.total_battery_discharge_mwh, capacity_mwh);
    audit
}
