//! Per-hour financials and the daily audit, computed post-hoc from records.

use std::fmt;

use serde::Serialize;

use super::types::DispatchRecord;

/// Records carry power in MW over one hour; prices are per kWh.
pub const KWH_PER_MWH: f64 = 1000.0;

/// Prices that do not come from the hourly tariff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostRates {
    /// Price paid for exported energy (per kWh).
    pub feed_in_tariff: f64,
    /// Diesel fuel cost (per kWh generated).
    pub diesel_fuel_cost: f64,
}

/// Money flows for one hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyCosts {
    pub cost_grid_only: f64,
    pub cost_microgrid: f64,
    pub revenue_export: f64,
    pub cost_diesel: f64,
    pub net_savings: f64,
}

impl CostRates {
    /// Prices one hour of dispatch.
    ///
    /// The grid-only reference cost is zero while import is blocked, since
    /// the load could not have been bought from the grid at all.
    pub fn hourly(
        &self,
        load_mw: f64,
        import_mw: f64,
        export_mw: f64,
        diesel_mw: f64,
        tariff: f64,
        import_blocked: bool,
    ) -> HourlyCosts {
        let cost_grid_only = if import_blocked {
            0.0
        } else {
            load_mw * KWH_PER_MWH * tariff
        };
        let cost_microgrid = import_mw * KWH_PER_MWH * tariff;
        let revenue_export = export_mw * KWH_PER_MWH * self.feed_in_tariff;
        let cost_diesel = diesel_mw * KWH_PER_MWH * self.diesel_fuel_cost;
        HourlyCosts {
            cost_grid_only,
            cost_microgrid,
            revenue_export,
            cost_diesel,
            net_savings: cost_grid_only - (cost_microgrid + cost_diesel - revenue_export),
        }
    }
}

/// Daily energy and money totals.
///
/// The `baseline_*`, `actual_*` and `arbitrage_*` fields compare the
/// requested strategy against a load-following replay of the same day and are
/// only filled by [`crate::runner::run_simulation`]; a single pass leaves
/// them at zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FinancialAudit {
    pub total_load_mwh: f64,
    pub total_solar_mwh: f64,
    pub total_grid_import_mwh: f64,
    pub total_grid_export_mwh: f64,
    pub total_diesel_mwh: f64,
    /// Sum of positive battery flow (MWh).
    pub total_battery_discharge_mwh: f64,
    /// What the day's load would cost bought entirely from the grid.
    pub total_bill_grid_only: f64,
    pub total_bill_microgrid: f64,
    pub total_revenue_export: f64,
    pub total_diesel_cost: f64,
    /// `grid_only - (microgrid + diesel - revenue)`.
    pub net_savings: f64,
    /// `100 × net_savings / grid_only`, 0 when the reference bill is 0.
    pub savings_pct: f64,

    /// Baseline bill plus diesel cost (export revenue not subtracted).
    pub baseline_net_cost: f64,
    /// Actual bill plus diesel cost (export revenue not subtracted).
    pub actual_net_cost: f64,
    /// `baseline_net_cost - actual_net_cost`.
    pub arbitrage_savings: f64,
    /// `100 × arbitrage_savings / |baseline_net_cost|`, 0 when the baseline cost is 0.
    pub arbitrage_savings_pct: f64,
    pub baseline_bill_microgrid: f64,
    pub baseline_revenue_export: f64,
    pub baseline_diesel_cost: f64,
    pub baseline_peak_grid_mw: f64,
    pub actual_peak_grid_mw: f64,
    pub baseline_grid_import_mwh: f64,
    pub baseline_diesel_mwh: f64,
    /// Baseline discharge energy over battery capacity.
    pub baseline_battery_cycles: f64,
    /// Actual discharge energy over battery capacity.
    pub actual_battery_cycles: f64,
}

impl FinancialAudit {
    /// Aggregates one pass of dispatch records.
    pub fn from_records(records: &[DispatchRecord]) -> Self {
        let mut audit = Self::default();
        for r in records {
            audit.total_load_mwh += r.adjusted_load_mw;
            audit.total_solar_mwh += r.solar_mw;
            audit.total_grid_import_mwh += r.grid_import_mw;
            audit.total_grid_export_mwh += r.grid_export_mw;
            audit.total_diesel_mwh += r.diesel_mw;
            audit.total_battery_discharge_mwh += r.battery_discharge_mw();
            audit.total_bill_grid_only += r.cost_grid_only;
            audit.total_bill_microgrid += r.cost_microgrid;
            audit.total_revenue_export += r.revenue_export;
            audit.total_diesel_cost += r.cost_diesel;
        }
        audit.net_savings = audit.total_bill_grid_only
            - (audit.total_bill_microgrid + audit.total_diesel_cost - audit.total_revenue_export);
        audit.savings_pct = if audit.total_bill_grid_only > 0.0 {
            100.0 * audit.net_savings / audit.total_bill_grid_only
        } else {
            0.0
        };
        audit
    }

    /// Grid bill plus diesel cost. Export revenue is not netted out.
    pub fn total_cost(&self) -> f64 {
        self.total_bill_microgrid + self.total_diesel_cost
    }
}

/// Highest hourly grid import (MW).
pub fn peak_grid_import_mw(records: &[DispatchRecord]) -> f64 {
    records
        .iter()
        .map(|r| r.grid_import_mw)
        .fold(0.0, f64::max)
}

/// Equivalent full cycles: discharge energy over capacity, 0 for no capacity.
pub fn battery_cycles(discharge_mwh: f64, capacity_mwh: f64) -> f64 {
    if capacity_mwh > 0.0 {
        discharge_mwh / capacity_mwh
    } else {
        0.0
    }
}

impl fmt::Display for FinancialAudit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Financial Audit ---")?;
        writeln!(
            f,
            "Energy:       load={:.3} solar={:.3} import={:.3} export={:.3} diesel={:.3} MWh",
            self.total_load_mwh,
            self.total_solar_mwh,
            self.total_grid_import_mwh,
            self.total_grid_export_mwh,
            self.total_diesel_mwh
        )?;
        writeln!(
            f,
            "Battery:      {:.3} MWh discharged ({:.2} cycles, baseline {:.2})",
            self.total_battery_discharge_mwh, self.actual_battery_cycles, self.baseline_battery_cycles
        )?;
        writeln!(f, "Grid-only bill:        {:.0}", self.total_bill_grid_only)?;
        writeln!(f, "Microgrid bill:        {:.0}", self.total_bill_microgrid)?;
        writeln!(f, "Export revenue:        {:.0}", self.total_revenue_export)?;
        writeln!(f, "Diesel cost:           {:.0}", self.total_diesel_cost)?;
        writeln!(
            f,
            "Net savings:           {:.0} ({:.1}%)",
            self.net_savings, self.savings_pct
        )?;
        writeln!(
            f,
            "Peak grid draw:        {:.3} MW (baseline {:.3} MW)",
            self.actual_peak_grid_mw, self.baseline_peak_grid_mw
        )?;
        write!(
            f,
            "Strategy vs baseline:  {:.0} vs {:.0} -> {:.0} saved ({:.1}%)",
            self.actual_net_cost,
            self.baseline_net_cost,
            self.arbitrage_savings,
            self.arbitrage_savings_pct
        )
    }
}
