//! Single-pass dispatch engine: folds the 24-hour profile into dispatch records.

use tracing::{debug, info};

use crate::devices::battery::ROUND_TRIP_EFFICIENCY;
use crate::devices::{Battery, BatteryState, DieselGenerator};

use super::audit::CostRates;
use super::controller::{Controller, HourView, MARKET_EXPORT_MIN_SOC};
use super::grid::{GridAccess, GridConnection};
use super::pricing::PriceBands;
use super::profile::HourlyVector;
use super::types::{DispatchRecord, Rationale};

/// Residual flows at or below this are treated as zero (MW).
const FLOW_EPSILON: f64 = 1e-9;

/// Rounds flows too small to matter down to zero, so a battery resting on
/// its SoC bound reports no flow.
fn committed(power_mw: f64) -> f64 {
    if power_mw > FLOW_EPSILON { power_mw } else { 0.0 }
}

/// Physical flows decided for one hour.
#[derive(Debug, Clone, Copy)]
struct HourFlows {
    battery_flow_mw: f64,
    grid_import_mw: f64,
    grid_export_mw: f64,
    diesel_mw: f64,
    rationale: Rationale,
}

impl HourFlows {
    fn idle(access: GridAccess) -> Self {
        Self {
            battery_flow_mw: 0.0,
            grid_import_mw: 0.0,
            grid_export_mw: 0.0,
            diesel_mw: 0.0,
            rationale: if access.import_blocked {
                Rationale::GridIsolated
            } else {
                Rationale::Standby
            },
        }
    }
}

/// Dispatch engine for one pass over the day.
///
/// Generic over `C: Controller` for static dispatch. The engine owns the
/// static site description; the battery's energy content is threaded through
/// [`Engine::run`] as an explicit value, so two engines never share state.
pub struct Engine<C: Controller> {
    battery: Battery,
    grid: GridConnection,
    diesel: DieselGenerator,
    rates: CostRates,
    controller: C,
}

impl<C: Controller> Engine<C> {
    /// Creates a new engine.
    ///
    /// # Arguments
    ///
    /// * `battery` - Battery parameters; each run starts from its initial state
    /// * `grid` - Grid connection with import cap and outage schedule
    /// * `diesel` - Backup generator
    /// * `rates` - Feed-in and fuel prices for the per-hour financials
    /// * `controller` - Deficit-hour policy
    pub fn new(
        battery: Battery,
        grid: GridConnection,
        diesel: DieselGenerator,
        rates: CostRates,
        controller: C,
    ) -> Self {
        Self {
            battery,
            grid,
            diesel,
            rates,
            controller,
        }
    }

    /// Dispatches every hour of `day` in order, starting from a fresh battery.
    ///
    /// # Returns
    ///
    /// One `DispatchRecord` per entry of `day`.
    pub fn run(&self, day: &[HourlyVector]) -> Vec<DispatchRecord> {
        let bands = PriceBands::classify(day);
        let (records, end_state) = day.iter().fold(
            (Vec::with_capacity(day.len()), self.battery.initial_state()),
            |(mut records, state), vector| {
                let (record, next) = self.step(day, &bands, vector, state);
                records.push(record);
                (records, next)
            },
        );
        info!(
            hours = records.len(),
            low = bands.low,
            high = bands.high,
            end_soc_pct = self.soc_pct(&end_state),
            "dispatch pass complete"
        );
        records
    }

    /// Dispatches a single hour and returns its record with the next battery state.
    pub fn step(
        &self,
        day: &[HourlyVector],
        bands: &PriceBands,
        vector: &HourlyVector,
        state: BatteryState,
    ) -> (DispatchRecord, BatteryState) {
        let access = self.grid.access(vector.hour);
        let view = HourView {
            day,
            bands,
            battery: &self.battery,
            state,
            vector,
            access,
        };
        let net_power_mw = vector.solar_mw - vector.load_mw;

        let (mut flows, mut next) = if net_power_mw > 0.0 {
            self.dispatch_surplus(vector, access, state)
        } else {
            self.dispatch_deficit(&view)
        };

        if self.controller.market_export_enabled()
            && !access.export_blocked
            && !access.import_blocked
        {
            next = self.market_export(&view, &mut flows, next);
        }

        let costs = self.rates.hourly(
            vector.load_mw,
            flows.grid_import_mw,
            flows.grid_export_mw,
            flows.diesel_mw,
            vector.tariff,
            access.import_blocked,
        );

        let record = DispatchRecord {
            hour: vector.hour,
            base_load_mw: vector.base_load_mw,
            adjusted_load_mw: vector.load_mw,
            solar_mw: vector.solar_mw,
            net_power_mw,
            grid_import_mw: flows.grid_import_mw,
            grid_export_mw: flows.grid_export_mw,
            diesel_mw: flows.diesel_mw,
            battery_flow_mw: flows.battery_flow_mw,
            soc_pct: self.soc_pct(&next),
            tariff: vector.tariff,
            cost_grid_only: costs.cost_grid_only,
            cost_microgrid: costs.cost_microgrid,
            revenue_export: costs.revenue_export,
            cost_diesel: costs.cost_diesel,
            net_savings: costs.net_savings,
            is_manual_override: vector.is_manual_override,
            rationale: flows.rationale,
        };

        debug!(
            hour = record.hour,
            rationale = %record.rationale,
            battery_mw = record.battery_flow_mw,
            import_mw = record.grid_import_mw,
            export_mw = record.grid_export_mw,
            diesel_mw = record.diesel_mw,
            soc_pct = record.soc_pct,
            "hour dispatched"
        );

        (record, next)
    }

    /// Solar exceeds load: charge first, export or curtail the rest.
    fn dispatch_surplus(
        &self,
        vector: &HourlyVector,
        access: GridAccess,
        state: BatteryState,
    ) -> (HourFlows, BatteryState) {
        let mut flows = HourFlows::idle(access);
        let surplus = vector.surplus_mw();

        let limit = self
            .battery
            .charge_limit_mw(&state, vector.weather.temp_c);
        let charge = committed(surplus.min(limit));
        let mut next = state;
        if charge > 0.0 {
            flows.battery_flow_mw = -charge;
            next = self.battery.charge(state, charge);
            flows.rationale = Rationale::SolarCharge;
        }

        let remaining = surplus - charge;
        if remaining > FLOW_EPSILON {
            if access.export_blocked {
                flows.rationale = Rationale::Curtailed;
            } else {
                flows.grid_export_mw = remaining;
                flows.rationale = if charge > 0.0 {
                    Rationale::ChargeAndExport
                } else {
                    Rationale::SolarExport
                };
            }
        }
        (flows, next)
    }

    /// Load exceeds solar: grid charge, battery, grid, then diesel.
    fn dispatch_deficit(&self, view: &HourView<'_>) -> (HourFlows, BatteryState) {
        let access = view.access;
        let temp_c = view.vector.weather.temp_c;
        let plan = self.controller.plan_deficit(view);

        let mut flows = HourFlows::idle(access);
        flows.rationale = plan.rationale;
        let mut next = view.state;
        let mut deficit = view.vector.deficit_mw();
        let limit = access.import_limit_mw;

        // Grid charging never takes import capacity the load needs.
        if plan.grid_charge && !access.import_blocked {
            let room = (limit - deficit.min(limit)).max(0.0);
            let charge = committed(room.min(self.battery.charge_limit_mw(&next, temp_c)));
            if charge > 0.0 {
                flows.battery_flow_mw = -charge;
                flows.grid_import_mw += charge;
                next = self.battery.charge(next, charge);
                flows.rationale = Rationale::EconCharge;
            }
        }

        if plan.discharge && flows.battery_flow_mw == 0.0 {
            let discharge = committed(deficit.min(self.battery.discharge_limit_mw(&next)));
            if discharge > 0.0 {
                flows.battery_flow_mw = discharge;
                next = self.battery.discharge(next, discharge);
                deficit -= discharge;
            }
        }

        if deficit > 0.0 && !access.import_blocked {
            let import = deficit.min((limit - flows.grid_import_mw).max(0.0));
            flows.grid_import_mw += import;
            deficit -= import;
        }

        if deficit > FLOW_EPSILON {
            flows.diesel_mw = self.diesel.dispatch_mw(deficit);
            deficit -= flows.diesel_mw;
            flows.rationale = if deficit > FLOW_EPSILON {
                Rationale::CriticalDeficit
            } else {
                Rationale::AuxSupport
            };
        }
        (flows, next)
    }

    /// Sells spare battery energy into a peak-priced market on top of the
    /// hour's dispatch. Requires the battery not to be charging and SoC at the
    /// start of the hour above [`MARKET_EXPORT_MIN_SOC`].
    fn market_export(
        &self,
        view: &HourView<'_>,
        flows: &mut HourFlows,
        state: BatteryState,
    ) -> BatteryState {
        let start_soc = self.battery.soc_fraction(&view.state);
        if !view.bands.is_peak(view.vector.tariff)
            || flows.battery_flow_mw < 0.0
            || start_soc <= MARKET_EXPORT_MIN_SOC
        {
            return state;
        }
        let headroom_mw = self.battery.max_discharge_mw - flows.battery_flow_mw;
        if headroom_mw <= 0.0 {
            return state;
        }
        let deliverable_mw = self.battery.available_mwh(&state) * ROUND_TRIP_EFFICIENCY;
        let export = committed(headroom_mw.min(deliverable_mw));
        if export <= 0.0 {
            return state;
        }
        flows.battery_flow_mw += export;
        flows.grid_export_mw += export;
        flows.rationale = Rationale::MarketExport;
        self.battery.discharge(state, export)
    }

    fn soc_pct(&self, state: &BatteryState) -> f64 {
        (self.battery.soc_fraction(state) * 100.0).max(0.0)
    }
}
