//! Deficit-hour dispatch policies.
//!
//! A controller only decides *what* to do in an hour where load exceeds
//! solar: whether to buy grid energy into the battery and whether the battery
//! should cover the deficit. Sizing the flows against physical limits is the
//! engine's job.

use crate::devices::battery::ROUND_TRIP_EFFICIENCY;
use crate::devices::{Battery, BatteryState};

use super::grid::GridAccess;
use super::pricing::PriceBands;
use super::profile::HourlyVector;
use super::types::Rationale;

/// Share of battery headroom future solar surplus may fill before grid
/// charging is considered wasteful.
pub const CURTAIL_HEADROOM_SHARE: f64 = 0.9;
/// Grid charging stops at this SoC fraction.
pub const GRID_CHARGE_SOC_CEILING: f64 = 0.9;
/// Above-mean prices justify discharging only above this SoC fraction.
pub const ECON_DISCHARGE_MIN_SOC: f64 = 0.5;
/// Hours after this one may dump remaining charge regardless of price.
pub const END_OF_DAY_HOUR: usize = 21;
/// Battery market export requires this SoC fraction at the start of the hour.
pub const MARKET_EXPORT_MIN_SOC: f64 = 0.4;

/// Everything a controller may look at when planning one hour.
#[derive(Debug, Clone, Copy)]
pub struct HourView<'a> {
    /// Full-day profile of the current pass.
    pub day: &'a [HourlyVector],
    /// Price tiers of the current pass.
    pub bands: &'a PriceBands,
    pub battery: &'a Battery,
    /// Battery state at the start of the hour.
    pub state: BatteryState,
    /// The hour being planned.
    pub vector: &'a HourlyVector,
    /// Grid availability for the hour.
    pub access: GridAccess,
}

impl HourView<'_> {
    fn soc_fraction(&self) -> f64 {
        self.battery.soc_fraction(&self.state)
    }
}

/// Decision for a deficit hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeficitPlan {
    /// Buy grid energy into the battery this hour.
    pub grid_charge: bool,
    /// Let the battery cover the deficit.
    pub discharge: bool,
    /// Tag to record unless execution overrides it.
    pub rationale: Rationale,
}

impl DeficitPlan {
    /// Discharge to follow the load.
    pub fn load_following() -> Self {
        Self {
            grid_charge: false,
            discharge: true,
            rationale: Rationale::LoadFollowing,
        }
    }
}

/// Dispatch policy used by the engine.
pub trait Controller {
    /// Plans an hour where load is not covered by solar.
    fn plan_deficit(&self, view: &HourView<'_>) -> DeficitPlan;

    /// Returns `true` when the battery may sell into the market during peak
    /// hours on top of its regular dispatch.
    fn market_export_enabled(&self) -> bool {
        false
    }
}

/// Discharges whenever there is a deficit.
///
/// Used for the `Standard` and `SelfConsumption` strategies and for every
/// baseline pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoadFollowingController;

impl Controller for LoadFollowingController {
    fn plan_deficit(&self, _view: &HourView<'_>) -> DeficitPlan {
        DeficitPlan::load_following()
    }
}

/// Price-driven controller: buys cheap grid energy ahead of the peak, holds
/// charge through cheap hours and spends it when prices are high.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArbitrageController {
    /// Allow the battery to export to the grid during peak hours.
    pub allow_battery_export: bool,
}

impl ArbitrageController {
    pub fn new(allow_battery_export: bool) -> Self {
        Self {
            allow_battery_export,
        }
    }

    /// Returns `true` when buying grid energy now is expected to pay off at
    /// the next peak.
    ///
    /// All of these must hold: the price is in the cheap tier, the day's top
    /// price beats it after losses, future solar surplus will not already
    /// fill the battery, SoC is below [`GRID_CHARGE_SOC_CEILING`], a peak
    /// hour is still ahead, and the usable charge falls short of the
    /// expected peak deficit net of solar gained before that peak.
    pub fn should_grid_charge(&self, view: &HourView<'_>) -> bool {
        let hour = view.vector.hour;
        let tariff = view.vector.tariff;
        let bands = view.bands;

        let future_surplus_mwh = future_surplus_mwh(view.day, hour);
        let headroom_mwh = view.battery.headroom_mwh(&view.state);
        let will_curtail = future_surplus_mwh > headroom_mwh * CURTAIL_HEADROOM_SHARE;
        let profitable = bands.max * ROUND_TRIP_EFFICIENCY > tariff;

        if !bands.is_cheap(tariff)
            || !profitable
            || will_curtail
            || view.soc_fraction() >= GRID_CHARGE_SOC_CEILING
        {
            return false;
        }

        let Some(next_peak) = bands.next_peak_after(hour) else {
            return false;
        };
        let need_mwh = peak_energy_need_mwh(view.day, bands, hour, next_peak);
        view.battery.available_mwh(&view.state) < need_mwh
    }

    fn discharge_decision(&self, view: &HourView<'_>) -> (bool, Rationale) {
        let tariff = view.vector.tariff;
        let soc = view.soc_fraction();
        if view.bands.is_peak(tariff) {
            (true, Rationale::PeakDischarge)
        } else if tariff > view.bands.mean && soc > ECON_DISCHARGE_MIN_SOC {
            (true, Rationale::EconDischarge)
        } else if view.vector.hour > END_OF_DAY_HOUR && soc > view.battery.min_soc_pct / 100.0 {
            (true, Rationale::EndDayDump)
        } else {
            (false, Rationale::Conserving)
        }
    }
}

impl Controller for ArbitrageController {
    fn plan_deficit(&self, view: &HourView<'_>) -> DeficitPlan {
        // Nothing to buy or offset without a grid.
        if view.access.import_blocked {
            return DeficitPlan::load_following();
        }
        let grid_charge = self.should_grid_charge(view);
        let (discharge, rationale) = self.discharge_decision(view);
        DeficitPlan {
            grid_charge,
            discharge,
            rationale,
        }
    }

    fn market_export_enabled(&self) -> bool {
        self.allow_battery_export
    }
}

/// Solar surplus expected strictly after `hour` (MWh).
pub fn future_surplus_mwh(day: &[HourlyVector], hour: usize) -> f64 {
    day.iter()
        .filter(|v| v.hour > hour)
        .map(HourlyVector::surplus_mw)
        .sum()
}

/// Energy the battery should hold at `hour` to carry the remaining peak
/// hours, after counting solar surplus gained before `next_peak` (MWh).
pub fn peak_energy_need_mwh(
    day: &[HourlyVector],
    bands: &PriceBands,
    hour: usize,
    next_peak: usize,
) -> f64 {
    let ahead = || day.iter().filter(move |v| v.hour >= hour);
    let peak_deficit: f64 = ahead()
        .filter(|v| bands.is_peak(v.tariff))
        .map(HourlyVector::deficit_mw)
        .sum();
    let solar_before_peak: f64 = ahead()
        .filter(|v| v.hour < next_peak)
        .map(HourlyVector::surplus_mw)
        .sum();
    (peak_deficit - solar_before_peak).max(0.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::devices::HourContext;

    fn vector(hour: usize, tariff: f64, solar_mw: f64, load_mw: f64) -> HourlyVector {
        HourlyVector {
            hour,
            tariff,
            solar_mw,
            base_load_mw: load_mw,
            load_mw,
            is_manual_override: false,
            weather: HourContext::new(hour),
        }
    }

    /// Cheap night, pricey evening, no solar.
    fn night_and_peak_day() -> Vec<HourlyVector> {
        (0..24)
            .map(|h| {
                let tariff = match h {
                    0..=6 => 3.0,
                    12 => 8.0,
                    17..=22 => 12.0,
                    _ => 6.0,
                };
                vector(h, tariff, 0.0, 0.5)
            })
            .collect()
    }

    fn open_grid() -> GridAccess {
        GridAccess {
            import_blocked: false,
            export_blocked: false,
            import_limit_mw: 2.0,
        }
    }

    fn view<'a>(
        day: &'a [HourlyVector],
        bands: &'a PriceBands,
        battery: &'a Battery,
        state: BatteryState,
        hour: usize,
        access: GridAccess,
    ) -> HourView<'a> {
        HourView {
            day,
            bands,
            battery,
            state,
            vector: &day[hour],
            access,
        }
    }

    #[test]
    fn load_following_always_discharges() {
        let day = night_and_peak_day();
        let bands = PriceBands::classify(&day);
        let battery = Battery::new(2.0, 1.0, 1.0, 20.0, 95.0);
        let v = view(&day, &bands, &battery, battery.initial_state(), 3, open_grid());
        assert_eq!(LoadFollowingController.plan_deficit(&v), DeficitPlan::load_following());
    }

    #[test]
    fn arbitrage_buys_cheap_ahead_of_peak() {
        let day = night_and_peak_day();
        let bands = PriceBands::classify(&day);
        let battery = Battery::new(2.0, 1.0, 1.0, 20.0, 95.0);
        let state = BatteryState { energy_mwh: 0.5 };
        let v = view(&day, &bands, &battery, state, 2, open_grid());

        let plan = ArbitrageController::new(false).plan_deficit(&v);
        assert!(plan.grid_charge);
        assert!(!plan.discharge);
        assert_eq!(plan.rationale, Rationale::Conserving);
    }

    #[test]
    fn arbitrage_skips_grid_charge_when_already_covered() {
        let day = night_and_peak_day();
        let bands = PriceBands::classify(&day);
        // 20 MWh store, half full: far more than the 3 MWh peak deficit
        let battery = Battery::new(20.0, 1.0, 1.0, 20.0, 95.0);
        let v = view(&day, &bands, &battery, battery.initial_state(), 2, open_grid());
        assert!(!ArbitrageController::new(false).should_grid_charge(&v));
    }

    #[test]
    fn arbitrage_skips_grid_charge_when_solar_will_fill_battery() {
        let mut day = night_and_peak_day();
        for h in 9..15 {
            day[h] = vector(h, 6.0, 2.0, 0.5);
        }
        let bands = PriceBands::classify(&day);
        let battery = Battery::new(2.0, 1.0, 1.0, 20.0, 95.0);
        let state = BatteryState { energy_mwh: 0.5 };
        let v = view(&day, &bands, &battery, state, 2, open_grid());
        assert!(!ArbitrageController::new(false).should_grid_charge(&v));
    }

    #[test]
    fn arbitrage_discharge_tiers() {
        let day = night_and_peak_day();
        let bands = PriceBands::classify(&day);
        let battery = Battery::new(2.0, 1.0, 1.0, 20.0, 95.0);
        let controller = ArbitrageController::new(false);

        let peak = view(&day, &bands, &battery, battery.initial_state(), 19, open_grid());
        assert_eq!(controller.plan_deficit(&peak).rationale, Rationale::PeakDischarge);

        let full = BatteryState { energy_mwh: 1.6 };
        let midday = view(&day, &bands, &battery, full, 12, open_grid());
        assert_eq!(controller.plan_deficit(&midday).rationale, Rationale::EconDischarge);

        let low = BatteryState { energy_mwh: 0.8 };
        let midday_low = view(&day, &bands, &battery, low, 12, open_grid());
        let plan = controller.plan_deficit(&midday_low);
        assert!(!plan.discharge);
        assert_eq!(plan.rationale, Rationale::Conserving);

        let late = view(&day, &bands, &battery, low, 23, open_grid());
        assert_eq!(controller.plan_deficit(&late).rationale, Rationale::EndDayDump);
    }

    #[test]
    fn arbitrage_follows_load_when_import_blocked() {
        let day = night_and_peak_day();
        let bands = PriceBands::classify(&day);
        let battery = Battery::new(2.0, 1.0, 1.0, 20.0, 95.0);
        let blocked = GridAccess {
            import_blocked: true,
            export_blocked: true,
            import_limit_mw: 0.0,
        };
        let v = view(&day, &bands, &battery, battery.initial_state(), 2, blocked);
        assert_eq!(
            ArbitrageController::new(true).plan_deficit(&v),
            DeficitPlan::load_following()
        );
    }

    #[test]
    fn peak_need_nets_out_solar_before_peak() {
        let mut day = night_and_peak_day();
        day[10] = vector(10, 6.0, 1.0, 0.5);
        let bands = PriceBands::classify(&day);
        assert_eq!(bands.next_peak_after(2), Some(17));
        let need = peak_energy_need_mwh(&day, &bands, 2, 17);
        // six peak hours at 0.5 MW, minus 0.5 MWh of surplus at hour 10
        assert_relative_eq!(need, 2.5, epsilon = 1e-12);
        assert_relative_eq!(future_surplus_mwh(&day, 2), 0.5, epsilon = 1e-12);
        assert_eq!(future_surplus_mwh(&day, 10), 0.0);
    }
}
