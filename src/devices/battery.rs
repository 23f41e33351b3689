/// Round-trip efficiency, charged entirely against state changes.
pub const ROUND_TRIP_EFFICIENCY: f64 = 0.92;
/// Fraction of capacity every pass starts from.
pub const INITIAL_SOC_FRACTION: f64 = 0.5;
/// Ambient temperature above which charge power is throttled (°C).
pub const THERMAL_THROTTLE_TEMP_C: f64 = 35.0;
/// Charge power lost per °C above the throttle temperature.
pub const THERMAL_THROTTLE_PER_DEG: f64 = 0.05;
/// Lowest thermal derating factor.
pub const THERMAL_DERATING_FLOOR: f64 = 0.1;
/// SoC fraction above which constant-voltage taper applies.
pub const CV_TAPER_START: f64 = 0.8;
/// Lowest CC-CV derating factor.
pub const CV_DERATING_FLOOR: f64 = 0.05;

/// A battery energy store with a bounded state-of-charge window.
///
/// `Battery` holds the static parameters; the energy content lives in a
/// separate [`BatteryState`] value so each simulation pass can own its own
/// copy and thread it through the hourly fold.
///
/// # Flow Convention
/// - Charging stores `amount × η`
/// - Discharging removes `amount / η`
#[derive(Debug, Clone, PartialEq)]
pub struct Battery {
    /// Rated energy capacity in MWh.
    pub capacity_mwh: f64,

    /// Nameplate charge power in MW, before derating.
    pub max_charge_mw: f64,

    /// Nameplate discharge power in MW.
    pub max_discharge_mw: f64,

    /// Lower SoC bound in percent of capacity.
    pub min_soc_pct: f64,

    /// Upper SoC bound in percent of capacity.
    pub max_soc_pct: f64,
}

/// Energy content of a battery during one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryState {
    /// Stored energy in MWh.
    pub energy_mwh: f64,
}

impl Battery {
    /// Creates a new battery.
    ///
    /// No consistency checks are made here; see
    /// [`crate::config::SimulationConfig::validate`] for a pre-flight check.
    pub fn new(
        capacity_mwh: f64,
        max_charge_mw: f64,
        max_discharge_mw: f64,
        min_soc_pct: f64,
        max_soc_pct: f64,
    ) -> Self {
        Self {
            capacity_mwh,
            max_charge_mw,
            max_discharge_mw,
            min_soc_pct,
            max_soc_pct,
        }
    }

    /// Lowest allowed energy content (MWh).
    pub fn min_energy_mwh(&self) -> f64 {
        self.min_soc_pct / 100.0 * self.capacity_mwh
    }

    /// Highest allowed energy content (MWh).
    pub fn max_energy_mwh(&self) -> f64 {
        self.max_soc_pct / 100.0 * self.capacity_mwh
    }

    /// Fresh state for the start of a pass: 50 % of capacity, clamped into the SoC window.
    pub fn initial_state(&self) -> BatteryState {
        let fraction = INITIAL_SOC_FRACTION
            .min(self.max_soc_pct / 100.0)
            .max(self.min_soc_pct / 100.0);
        BatteryState {
            energy_mwh: self.capacity_mwh * fraction,
        }
    }

    /// SoC as a fraction of capacity.
    pub fn soc_fraction(&self, state: &BatteryState) -> f64 {
        if self.capacity_mwh > 0.0 {
            state.energy_mwh / self.capacity_mwh
        } else {
            0.0
        }
    }

    /// Room left below the upper bound (MWh).
    pub fn headroom_mwh(&self, state: &BatteryState) -> f64 {
        self.max_energy_mwh() - state.energy_mwh
    }

    /// Energy above the lower bound (MWh), never negative.
    pub fn available_mwh(&self, state: &BatteryState) -> f64 {
        (state.energy_mwh - self.min_energy_mwh()).max(0.0)
    }

    /// Charge power ceiling after thermal and CC-CV derating (MW).
    pub fn derated_charge_mw(&self, state: &BatteryState, temp_c: f64) -> f64 {
        self.max_charge_mw * thermal_derating(temp_c) * cv_derating(self.soc_fraction(state))
    }

    /// Largest power the battery can absorb this hour from any source (MW).
    pub fn charge_limit_mw(&self, state: &BatteryState, temp_c: f64) -> f64 {
        self.derated_charge_mw(state, temp_c)
            .min(self.headroom_mwh(state) / ROUND_TRIP_EFFICIENCY)
    }

    /// Largest power the battery can deliver this hour (MW).
    pub fn discharge_limit_mw(&self, state: &BatteryState) -> f64 {
        self.max_discharge_mw
            .min(self.available_mwh(state) * ROUND_TRIP_EFFICIENCY)
    }

    /// Returns the state after absorbing `power_mw` for one hour.
    pub fn charge(&self, state: BatteryState, power_mw: f64) -> BatteryState {
        self.clamp(BatteryState {
            energy_mwh: state.energy_mwh + power_mw * ROUND_TRIP_EFFICIENCY,
        })
    }

    /// Returns the state after delivering `power_mw` for one hour.
    pub fn discharge(&self, state: BatteryState, power_mw: f64) -> BatteryState {
        self.clamp(BatteryState {
            energy_mwh: state.energy_mwh - power_mw / ROUND_TRIP_EFFICIENCY,
        })
    }

    /// Pins `state` into `[min, max]` SoC and `[0, capacity]`.
    fn clamp(&self, state: BatteryState) -> BatteryState {
        let energy = state
            .energy_mwh
            .min(self.max_energy_mwh())
            .max(self.min_energy_mwh())
            .clamp(0.0, self.capacity_mwh.max(0.0));
        BatteryState { energy_mwh: energy }
    }
}

/// Charge derating from ambient temperature: full power up to 35 °C,
/// then 5 % less per degree, never below 10 %.
pub fn thermal_derating(temp_c: f64) -> f64 {
    if temp_c > THERMAL_THROTTLE_TEMP_C {
        let excess = temp_c - THERMAL_THROTTLE_TEMP_C;
        (1.0 - excess * THERMAL_THROTTLE_PER_DEG).max(THERMAL_DERATING_FLOOR)
    } else {
        1.0
    }
}

/// Charge derating from the constant-voltage phase above 80 % SoC, never below 5 %.
pub fn cv_derating(soc_fraction: f64) -> f64 {
    if soc_fraction > CV_TAPER_START {
        ((1.0 - soc_fraction) / (1.0 - CV_TAPER_START)).max(CV_DERATING_FLOOR)
    } else {
        1.0
    }
}
