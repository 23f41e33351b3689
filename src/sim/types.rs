//! Core dispatch types: operating modes, rationale tags and per-hour records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of hours in the dispatch horizon.
pub const HOURS: usize = 24;

/// Grid connection scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Grid available subject to scheduled outages.
    #[default]
    Normal,
    /// No grid connection for the whole day.
    Islanded,
}

/// Battery operating strategy requested for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Discharge whenever there is a deficit. Always used for the baseline pass.
    Standard,
    /// Buy low, hold for peaks, sell high.
    #[default]
    Arbitrage,
    /// Maximise self-consumption. Has no branch of its own and dispatches like `Standard`.
    SelfConsumption,
}

impl Strategy {
    /// Parses a strategy from its snake/kebab-case name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.replace('-', "_").as_str() {
            "standard" => Some(Self::Standard),
            "arbitrage" => Some(Self::Arbitrage),
            "self_consumption" => Some(Self::SelfConsumption),
            _ => None,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Standard => "Standard (Load-Follow)",
            Self::Arbitrage => "Economic Arbitrage",
            Self::SelfConsumption => "Max Self-Consumption",
        })
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "Normal",
            Self::Islanded => "Islanded",
        })
    }
}

/// Why the battery (and the rest of the site) did what it did in an hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rationale {
    #[serde(rename = "Standby")]
    Standby,
    #[serde(rename = "Grid Isolated")]
    GridIsolated,
    #[serde(rename = "Solar Charge")]
    SolarCharge,
    #[serde(rename = "Solar Export")]
    SolarExport,
    #[serde(rename = "Charge & Export")]
    ChargeAndExport,
    #[serde(rename = "Curtailed")]
    Curtailed,
    #[serde(rename = "Econ Charge")]
    EconCharge,
    #[serde(rename = "Peak Discharge")]
    PeakDischarge,
    #[serde(rename = "Econ Discharge")]
    EconDischarge,
    #[serde(rename = "End-Day Dump")]
    EndDayDump,
    #[serde(rename = "Conserving")]
    Conserving,
    #[serde(rename = "Load Following")]
    LoadFollowing,
    #[serde(rename = "Market Export")]
    MarketExport,
    #[serde(rename = "Aux Support")]
    AuxSupport,
    #[serde(rename = "Critical Deficit")]
    CriticalDeficit,
}

impl Rationale {
    /// Display label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Standby => "Standby",
            Self::GridIsolated => "Grid Isolated",
            Self::SolarCharge => "Solar Charge",
            Self::SolarExport => "Solar Export",
            Self::ChargeAndExport => "Charge & Export",
            Self::Curtailed => "Curtailed",
            Self::EconCharge => "Econ Charge",
            Self::PeakDischarge => "Peak Discharge",
            Self::EconDischarge => "Econ Discharge",
            Self::EndDayDump => "End-Day Dump",
            Self::Conserving => "Conserving",
            Self::LoadFollowing => "Load Following",
            Self::MarketExport => "Market Export",
            Self::AuxSupport => "Aux Support",
            Self::CriticalDeficit => "Critical Deficit",
        }
    }
}

impl fmt::Display for Rationale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Complete record of one dispatched hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchRecord {
    /// Hour of day.
    pub hour: usize,
    /// Load from the base curve, before overrides (MW).
    pub base_load_mw: f64,
    /// Load after manual override (MW).
    pub adjusted_load_mw: f64,
    /// Solar generation (MW).
    pub solar_mw: f64,
    /// `solar - load`: positive is surplus, negative is deficit (MW).
    pub net_power_mw: f64,
    /// Grid import (MW, >= 0).
    pub grid_import_mw: f64,
    /// Grid export (MW, >= 0).
    pub grid_export_mw: f64,
    /// Diesel generation (MW, >= 0).
    pub diesel_mw: f64,
    /// Battery flow (MW; positive=discharge, negative=charge).
    pub battery_flow_mw: f64,
    /// SoC after this hour, percent of capacity.
    pub soc_pct: f64,
    /// Tariff for this hour (per kWh).
    pub tariff: f64,
    /// What the load would cost on grid alone.
    pub cost_grid_only: f64,
    /// Grid import bill.
    pub cost_microgrid: f64,
    /// Export revenue.
    pub revenue_export: f64,
    /// Diesel fuel cost.
    pub cost_diesel: f64,
    /// `cost_grid_only - (cost_microgrid + cost_diesel - revenue_export)`.
    pub net_savings: f64,
    /// Whether the load came from a manual override.
    pub is_manual_override: bool,
    /// Decision tag.
    pub rationale: Rationale,
}

impl DispatchRecord {
    /// Energy discharged from the battery this hour (MWh, >= 0).
    pub fn battery_discharge_mw(&self) -> f64 {
        self.battery_flow_mw.max(0.0)
    }

    /// Energy absorbed by the battery this hour (MWh, >= 0).
    pub fn battery_charge_mw(&self) -> f64 {
        (-self.battery_flow_mw).max(0.0)
    }

    /// Supply minus demand; zero for every fully served, uncurtailed hour.
    pub fn balance_residual_mw(&self) -> f64 {
        self.solar_mw + self.battery_discharge_mw() - self.battery_charge_mw()
            + self.grid_import_mw
            - self.grid_export_mw
            + self.diesel_mw
            - self.adjusted_load_mw
    }
}

impl fmt::Display for DispatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "h={:>2} | load={:.3}{} solar={:.3} | grid(in={:.3}, out={:.3}) diesel={:.3} \
             bat={:>+7.3} (SoC={:.1}%) | price={:.2} | savings={:.1} | {}",
            self.hour,
            self.adjusted_load_mw,
            if self.is_manual_override { "*" } else { "" },
            self.solar_mw,
            self.grid_import_mw,
            self.grid_export_mw,
            self.diesel_mw,
            self.battery_flow_mw,
            self.soc_pct,
            self.tariff,
            self.net_savings,
            self.rationale,
        )
    }
}
