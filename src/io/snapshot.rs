//! JSON snapshot of a run, shaped for a downstream advisory service.
//!
//! Flows are rounded to three decimals and SoC to whole percent so the
//! payload stays compact.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::runner::SimulationResult;
use crate::sim::audit::FinancialAudit;
use crate::sim::outage::OutageInterval;
use crate::sim::types::Rationale;

/// Complete advisory payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvisorySnapshot {
    pub meta: SnapshotMeta,
    pub audit: FinancialAudit,
    pub outages: SnapshotOutages,
    pub telemetry: Vec<TelemetryPoint>,
}

/// Run context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotMeta {
    pub scenario: String,
    pub strategy: String,
    /// Mean cloud cover over the day (%).
    pub avg_cloud_pct: f64,
    /// Mean ambient temperature over the day (°C).
    pub avg_temp_c: f64,
}

/// Configured outage windows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotOutages {
    pub import: Vec<OutageInterval>,
    pub export: Vec<OutageInterval>,
}

/// One compact hourly row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryPoint {
    pub t: usize,
    pub load: f64,
    #[serde(rename = "gen")]
    pub generation: f64,
    pub grid_in: f64,
    pub grid_out: f64,
    pub aux: f64,
    pub batt: f64,
    pub soc: i64,
    pub state: Rationale,
    pub price: f64,
}

impl AdvisorySnapshot {
    /// Builds the snapshot for `result`, produced from `config`.
    pub fn new(config: &SimulationConfig, result: &SimulationResult) -> Self {
        let telemetry = result
            .records
            .iter()
            .map(|r| TelemetryPoint {
                t: r.hour,
                load: round3(r.adjusted_load_mw),
                generation: round3(r.solar_mw),
                grid_in: round3(r.grid_import_mw),
                grid_out: round3(r.grid_export_mw),
                aux: round3(r.diesel_mw),
                batt: round3(r.battery_flow_mw),
                soc: r.soc_pct.round() as i64,
                state: r.rationale,
                price: r.tariff,
            })
            .collect();

        Self {
            meta: SnapshotMeta {
                scenario: config.grid.scenario.to_string(),
                strategy: config.strategy().to_string(),
                avg_cloud_pct: round3(config.weather.mean_cloud_pct()),
                avg_temp_c: round3(config.weather.mean_temp_c()),
            },
            audit: result.audit.clone(),
            outages: SnapshotOutages {
                import: config.grid.import_outages.clone(),
                export: config.grid.export_outages.clone(),
            },
            telemetry,
        }
    }

    /// Serializes to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes pretty-printed JSON to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if serialization or writing fails.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Writes pretty-printed JSON to a file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the file cannot be created.
    pub fn export(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_json(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::run_simulation;
    use crate::sim::profile::HourOverrides;

    fn snapshot(config: &SimulationConfig) -> AdvisorySnapshot {
        let result = run_simulation(config, &HourOverrides::new(), &HourOverrides::new());
        AdvisorySnapshot::new(config, &result)
    }

    #[test]
    fn telemetry_is_rounded() {
        let snap = snapshot(&SimulationConfig::default());
        assert_eq!(snap.telemetry.len(), 24);
        for p in &snap.telemetry {
            assert_eq!(p.load, (p.load * 1000.0).round() / 1000.0);
            assert!((0..=100).contains(&p.soc));
        }
        assert_eq!(snap.meta.strategy, "Economic Arbitrage");
        assert_eq!(snap.meta.avg_cloud_pct, 5.0);
    }

    #[test]
    fn json_uses_compact_keys() {
        let snap = snapshot(&SimulationConfig::evening_outage());
        let json = snap.to_json().unwrap_or_default();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap_or_default();
        assert_eq!(value["outages"]["import"][0]["start"], 22);
        assert_eq!(value["outages"]["import"][0]["end"], 2);
        let first = &value["telemetry"][0];
        for key in ["t", "load", "gen", "grid_in", "grid_out", "aux", "batt", "soc", "state", "price"] {
            assert!(first.get(key).is_some(), "missing key {key}");
        }
        assert!(value["audit"]["arbitrage_savings"].is_number());
    }

    #[test]
    fn round3_keeps_three_decimals() {
        assert_eq!(round3(0.12345), 0.123);
        assert_eq!(round3(-0.2766), -0.277);
    }
}
