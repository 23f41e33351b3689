//! CSV export for dispatch records.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::sim::types::DispatchRecord;

/// Column header for CSV dispatch export.
pub const HEADER: &str = "hour,base_load_mw,adjusted_load_mw,solar_mw,net_power_mw,\
                          grid_import_mw,grid_export_mw,diesel_mw,battery_flow_mw,soc_pct,\
                          tariff,cost_grid_only,cost_microgrid,revenue_export,cost_diesel,\
                          net_savings,is_manual_override,rationale";

/// Exports dispatch records to a CSV file at the given path.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] if the file cannot be created, or
/// [`crate::Error::Csv`] if writing fails.
pub fn export_dispatch_csv(records: &[DispatchRecord], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_dispatch_csv(BufWriter::new(file), records)
}

/// Writes dispatch records as CSV to any writer.
///
/// One header row, then one row per record. Output is deterministic for
/// identical inputs.
///
/// # Errors
///
/// Returns [`crate::Error::Csv`] if writing fails.
pub fn write_dispatch_csv<W: Write>(writer: W, records: &[DispatchRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in records {
        wtr.write_record(&[
            r.hour.to_string(),
            format!("{:.4}", r.base_load_mw),
            format!("{:.4}", r.adjusted_load_mw),
            format!("{:.4}", r.solar_mw),
            format!("{:.4}", r.net_power_mw),
            format!("{:.4}", r.grid_import_mw),
            format!("{:.4}", r.grid_export_mw),
            format!("{:.4}", r.diesel_mw),
            format!("{:.4}", r.battery_flow_mw),
            format!("{:.2}", r.soc_pct),
            format!("{:.2}", r.tariff),
            format!("{:.2}", r.cost_grid_only),
            format!("{:.2}", r.cost_microgrid),
            format!("{:.2}", r.revenue_export),
            format!("{:.2}", r.cost_diesel),
            format!("{:.2}", r.net_savings),
            r.is_manual_override.to_string(),
            r.rationale.label().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
