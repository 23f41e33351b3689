use crate::sim::outage::{OutageInterval, any_active};
use crate::sim::types::Scenario;

/// Point of common coupling with the utility grid.
///
/// Holds the import cap and the outage schedule, and answers what the site
/// may do with the grid in a given hour.
#[derive(Debug, Clone)]
pub struct GridConnection {
    scenario: Scenario,
    max_import_mw: f64,
    import_outages: Vec<OutageInterval>,
    export_outages: Vec<OutageInterval>,
}

/// Grid availability for one hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridAccess {
    /// Import is unavailable (islanded or scheduled outage).
    pub import_blocked: bool,
    /// Export is unavailable (islanded or scheduled outage).
    pub export_blocked: bool,
    /// Import cap for the hour: 0 when import is blocked (MW).
    pub import_limit_mw: f64,
}

impl GridConnection {
    /// Creates a grid connection.
    pub fn new(
        scenario: Scenario,
        max_import_mw: f64,
        import_outages: Vec<OutageInterval>,
        export_outages: Vec<OutageInterval>,
    ) -> Self {
        Self {
            scenario,
            max_import_mw,
            import_outages,
            export_outages,
        }
    }

    /// Returns the grid availability for `hour`.
    pub fn access(&self, hour: usize) -> GridAccess {
        let islanded = self.scenario == Scenario::Islanded;
        let import_blocked = islanded || any_active(&self.import_outages, hour);
        let export_blocked = islanded || any_active(&self.export_outages, hour);
        GridAccess {
            import_blocked,
            export_blocked,
            import_limit_mw: if import_blocked {
                0.0
            } else {
                self.max_import_mw.max(0.0)
            },
        }
    }
}
