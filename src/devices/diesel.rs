/// Backup diesel generator, dispatched last to cover residual deficit.
#[derive(Debug, Clone, PartialEq)]
pub struct DieselGenerator {
    /// Rated output in MW.
    pub capacity_mw: f64,
}

impl DieselGenerator {
    /// Creates a new generator. Fuel pricing lives in [`crate::sim::audit::CostRates`].
    pub fn new(capacity_mw: f64) -> Self {
        Self { capacity_mw }
    }

    /// Output needed to cover `deficit_mw`, limited to the rated capacity.
    pub fn dispatch_mw(&self, deficit_mw: f64) -> f64 {
        deficit_mw.min(self.capacity_mw).max(0.0)
    }
}
