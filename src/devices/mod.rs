//! Site device models: solar array, base load, battery store and diesel backup.

/// Site base-load curve.
pub mod baseload;
/// Battery energy store and its derating curves.
pub mod battery;
pub mod diesel;
/// Weather-attenuated solar PV model.
pub mod solar;
pub mod types;

// Re-export the main types for convenience
pub use baseload::BaseLoad;
pub use battery::{Battery, BatteryState};
pub use diesel::DieselGenerator;
pub use solar::SolarArray;
pub use types::Device;
pub use types::HourContext;
