//! Hourly microgrid dispatch and arbitrage engine.
//!
//! Builds a 24-hour profile of solar, load and tariff, dispatches a battery,
//! grid connection and diesel backup against it, and audits the day against
//! a load-following baseline.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod devices;
pub mod error;
/// CSV and JSON export of run results.
pub mod io;
pub mod logging;
pub mod runner;
/// Profile, pricing, controller, engine and audit modules.
pub mod sim;

pub use config::SimulationConfig;
pub use error::{ConfigError, Error, Result};
pub use runner::{SimulationResult, run_pass, run_simulation};
