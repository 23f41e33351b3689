/// Per-hour financials and the daily audit.
pub mod audit;
pub mod controller;
pub mod engine;
/// Grid coupling: import cap and outage windows.
pub mod grid;
/// Scheduled grid outage windows.
pub mod outage;
pub mod pricing;
/// Day profile construction and manual overrides.
pub mod profile;
/// Tariff tables.
pub mod tariff;
pub mod types;
