//! Delivery simulation.
//!
//! - [`DeliverySimulator`] — runs truck trips against a [`PackageRegistry`](crate::registry::PackageRegistry)
//! - [`SimulationConfig`] — speed, capacity, start of day, driver count
//! - [`TruckPlan`] / [`AddressCorrection`] — the day's trips and known address fixes
//! - [`SimulationOutcome`] — trucks, mileage, and rejected loads after a run

mod config;
mod outcome;
mod plan;
mod simulator;

pub use config::SimulationConfig;
pub use outcome::SimulationOutcome;
pub use plan::{AddressCorrection, TruckPlan};
pub use simulator::DeliverySimulator;
