//! # u-delivery
//!
//! Last-mile delivery simulation for a single-hub truck fleet: package
//! loading rules, greedy nearest-neighbor routing, and package/truck state
//! tracking over a working day.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Address, Package, Truck, Leg)
//! - [`distance`] — Distance matrix and the address map
//! - [`registry`] — Package registry, the single owner of package state
//! - [`policy`] — Loading rules deciding which package may go on which truck
//! - [`routing`] — Nearest-neighbor stop selection
//! - [`simulation`] — Load, depart, deliver, and return cycle
//! - [`evaluation`] — Deadline checks over a finished run
//! - [`error`] — Input and run errors
//!
//! The library logs through [`tracing`] and installs no subscriber.

pub mod distance;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod policy;
pub mod registry;
pub mod routing;
pub mod simulation;
