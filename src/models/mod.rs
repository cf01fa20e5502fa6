//! Domain model types for hub-based package delivery.
//!
//! Provides addresses, packages with deadlines and loading constraints,
//! trucks with manifests and odometers, and the legs trucks drive.

mod address;
mod package;
mod route;
mod truck;

pub use address::{Address, HUB_ADDRESS_ID};
pub use package::{Constraint, Deadline, Package, PackageStatus};
pub use route::Leg;
pub use truck::{Truck, TruckStatus};
