//! The default package eligibility rules.

use jiff::civil::Time;

use super::decision::{ConstraintKind, LoadingDecision};
use crate::models::{Constraint, Package, PackageStatus, Truck, TruckStatus};

/// Decides whether a package may be loaded onto a truck at a given time.
///
/// Implementations must be pure: the same inputs always give the same
/// decision, and nothing is mutated. The caller applies the load.
pub trait LoadingPolicy {
    /// Evaluates one load attempt.
    fn evaluate(&self, package: &Package, truck: &Truck, now: Time) -> LoadingDecision;
}

/// The standard rule chain.
///
/// Checks run in a fixed order and the first failing check decides:
///
/// 1. `TruckOnly` for a different truck
/// 2. `DelayedArrival` still in the future
/// 3. unresolved `WrongAddress`, or an address correction not yet known at `now`
/// 4. package already delivered
/// 5. package already en route
/// 6. package at or on its way to the hub but assigned to a different truck
/// 7. truck manifest full
/// 8. truck away or out of service, and the package is not already its own
///
/// # Examples
///
/// ```
/// use jiff::civil::time;
/// use u_delivery::models::{Constraint, Package, Truck};
/// use u_delivery::policy::{ConstraintKind, LoadingPolicy, StandardPolicy};
///
/// let package = Package::new(3, 1, 2.0).with_constraint(Constraint::TruckOnly(2));
/// let now = time(8, 0, 0, 0);
///
/// let on_truck_1 = StandardPolicy.evaluate(&package, &Truck::new(1, 16), now);
/// assert_eq!(on_truck_1.reason(), Some(ConstraintKind::TruckOnly));
///
/// let on_truck_2 = StandardPolicy.evaluate(&package, &Truck::new(2, 16), now);
/// assert!(on_truck_2.is_eligible());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardPolicy;

impl LoadingPolicy for StandardPolicy {
    fn evaluate(&self, package: &Package, truck: &Truck, now: Time) -> LoadingDecision {
        evaluate(package, truck, now)
    }
}

/// Runs the [`StandardPolicy`] rule chain.
pub fn evaluate(package: &Package, truck: &Truck, now: Time) -> LoadingDecision {
    match check(package, truck, now) {
        Some(reason) => LoadingDecision::rejected(reason),
        None => LoadingDecision::eligible(),
    }
}

fn check(package: &Package, truck: &Truck, now: Time) -> Option<ConstraintKind> {
    match package.constraint() {
        Constraint::TruckOnly(id) if id != truck.id() => return Some(ConstraintKind::TruckOnly),
        Constraint::DelayedArrival(at) if now < at => return Some(ConstraintKind::DelayedArrival),
        Constraint::WrongAddress => return Some(ConstraintKind::WrongAddress),
        _ => {}
    }
    if package.address_corrected_at().is_some_and(|known_at| now < known_at) {
        return Some(ConstraintKind::WrongAddress);
    }

    let own_package = package.assigned_truck_id() == Some(truck.id());
    match package.status() {
        PackageStatus::Delivered => return Some(ConstraintKind::AlreadyDelivered),
        PackageStatus::EnRoute => return Some(ConstraintKind::AlreadyEnRoute),
        PackageStatus::NotAvailable | PackageStatus::AtHub
            if package.assigned_truck_id().is_some() && !own_package =>
        {
            return Some(ConstraintKind::AssignedToOtherTruck);
        }
        _ => {}
    }

    if truck.is_full() {
        return Some(ConstraintKind::CapacityExceeded);
    }

    let away = matches!(
        truck.status(),
        TruckStatus::NotAvailable | TruckStatus::EnRoute | TruckStatus::Returning
    );
    if away && !own_package {
        return Some(ConstraintKind::TruckUnavailable);
    }

    None
}
