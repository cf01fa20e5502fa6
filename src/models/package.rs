//! Package, delivery deadline, and loading constraint types.

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a package.
///
/// States are ordered: a package only moves forward through
/// `NotAvailable < AtHub < EnRoute < Delivered`. The single exception is an
/// address correction, which puts a mis-addressed package back to `AtHub`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum PackageStatus {
    /// Not yet at the hub (e.g. delayed inbound flight).
    NotAvailable,
    /// Waiting at the hub, possibly already loaded onto a parked truck.
    #[default]
    AtHub,
    /// On a truck that has left the hub.
    EnRoute,
    /// Handed over at its address.
    Delivered,
}

/// Latest acceptable delivery time.
///
/// # Examples
///
/// ```
/// use jiff::civil::time;
/// use u_delivery::models::Deadline;
///
/// let by_ten_thirty = Deadline::By(time(10, 30, 0, 0));
/// assert!(by_ten_thirty.is_met_by(time(10, 30, 0, 0)));
/// assert!(!by_ten_thirty.is_met_by(time(10, 31, 0, 0)));
/// assert!(Deadline::EndOfDay.is_met_by(time(16, 0, 0, 0)));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deadline {
    /// Any time during the operating day.
    #[default]
    EndOfDay,
    /// No later than the given time.
    By(Time),
}

impl Deadline {
    /// The deadline time, or `None` for end of day.
    pub fn time(&self) -> Option<Time> {
        match self {
            Deadline::EndOfDay => None,
            Deadline::By(t) => Some(*t),
        }
    }

    /// Returns `true` if a delivery at `delivered_at` satisfies this deadline.
    pub fn is_met_by(&self, delivered_at: Time) -> bool {
        match self {
            Deadline::EndOfDay => true,
            Deadline::By(t) => delivered_at <= *t,
        }
    }
}

/// Special handling note attached to a package.
///
/// Consulted by the [`LoadingPolicy`](crate::policy::LoadingPolicy) before
/// every load attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constraint {
    /// No special handling.
    #[default]
    None,
    /// May only be carried by the truck with this id.
    TruckOnly(usize),
    /// Reaches the hub at the given time; cannot be loaded before.
    DelayedArrival(Time),
    /// Listed address is wrong; cannot be loaded until corrected.
    WrongAddress,
}

/// A package to deliver.
///
/// Packages are owned by the [`PackageRegistry`](crate::registry::PackageRegistry),
/// which is the only place their status and timestamps change.
///
/// # Examples
///
/// ```
/// use jiff::civil::time;
/// use u_delivery::models::{Constraint, Deadline, Package, PackageStatus};
///
/// let p = Package::new(6, 13, 88.0)
///     .with_deadline(Deadline::By(time(10, 30, 0, 0)))
///     .with_constraint(Constraint::DelayedArrival(time(9, 5, 0, 0)))
///     .with_status(PackageStatus::NotAvailable);
///
/// assert_eq!(p.id(), 6);
/// assert_eq!(p.address_id(), 13);
/// assert_eq!(p.status(), PackageStatus::NotAvailable);
/// assert!(p.assigned_truck_id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    id: usize,
    address_id: usize,
    weight_kg: f64,
    #[serde(default)]
    deadline: Deadline,
    #[serde(default)]
    constraint: Constraint,
    #[serde(default)]
    status: PackageStatus,
    #[serde(default)]
    assigned_truck_id: Option<usize>,
    #[serde(default)]
    hub_arrival: Option<Time>,
    #[serde(default)]
    load_time: Option<Time>,
    #[serde(default)]
    departure_time: Option<Time>,
    #[serde(default)]
    delivery_time: Option<Time>,
    #[serde(default)]
    address_corrected_at: Option<Time>,
}

impl Package {
    /// Creates an unconstrained package at the hub with an end-of-day deadline.
    pub fn new(id: usize, address_id: usize, weight_kg: f64) -> Self {
        Self {
            id,
            address_id,
            weight_kg,
            deadline: Deadline::EndOfDay,
            constraint: Constraint::None,
            status: PackageStatus::AtHub,
            assigned_truck_id: None,
            hub_arrival: None,
            load_time: None,
            departure_time: None,
            delivery_time: None,
            address_corrected_at: None,
        }
    }

    /// Sets the delivery deadline.
    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }

    /// Sets the special handling constraint.
    ///
    /// Does not change the status: a delayed package should also be given
    /// [`PackageStatus::NotAvailable`].
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = constraint;
        self
    }

    /// Sets the initial status.
    pub fn with_status(mut self, status: PackageStatus) -> Self {
        self.status = status;
        self
    }

    /// Package ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Destination address ID.
    pub fn address_id(&self) -> usize {
        self.address_id
    }

    /// Weight in kilograms.
    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Delivery deadline.
    pub fn deadline(&self) -> Deadline {
        self.deadline
    }

    /// Special handling constraint.
    pub fn constraint(&self) -> Constraint {
        self.constraint
    }

    /// Current status.
    pub fn status(&self) -> PackageStatus {
        self.status
    }

    /// Truck this package was first loaded onto. Fixed once set.
    pub fn assigned_truck_id(&self) -> Option<usize> {
        self.assigned_truck_id
    }

    /// When the package reached the hub, if it has.
    pub fn hub_arrival(&self) -> Option<Time> {
        self.hub_arrival
    }

    /// When the package was loaded onto its truck.
    pub fn load_time(&self) -> Option<Time> {
        self.load_time
    }

    /// When its truck left the hub.
    pub fn departure_time(&self) -> Option<Time> {
        self.departure_time
    }

    /// When it was delivered.
    pub fn delivery_time(&self) -> Option<Time> {
        self.delivery_time
    }

    /// When the current address became known, if it was corrected.
    ///
    /// Before this time the address counts as still wrong.
    pub fn address_corrected_at(&self) -> Option<Time> {
        self.address_corrected_at
    }

    /// Returns `true` if delivered on or before its deadline.
    ///
    /// `false` while undelivered.
    pub fn is_on_time(&self) -> bool {
        self.delivery_time
            .is_some_and(|t| self.deadline.is_met_by(t))
    }

    pub(crate) fn set_status(&mut self, status: PackageStatus) {
        self.status = status;
    }

    pub(crate) fn set_assigned_truck(&mut self, truck_id: usize) {
        self.assigned_truck_id = Some(truck_id);
    }

    pub(crate) fn set_hub_arrival(&mut self, at: Time) {
        self.hub_arrival = Some(at);
    }

    pub(crate) fn set_load_time(&mut self, at: Time) {
        self.load_time = Some(at);
    }

    pub(crate) fn set_departure_time(&mut self, at: Time) {
        self.departure_time = Some(at);
    }

    pub(crate) fn set_delivery_time(&mut self, at: Time) {
        self.delivery_time = Some(at);
    }

    pub(crate) fn set_address(&mut self, address_id: usize, known_at: Time) {
        self.address_id = address_id;
        self.address_corrected_at = Some(known_at);
    }

    pub(crate) fn set_constraint(&mut self, constraint: Constraint) {
        self.constraint = constraint;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::time;

    #[test]
    fn test_status_order() {
        assert!(PackageStatus::NotAvailable < PackageStatus::AtHub);
        assert!(PackageStatus::AtHub < PackageStatus::EnRoute);
        assert!(PackageStatus::EnRoute < PackageStatus::Delivered);
    }

    #[test]
    fn test_package_defaults() {
        let p = Package::new(1, 4, 2.5);
        assert_eq!(p.status(), PackageStatus::AtHub);
        assert_eq!(p.constraint(), Constraint::None);
        assert_eq!(p.deadline(), Deadline::EndOfDay);
        assert_eq!(p.weight_kg(), 2.5);
        assert!(p.load_time().is_none());
        assert!(p.delivery_time().is_none());
        assert!(!p.is_on_time());
    }

    #[test]
    fn test_deadline_time() {
        assert_eq!(Deadline::EndOfDay.time(), None);
        assert_eq!(
            Deadline::By(time(9, 0, 0, 0)).time(),
            Some(time(9, 0, 0, 0))
        );
    }

    #[test]
    fn test_is_on_time() {
        let mut p = Package::new(1, 4, 2.5).with_deadline(Deadline::By(time(10, 30, 0, 0)));
        p.set_delivery_time(time(10, 0, 0, 0));
        assert!(p.is_on_time());
        p.set_delivery_time(time(11, 0, 0, 0));
        assert!(!p.is_on_time());
    }

    #[test]
    fn test_package_deserialize_defaults() {
        let p: Package =
            serde_json::from_str(r#"{"id": 3, "address_id": 5, "weight_kg": 2.0}"#)
                .expect("valid package json");
        assert_eq!(p.id(), 3);
        assert_eq!(p.status(), PackageStatus::AtHub);
        assert_eq!(p.constraint(), Constraint::None);
    }
}
