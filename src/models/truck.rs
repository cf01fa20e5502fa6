//! Delivery truck type with manifest, odometer, and trip history.

use std::collections::BTreeSet;

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

use super::address::HUB_ADDRESS_ID;
use super::route::Leg;

/// Operating state of a truck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TruckStatus {
    /// Parked at the hub, can be loaded.
    #[default]
    AtHub,
    /// Out delivering.
    EnRoute,
    /// Driving back to the hub after its last stop.
    Returning,
    /// Out of service.
    NotAvailable,
}

/// A truck that carries packages from the hub.
///
/// The manifest holds package ids only; package state lives in the
/// [`PackageRegistry`](crate::registry::PackageRegistry).
///
/// # Examples
///
/// ```
/// use u_delivery::models::{Truck, TruckStatus};
///
/// let t = Truck::new(1, 16);
/// assert_eq!(t.id(), 1);
/// assert_eq!(t.capacity(), 16);
/// assert_eq!(t.status(), TruckStatus::AtHub);
/// assert_eq!(t.current_address_id(), 0);
/// assert!(t.manifest().is_empty());
/// assert_eq!(t.odometer(), 0.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Truck {
    id: usize,
    status: TruckStatus,
    capacity: usize,
    manifest: Vec<usize>,
    current_address_id: usize,
    odometer: f64,
    departure_time: Option<Time>,
    return_time: Option<Time>,
    visited_addresses: Vec<usize>,
    remaining_addresses: BTreeSet<usize>,
    legs: Vec<Leg>,
    delivered: Vec<usize>,
    trips: Vec<(Time, Time)>,
}

impl Truck {
    /// Creates an empty truck parked at the hub.
    pub fn new(id: usize, capacity: usize) -> Self {
        Self {
            id,
            status: TruckStatus::AtHub,
            capacity,
            manifest: Vec::new(),
            current_address_id: HUB_ADDRESS_ID,
            odometer: 0.0,
            departure_time: None,
            return_time: None,
            visited_addresses: vec![HUB_ADDRESS_ID],
            remaining_addresses: BTreeSet::new(),
            legs: Vec::new(),
            delivered: Vec::new(),
            trips: Vec::new(),
        }
    }

    /// Sets the initial status.
    pub fn with_status(mut self, status: TruckStatus) -> Self {
        self.status = status;
        self
    }

    /// Truck ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Current status.
    pub fn status(&self) -> TruckStatus {
        self.status
    }

    /// Maximum number of packages on board.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Package IDs loaded for the current (or last) trip, in load order.
    pub fn manifest(&self) -> &[usize] {
        &self.manifest
    }

    /// Returns `true` if the manifest holds the package.
    pub fn carries(&self, package_id: usize) -> bool {
        self.manifest.contains(&package_id)
    }

    /// Returns `true` if no more packages fit.
    pub fn is_full(&self) -> bool {
        self.manifest.len() >= self.capacity
    }

    /// Address the truck is at (or last left).
    pub fn current_address_id(&self) -> usize {
        self.current_address_id
    }

    /// Total distance driven across all trips.
    pub fn odometer(&self) -> f64 {
        self.odometer
    }

    /// Departure time of the current (or last) trip.
    pub fn departure_time(&self) -> Option<Time> {
        self.departure_time
    }

    /// Return time of the last completed trip.
    pub fn return_time(&self) -> Option<Time> {
        self.return_time
    }

    /// Addresses visited on the current (or last) trip, starting with the hub.
    pub fn visited_addresses(&self) -> &[usize] {
        &self.visited_addresses
    }

    /// Addresses still to visit on the current trip.
    pub fn remaining_addresses(&self) -> &BTreeSet<usize> {
        &self.remaining_addresses
    }

    /// Every leg driven, in order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Packages delivered by this truck, in delivery order.
    pub fn delivered(&self) -> &[usize] {
        &self.delivered
    }

    /// Number of completed trips.
    pub fn num_trips(&self) -> usize {
        self.trips.len()
    }

    /// Time on the truck's clock: the end of its last leg, or its departure
    /// if it has not driven since. `None` before the first departure.
    pub fn clock(&self) -> Option<Time> {
        self.legs
            .last()
            .map(|leg| leg.arrived_at)
            .max(self.departure_time)
    }

    /// Distance driven on legs completed by `time`.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::civil::time;
    /// use u_delivery::models::Truck;
    ///
    /// let t = Truck::new(1, 16);
    /// assert_eq!(t.mileage_at(time(12, 0, 0, 0)), 0.0);
    /// ```
    pub fn mileage_at(&self, time: Time) -> f64 {
        self.legs
            .iter()
            .filter(|leg| leg.is_completed_by(time))
            .map(|leg| leg.distance)
            .sum()
    }

    /// Status the truck had at `time`, derived from its trip history.
    pub fn status_at(&self, time: Time) -> TruckStatus {
        if self.status == TruckStatus::NotAvailable {
            return TruckStatus::NotAvailable;
        }
        let open_trip = match (self.status, self.departure_time) {
            (TruckStatus::EnRoute | TruckStatus::Returning, Some(dep)) => Some((dep, Time::MAX)),
            _ => None,
        };
        let on_trip = self
            .trips
            .iter()
            .copied()
            .chain(open_trip)
            .any(|(dep, ret)| dep <= time && time < ret);
        if !on_trip {
            return TruckStatus::AtHub;
        }
        let returning = self
            .legs
            .iter()
            .any(|leg| leg.to == HUB_ADDRESS_ID && leg.is_active_at(time));
        if returning {
            TruckStatus::Returning
        } else {
            TruckStatus::EnRoute
        }
    }

    /// Clears the per-trip state before loading a new trip.
    pub(crate) fn begin_trip(&mut self) {
        self.manifest.clear();
        self.visited_addresses.clear();
        self.visited_addresses.push(HUB_ADDRESS_ID);
        self.remaining_addresses.clear();
    }

    /// Adds a package to the manifest and its address to the pending stops.
    ///
    /// Returns `false` without changes if the truck is full or already
    /// carries the package.
    pub(crate) fn load(&mut self, package_id: usize, address_id: usize) -> bool {
        if self.is_full() || self.carries(package_id) {
            return false;
        }
        self.manifest.push(package_id);
        self.remaining_addresses.insert(address_id);
        true
    }

    pub(crate) fn depart(&mut self, at: Time) {
        self.status = TruckStatus::EnRoute;
        self.departure_time = Some(at);
    }

    pub(crate) fn start_return(&mut self) {
        self.status = TruckStatus::Returning;
    }

    /// Records a drive to `to` and moves the truck there.
    pub(crate) fn drive(&mut self, to: usize, distance: f64, departed_at: Time, arrived_at: Time) {
        self.legs.push(Leg {
            from: self.current_address_id,
            to,
            distance,
            departed_at,
            arrived_at,
        });
        self.odometer += distance;
        self.current_address_id = to;
    }

    /// Moves a pending stop to the visited list.
    pub(crate) fn mark_visited(&mut self, address_id: usize) {
        self.visited_addresses.push(address_id);
        self.remaining_addresses.remove(&address_id);
    }

    pub(crate) fn record_delivery(&mut self, package_id: usize) {
        self.delivered.push(package_id);
    }

    /// Parks the truck at the hub and closes the current trip.
    pub(crate) fn arrive_at_hub(&mut self, at: Time) {
        self.status = TruckStatus::AtHub;
        self.current_address_id = HUB_ADDRESS_ID;
        self.return_time = Some(at);
        if let Some(dep) = self.departure_time {
            self.trips.push((dep, at));
        }
    }
}
