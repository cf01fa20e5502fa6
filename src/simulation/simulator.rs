//! The load, depart, deliver, return cycle.
//!
//! Trips run one after another in plan order. Each trip loads at the hub,
//! drives nearest-neighbor over the addresses on its manifest, and returns
//! to the hub. The package registry is the only state shared between trips.

use std::collections::BTreeMap;

use jiff::civil::Time;
use tracing::{debug, info, warn};

use super::config::SimulationConfig;
use super::outcome::SimulationOutcome;
use super::plan::{AddressCorrection, TruckPlan};
use crate::distance::Geography;
use crate::error::{DataIntegrityError, SimulationError};
use crate::models::{PackageStatus, Truck, HUB_ADDRESS_ID};
use crate::policy::{ConstraintKind, ConstraintViolation, LoadingPolicy, StandardPolicy};
use crate::registry::PackageRegistry;
use crate::routing::next_stop;

/// Runs delivery trips over a fixed map.
///
/// # Examples
///
/// ```
/// use u_delivery::distance::{DistanceMatrix, Geography};
/// use u_delivery::models::{Address, Package};
/// use u_delivery::registry::PackageRegistry;
/// use u_delivery::simulation::{DeliverySimulator, SimulationConfig, TruckPlan};
///
/// let addresses = vec![
///     Address::new(0, "Hub", "1 Depot Way"),
///     Address::new(1, "Library", "10 Main St"),
///     Address::new(2, "School", "20 Oak Ave"),
/// ];
/// let matrix = DistanceMatrix::from_rows(vec![
///     vec![0.0, 3.0, 5.0],
///     vec![3.0, 0.0, 2.0],
///     vec![5.0, 2.0, 0.0],
/// ])
/// .unwrap();
/// let geography = Geography::new(addresses, matrix).unwrap();
///
/// let mut registry = PackageRegistry::from_packages([
///     Package::new(1, 1, 2.0),
///     Package::new(2, 2, 4.5),
/// ])
/// .unwrap();
///
/// let outcome = DeliverySimulator::new(&geography, SimulationConfig::default())
///     .with_plan(TruckPlan::new(1))
///     .run(&mut registry)
///     .unwrap();
///
/// assert_eq!(outcome.truck(1).unwrap().visited_addresses(), &[0, 1, 2]);
/// assert!((outcome.total_mileage() - 10.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct DeliverySimulator<'a, P = StandardPolicy> {
    geography: &'a Geography,
    config: SimulationConfig,
    policy: P,
    trucks: Vec<Truck>,
    plans: Vec<TruckPlan>,
    corrections: Vec<AddressCorrection>,
}

impl<'a> DeliverySimulator<'a> {
    /// Creates a simulator with the standard loading rules and no plans.
    pub fn new(geography: &'a Geography, config: SimulationConfig) -> Self {
        Self {
            geography,
            config,
            policy: StandardPolicy,
            trucks: Vec::new(),
            plans: Vec::new(),
            corrections: Vec::new(),
        }
    }
}

impl<'a, P: LoadingPolicy> DeliverySimulator<'a, P> {
    /// Replaces the loading rules.
    pub fn with_policy<Q: LoadingPolicy>(self, policy: Q) -> DeliverySimulator<'a, Q> {
        DeliverySimulator {
            geography: self.geography,
            config: self.config,
            policy,
            trucks: self.trucks,
            plans: self.plans,
            corrections: self.corrections,
        }
    }

    /// Registers a truck up front, e.g. one with its own capacity or one
    /// that is out of service. Trucks first named by a plan are created
    /// with the configured capacity.
    pub fn with_truck(mut self, truck: Truck) -> Self {
        self.trucks.retain(|t| t.id() != truck.id());
        self.trucks.push(truck);
        self
    }

    /// Appends a trip.
    pub fn with_plan(mut self, plan: TruckPlan) -> Self {
        self.plans.push(plan);
        self
    }

    /// Appends several trips.
    pub fn with_plans(mut self, plans: impl IntoIterator<Item = TruckPlan>) -> Self {
        self.plans.extend(plans);
        self
    }

    /// Schedules an address correction.
    pub fn with_correction(mut self, correction: AddressCorrection) -> Self {
        self.corrections.push(correction);
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn geography(&self) -> &Geography {
        self.geography
    }

    pub fn plans(&self) -> &[TruckPlan] {
        &self.plans
    }

    /// Runs every plan to completion.
    ///
    /// All inputs are checked before any package changes. Rejected loads
    /// are collected in the outcome; any error aborts the run and leaves
    /// the registry as it was when the error happened.
    pub fn run(&self, registry: &mut PackageRegistry) -> Result<SimulationOutcome, SimulationError> {
        self.config.validate()?;
        self.check_inputs(registry)?;

        let mut trucks: BTreeMap<usize, Truck> =
            self.trucks.iter().map(|t| (t.id(), t.clone())).collect();
        let mut drivers = self.config.drivers().map(|n| vec![Time::MIN; n]);
        let mut rejections = Vec::new();
        let mut applied = Vec::new();

        let mut corrections: Vec<&AddressCorrection> = self.corrections.iter().collect();
        corrections.sort_by_key(|c| c.effective_at);
        let mut corrections = corrections.into_iter().peekable();

        for plan in &self.plans {
            let capacity = self.config.truck_capacity();
            let truck = trucks
                .entry(plan.truck_id())
                .or_insert_with(|| Truck::new(plan.truck_id(), capacity));

            let mut now = plan.departure().unwrap_or(self.config.start_of_day());
            if let Some(back) = truck.return_time() {
                now = now.max(back);
            }
            let driver = drivers.as_deref().and_then(earliest_free);
            if let Some((_, free_at)) = driver {
                now = now.max(free_at);
            }

            while let Some(correction) = corrections.next_if(|c| c.effective_at <= now) {
                registry.correct_address(
                    correction.package_id,
                    correction.address_id,
                    correction.effective_at,
                )?;
                info!(
                    package_id = correction.package_id,
                    address_id = correction.address_id,
                    at = %correction.effective_at,
                    "address corrected"
                );
                applied.push(*correction);
            }

            truck.begin_trip();
            let candidates = offered_packages(plan, truck.id(), registry);
            rejections.extend(self.load(truck, registry, &candidates, now)?);
            if truck.manifest().is_empty() {
                warn!(truck_id = truck.id(), at = %now, "nothing loaded, truck stays at the hub");
                continue;
            }

            self.depart(truck, registry, now)?;
            self.deliver_all(truck, registry)?;
            let back = self.return_to_hub(truck)?;

            if let (Some(free), Some((slot, _))) = (drivers.as_mut(), driver) {
                free[slot] = back;
            }
        }

        Ok(SimulationOutcome::new(trucks, rejections, applied))
    }

    /// Offers `candidates` to a parked truck in order.
    ///
    /// Every eligible package is loaded and moved to `AtHub`; the rest are
    /// returned as rejections. Packages already on the manifest are skipped.
    /// A package held by another truck is rejected whatever the policy says.
    /// Fails with [`DataIntegrityError::UnknownAddress`] before loading a
    /// package whose address is not on the map.
    pub fn load(
        &self,
        truck: &mut Truck,
        registry: &mut PackageRegistry,
        candidates: &[usize],
        now: Time,
    ) -> Result<Vec<ConstraintViolation>, SimulationError> {
        let mut rejections = Vec::new();
        for &id in candidates {
            if truck.carries(id) {
                continue;
            }
            let package = registry
                .get(id)
                .ok_or(DataIntegrityError::UnknownPackage(id))?;
            let held_elsewhere = package
                .assigned_truck_id()
                .is_some_and(|other| other != truck.id());
            let reason = match self.policy.evaluate(package, truck, now).reason() {
                Some(reason) => Some(reason),
                None if held_elsewhere => Some(ConstraintKind::AssignedToOtherTruck),
                None if truck.is_full() => Some(ConstraintKind::CapacityExceeded),
                None => None,
            };
            if let Some(reason) = reason {
                debug!(truck_id = truck.id(), package_id = id, %reason, "load rejected");
                rejections.push(ConstraintViolation {
                    package_id: id,
                    truck_id: truck.id(),
                    reason,
                    at: now,
                });
                continue;
            }

            let address_id = package.address_id();
            if !self.geography.contains(address_id) {
                return Err(DataIntegrityError::UnknownAddress {
                    package_id: id,
                    address_id,
                }
                .into());
            }
            registry.load(id, truck.id(), now)?;
            truck.load(id, address_id);
            debug!(truck_id = truck.id(), package_id = id, address_id, "loaded");
        }
        Ok(rejections)
    }

    /// Sends the truck out and puts its waiting packages en route.
    pub fn depart(
        &self,
        truck: &mut Truck,
        registry: &mut PackageRegistry,
        now: Time,
    ) -> Result<(), SimulationError> {
        truck.depart(now);
        for &id in truck.manifest() {
            let waiting = registry
                .get(id)
                .is_some_and(|p| p.status() == PackageStatus::AtHub);
            if waiting {
                registry.depart(id, now)?;
            }
        }
        info!(
            truck_id = truck.id(),
            at = %now,
            packages = truck.manifest().len(),
            "truck departed"
        );
        Ok(())
    }

    /// Visits every pending address, nearest first, delivering as it goes.
    ///
    /// Fails with [`SimulationError::RoutingInconsistency`] if a manifest
    /// package is still undelivered once no addresses remain.
    pub fn deliver_all(
        &self,
        truck: &mut Truck,
        registry: &mut PackageRegistry,
    ) -> Result<(), SimulationError> {
        let mut clock = truck.clock().unwrap_or(self.config.start_of_day());

        while !truck.remaining_addresses().is_empty() {
            let Some(next) = self.choose_next(truck)? else {
                break;
            };
            let distance = self.geography.distance(truck.current_address_id(), next);
            let arrived = self.advance(truck.id(), clock, distance)?;
            truck.drive(next, distance, clock, arrived);
            truck.mark_visited(next);
            clock = arrived;
            debug!(truck_id = truck.id(), address_id = next, distance, at = %arrived, "stop");

            let here: Vec<usize> = truck
                .manifest()
                .iter()
                .copied()
                .filter(|&id| {
                    registry.get(id).is_some_and(|p| {
                        p.address_id() == next && p.status() == PackageStatus::EnRoute
                    })
                })
                .collect();
            for id in here {
                registry.deliver(id, arrived)?;
                truck.record_delivery(id);
                debug!(truck_id = truck.id(), package_id = id, at = %arrived, "delivered");
            }
        }

        for &id in truck.manifest() {
            let package = registry
                .get(id)
                .ok_or(DataIntegrityError::UnknownPackage(id))?;
            if package.status() != PackageStatus::Delivered {
                return Err(SimulationError::RoutingInconsistency {
                    truck_id: truck.id(),
                    package_id: id,
                    address_id: package.address_id(),
                });
            }
        }
        Ok(())
    }

    /// Drives back to the hub and parks. Returns the arrival time.
    pub fn return_to_hub(&self, truck: &mut Truck) -> Result<Time, SimulationError> {
        let mut clock = truck.clock().unwrap_or(self.config.start_of_day());
        truck.start_return();
        if truck.current_address_id() != HUB_ADDRESS_ID {
            let distance = self
                .geography
                .distance(truck.current_address_id(), HUB_ADDRESS_ID);
            let arrived = self.advance(truck.id(), clock, distance)?;
            truck.drive(HUB_ADDRESS_ID, distance, clock, arrived);
            clock = arrived;
        }
        truck.arrive_at_hub(clock);
        info!(
            truck_id = truck.id(),
            at = %clock,
            odometer = truck.odometer(),
            "truck returned"
        );
        Ok(clock)
    }

    /// Picks the nearest pending address, or `None` to head home.
    fn choose_next(&self, truck: &Truck) -> Result<Option<usize>, SimulationError> {
        let candidates = truck.remaining_addresses().iter().copied();
        match next_stop(truck.current_address_id(), candidates, self.geography.distances()) {
            Ok(next) => Ok(Some(next)),
            Err(SimulationError::EmptyCandidateSet) if !cfg!(debug_assertions) => {
                warn!(truck_id = truck.id(), "no candidate stops, returning to the hub");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Clock time after driving `distance` from `clock`.
    fn advance(&self, truck_id: usize, clock: Time, distance: f64) -> Result<Time, SimulationError> {
        let overflow = |source| SimulationError::ClockOverflow {
            truck_id,
            last: clock,
            source,
        };
        let travel = self.config.travel_time(distance).map_err(overflow)?;
        clock.checked_add(travel).map_err(overflow)
    }

    fn check_inputs(&self, registry: &PackageRegistry) -> Result<(), DataIntegrityError> {
        registry.validate(self.geography)?;
        for correction in &self.corrections {
            if registry.get(correction.package_id).is_none() {
                return Err(DataIntegrityError::UnknownPackage(correction.package_id));
            }
            if !self.geography.contains(correction.address_id) {
                return Err(DataIntegrityError::UnknownAddress {
                    package_id: correction.package_id,
                    address_id: correction.address_id,
                });
            }
        }
        let planned = self.plans.iter().filter_map(TruckPlan::packages).flatten();
        for &id in planned {
            if registry.get(id).is_none() {
                return Err(DataIntegrityError::UnknownPackage(id));
            }
        }
        Ok(())
    }
}

/// Packages offered to a trip: the explicit list, or everything still
/// waiting for this truck.
fn offered_packages(plan: &TruckPlan, truck_id: usize, registry: &PackageRegistry) -> Vec<usize> {
    match plan.packages() {
        Some(ids) => ids.to_vec(),
        None => registry
            .iter()
            .filter(|p| p.status() <= PackageStatus::AtHub)
            .filter(|p| p.assigned_truck_id().map_or(true, |t| t == truck_id))
            .map(|p| p.id())
            .collect(),
    }
}

/// The driver who is free first, ties to the lowest slot.
fn earliest_free(free_at: &[Time]) -> Option<(usize, Time)> {
    free_at
        .iter()
        .copied()
        .enumerate()
        .min_by_key(|&(slot, at)| (at, slot))
}
