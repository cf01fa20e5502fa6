//! Package store keyed by id.

use std::collections::BTreeMap;

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

use crate::distance::Geography;
use crate::error::{DataIntegrityError, SimulationError};
use crate::models::{Constraint, Package, PackageStatus};

/// The single owner of package state.
///
/// Every status change goes through [`load`](Self::load),
/// [`depart`](Self::depart), [`deliver`](Self::deliver), or
/// [`correct_address`](Self::correct_address), which reject regressions and
/// keep `assigned_truck_id` fixed once set.
///
/// # Examples
///
/// ```
/// use jiff::civil::time;
/// use u_delivery::models::{Package, PackageStatus};
/// use u_delivery::registry::PackageRegistry;
///
/// let mut registry = PackageRegistry::new();
/// registry.insert(Package::new(1, 3, 2.0)).unwrap();
///
/// registry.load(1, 1, time(8, 0, 0, 0)).unwrap();
/// registry.depart(1, time(8, 0, 0, 0)).unwrap();
/// registry.deliver(1, time(8, 40, 0, 0)).unwrap();
///
/// assert_eq!(registry.status_at(1, time(8, 20, 0, 0)), Some(PackageStatus::EnRoute));
/// assert_eq!(registry.status_at(1, time(9, 0, 0, 0)), Some(PackageStatus::Delivered));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageRegistry {
    packages: BTreeMap<usize, Package>,
}

impl PackageRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a list of packages.
    pub fn from_packages(
        packages: impl IntoIterator<Item = Package>,
    ) -> Result<Self, DataIntegrityError> {
        let mut registry = Self::new();
        for package in packages {
            registry.insert(package)?;
        }
        Ok(registry)
    }

    /// Adds a package.
    ///
    /// Packages registered at the hub are stamped as arriving at the start
    /// of the day, or at their delayed-arrival time.
    pub fn insert(&mut self, mut package: Package) -> Result<(), DataIntegrityError> {
        if self.packages.contains_key(&package.id()) {
            return Err(DataIntegrityError::DuplicatePackage(package.id()));
        }
        if package.hub_arrival().is_none() && package.status() >= PackageStatus::AtHub {
            let arrival = match package.constraint() {
                Constraint::DelayedArrival(at) => at,
                _ => Time::MIN,
            };
            package.set_hub_arrival(arrival);
        }
        self.packages.insert(package.id(), package);
        Ok(())
    }

    /// Looks up a package.
    pub fn get(&self, id: usize) -> Option<&Package> {
        self.packages.get(&id)
    }

    /// Iterates packages in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    /// Package ids in ascending order.
    pub fn ids(&self) -> Vec<usize> {
        self.packages.keys().copied().collect()
    }

    /// Number of packages.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Returns `true` if no packages are registered.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Checks every package address against the map.
    pub fn validate(&self, geography: &Geography) -> Result<(), DataIntegrityError> {
        match self.iter().find(|p| !geography.contains(p.address_id())) {
            Some(p) => Err(DataIntegrityError::UnknownAddress {
                package_id: p.id(),
                address_id: p.address_id(),
            }),
            None => Ok(()),
        }
    }

    /// Puts a package on a truck parked at the hub.
    ///
    /// A `NotAvailable` package arrives at the hub at `at`. The truck
    /// assignment is fixed by the first load.
    pub fn load(&mut self, id: usize, truck_id: usize, at: Time) -> Result<(), SimulationError> {
        let package = self.get_mut(id)?;
        let from = package.status();
        if from > PackageStatus::AtHub {
            return Err(SimulationError::InvalidTransition {
                package_id: id,
                from,
                to: PackageStatus::AtHub,
            });
        }
        match package.assigned_truck_id() {
            Some(assigned) if assigned != truck_id => {
                return Err(SimulationError::ReassignedPackage {
                    package_id: id,
                    assigned,
                    requested: truck_id,
                });
            }
            Some(_) => {}
            None => package.set_assigned_truck(truck_id),
        }
        if from == PackageStatus::NotAvailable || package.hub_arrival().is_none() {
            package.set_hub_arrival(at);
        }
        package.set_status(PackageStatus::AtHub);
        package.set_load_time(at);
        Ok(())
    }

    /// Marks a loaded package as leaving the hub.
    pub fn depart(&mut self, id: usize, at: Time) -> Result<(), SimulationError> {
        let package = self.get_mut(id)?;
        if package.status() != PackageStatus::AtHub || package.assigned_truck_id().is_none() {
            return Err(SimulationError::InvalidTransition {
                package_id: id,
                from: package.status(),
                to: PackageStatus::EnRoute,
            });
        }
        package.set_status(PackageStatus::EnRoute);
        package.set_departure_time(at);
        Ok(())
    }

    /// Marks a package as delivered.
    pub fn deliver(&mut self, id: usize, at: Time) -> Result<(), SimulationError> {
        let package = self.get_mut(id)?;
        if package.status() != PackageStatus::EnRoute {
            return Err(SimulationError::InvalidTransition {
                package_id: id,
                from: package.status(),
                to: PackageStatus::Delivered,
            });
        }
        package.set_status(PackageStatus::Delivered);
        package.set_delivery_time(at);
        Ok(())
    }

    /// Replaces a package's address and lifts its `WrongAddress` hold.
    ///
    /// `at` is when the new address becomes known; loading checks made
    /// before it still see a wrong address. The package is reset to
    /// `AtHub`; this is the only status reset the registry allows.
    /// Packages already on the road cannot be corrected.
    pub fn correct_address(
        &mut self,
        id: usize,
        address_id: usize,
        at: Time,
    ) -> Result<(), SimulationError> {
        let package = self.get_mut(id)?;
        let status = package.status();
        if status >= PackageStatus::EnRoute {
            return Err(SimulationError::CorrectionAfterDeparture {
                package_id: id,
                status,
            });
        }
        package.set_address(address_id, at);
        if package.constraint() == Constraint::WrongAddress {
            package.set_constraint(Constraint::None);
        }
        if package.hub_arrival().is_none() {
            package.set_hub_arrival(at);
        }
        package.set_status(PackageStatus::AtHub);
        Ok(())
    }

    /// Status a package had at `time`, derived from its timestamps.
    ///
    /// Returns `None` for an unknown id.
    pub fn status_at(&self, id: usize, time: Time) -> Option<PackageStatus> {
        let package = self.get(id)?;
        let reached = |stamp: Option<Time>| stamp.is_some_and(|t| t <= time);
        let status = if reached(package.delivery_time()) {
            PackageStatus::Delivered
        } else if reached(package.departure_time()) {
            PackageStatus::EnRoute
        } else if reached(package.hub_arrival()) {
            PackageStatus::AtHub
        } else {
            PackageStatus::NotAvailable
        };
        Some(status)
    }

    fn get_mut(&mut self, id: usize) -> Result<&mut Package, DataIntegrityError> {
        self.packages
            .get_mut(&id)
            .ok_or(DataIntegrityError::UnknownPackage(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::Address;
    use jiff::civil::time;

    fn registry() -> PackageRegistry {
        PackageRegistry::from_packages(vec![
            Package::new(1, 1, 2.0),
            Package::new(2, 2, 3.0)
                .with_constraint(Constraint::DelayedArrival(time(9, 5, 0, 0)))
                .with_status(PackageStatus::NotAvailable),
            Package::new(3, 2, 1.0).with_constraint(Constraint::WrongAddress),
        ])
        .expect("valid")
    }

    #[test]
    fn test_insert_duplicate() {
        let mut r = registry();
        let err = r.insert(Package::new(1, 2, 1.0)).unwrap_err();
        assert_eq!(err, DataIntegrityError::DuplicatePackage(1));
        assert_eq!(r.len(), 3);
        assert_eq!(r.ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_insert_stamps_hub_arrival() {
        let r = registry();
        assert_eq!(r.get(1).and_then(|p| p.hub_arrival()), Some(Time::MIN));
        assert_eq!(r.get(2).and_then(|p| p.hub_arrival()), None);
    }

    #[test]
    fn test_lifecycle() {
        let mut r = registry();
        r.load(1, 1, time(8, 0, 0, 0)).expect("load");
        assert_eq!(r.get(1).map(|p| p.status()), Some(PackageStatus::AtHub));
        assert_eq!(r.get(1).and_then(|p| p.assigned_truck_id()), Some(1));

        r.depart(1, time(8, 5, 0, 0)).expect("depart");
        r.deliver(1, time(8, 30, 0, 0)).expect("deliver");

        let p = r.get(1).expect("exists");
        assert_eq!(p.status(), PackageStatus::Delivered);
        assert_eq!(p.load_time(), Some(time(8, 0, 0, 0)));
        assert_eq!(p.departure_time(), Some(time(8, 5, 0, 0)));
        assert_eq!(p.delivery_time(), Some(time(8, 30, 0, 0)));
    }

    #[test]
    fn test_load_first_hub_arrival() {
        let mut r = registry();
        r.load(2, 2, time(9, 10, 0, 0)).expect("load");
        let p = r.get(2).expect("exists");
        assert_eq!(p.status(), PackageStatus::AtHub);
        assert_eq!(p.hub_arrival(), Some(time(9, 10, 0, 0)));
    }

    #[test]
    fn test_assignment_is_fixed() {
        let mut r = registry();
        r.load(1, 1, time(8, 0, 0, 0)).expect("load");
        let err = r.load(1, 2, time(8, 1, 0, 0)).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::ReassignedPackage {
                package_id: 1,
                assigned: 1,
                requested: 2
            }
        ));
        assert_eq!(r.get(1).and_then(|p| p.assigned_truck_id()), Some(1));
    }

    #[test]
    fn test_no_regression() {
        let mut r = registry();
        r.load(1, 1, time(8, 0, 0, 0)).expect("load");
        r.depart(1, time(8, 0, 0, 0)).expect("depart");
        assert!(matches!(
            r.load(1, 1, time(8, 1, 0, 0)),
            Err(SimulationError::InvalidTransition { .. })
        ));
        assert!(matches!(
            r.depart(1, time(8, 1, 0, 0)),
            Err(SimulationError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_depart_requires_load() {
        let mut r = registry();
        assert!(matches!(
            r.depart(1, time(8, 0, 0, 0)),
            Err(SimulationError::InvalidTransition { .. })
        ));
        assert!(matches!(
            r.deliver(1, time(8, 0, 0, 0)),
            Err(SimulationError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_unknown_package() {
        let mut r = registry();
        assert!(matches!(
            r.load(99, 1, time(8, 0, 0, 0)),
            Err(SimulationError::DataIntegrity(
                DataIntegrityError::UnknownPackage(99)
            ))
        ));
        assert_eq!(r.status_at(99, time(8, 0, 0, 0)), None);
    }

    #[test]
    fn test_correct_address() {
        let mut r = registry();
        r.correct_address(3, 1, time(10, 20, 0, 0)).expect("correct");
        let p = r.get(3).expect("exists");
        assert_eq!(p.address_id(), 1);
        assert_eq!(p.constraint(), Constraint::None);
        assert_eq!(p.status(), PackageStatus::AtHub);
        assert_eq!(p.address_corrected_at(), Some(time(10, 20, 0, 0)));
    }

    #[test]
    fn test_correct_address_after_departure() {
        let mut r = registry();
        r.load(1, 1, time(8, 0, 0, 0)).expect("load");
        r.depart(1, time(8, 0, 0, 0)).expect("depart");
        let err = r.correct_address(1, 2, time(9, 0, 0, 0)).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::CorrectionAfterDeparture {
                package_id: 1,
                status: PackageStatus::EnRoute
            }
        ));
    }

    #[test]
    fn test_status_at() {
        let mut r = registry();
        r.load(2, 1, time(9, 10, 0, 0)).expect("load");
        r.depart(2, time(9, 15, 0, 0)).expect("depart");
        r.deliver(2, time(9, 45, 0, 0)).expect("deliver");

        let at = |h, m| r.status_at(2, time(h, m, 0, 0));
        assert_eq!(at(8, 0), Some(PackageStatus::NotAvailable));
        assert_eq!(at(9, 10), Some(PackageStatus::AtHub));
        assert_eq!(at(9, 30), Some(PackageStatus::EnRoute));
        assert_eq!(at(10, 0), Some(PackageStatus::Delivered));
        assert_eq!(r.status_at(1, time(8, 0, 0, 0)), Some(PackageStatus::AtHub));
    }

    #[test]
    fn test_validate_unknown_address() {
        let addresses = (0..2)
            .map(|i| Address::new(i, "Stop", "Street"))
            .collect::<Vec<_>>();
        let geo = Geography::new(addresses, DistanceMatrix::new(2)).expect("valid");
        let err = registry().validate(&geo).unwrap_err();
        assert_eq!(
            err,
            DataIntegrityError::UnknownAddress {
                package_id: 2,
                address_id: 2
            }
        );
    }
}
