//! Deadline evaluator for a finished run.

use jiff::civil::Time;

use crate::models::{Deadline, Package};
use crate::registry::PackageRegistry;

/// Type of a service violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationType {
    /// Delivered after its deadline.
    DeadlineMissed {
        /// Package ID.
        package_id: usize,
        /// Promised time.
        deadline: Time,
        /// Actual delivery time.
        delivered_at: Time,
    },
    /// Never delivered.
    Undelivered {
        /// Package ID.
        package_id: usize,
    },
}

/// A service violation in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }

    /// Package the violation is about.
    pub fn package_id(&self) -> usize {
        match self.kind {
            ViolationType::DeadlineMissed { package_id, .. }
            | ViolationType::Undelivered { package_id } => package_id,
        }
    }
}

/// Checks delivered packages against their deadlines.
///
/// # Examples
///
/// ```
/// use jiff::civil::time;
/// use u_delivery::evaluation::DeadlineEvaluator;
/// use u_delivery::models::{Deadline, Package};
/// use u_delivery::registry::PackageRegistry;
///
/// let registry = PackageRegistry::from_packages([
///     Package::new(1, 1, 2.0).with_deadline(Deadline::By(time(10, 30, 0, 0))),
///     Package::new(2, 2, 2.0),
/// ])
/// .unwrap();
///
/// let evaluator = DeadlineEvaluator::new(&registry);
/// let violations = evaluator.evaluate();
/// assert_eq!(violations.len(), 2); // nothing delivered yet
/// assert_eq!(evaluator.on_time_count(), 0);
/// ```
pub struct DeadlineEvaluator<'a> {
    registry: &'a PackageRegistry,
}

impl<'a> DeadlineEvaluator<'a> {
    pub fn new(registry: &'a PackageRegistry) -> Self {
        Self { registry }
    }

    /// Checks one package.
    pub fn check(&self, package: &Package) -> Option<Violation> {
        let Some(delivered_at) = package.delivery_time() else {
            return Some(Violation::new(ViolationType::Undelivered {
                package_id: package.id(),
            }));
        };
        match package.deadline() {
            Deadline::By(deadline) if delivered_at > deadline => {
                Some(Violation::new(ViolationType::DeadlineMissed {
                    package_id: package.id(),
                    deadline,
                    delivered_at,
                }))
            }
            _ => None,
        }
    }

    /// All violations, in package id order.
    pub fn evaluate(&self) -> Vec<Violation> {
        self.registry.iter().filter_map(|p| self.check(p)).collect()
    }

    /// Number of packages delivered on time.
    pub fn on_time_count(&self) -> usize {
        self.registry.iter().filter(|p| p.is_on_time()).count()
    }

    /// Latest delivery time across all packages.
    pub fn last_delivery(&self) -> Option<Time> {
        self.registry.iter().filter_map(Package::delivery_time).max()
    }
}
