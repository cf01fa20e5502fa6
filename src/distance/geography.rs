//! Address list paired with its distance matrix.

use serde::{Deserialize, Serialize};

use super::DistanceMatrix;
use crate::error::DataIntegrityError;
use crate::models::{Address, HUB_ADDRESS_ID};

/// The immutable map a simulation runs on.
///
/// Addresses are numbered `0..n` in list order, address 0 is the hub, and
/// the distance matrix covers exactly those `n` addresses.
///
/// # Examples
///
/// ```
/// use u_delivery::distance::{DistanceMatrix, Geography};
/// use u_delivery::models::Address;
///
/// let addresses = vec![
///     Address::new(0, "Hub", "1 Depot Rd"),
///     Address::new(1, "Library", "10 Main St"),
/// ];
/// let dm = DistanceMatrix::from_rows(vec![vec![0.0, 2.5], vec![2.5, 0.0]]).unwrap();
/// let geo = Geography::new(addresses, dm).unwrap();
///
/// assert_eq!(geo.len(), 2);
/// assert_eq!(geo.hub().name(), "Hub");
/// assert_eq!(geo.distance(1, 0), 2.5);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geography {
    addresses: Vec<Address>,
    distances: DistanceMatrix,
}

impl Geography {
    /// Pairs addresses with their distances after checking both.
    pub fn new(
        addresses: Vec<Address>,
        distances: DistanceMatrix,
    ) -> Result<Self, DataIntegrityError> {
        if addresses.is_empty() {
            return Err(DataIntegrityError::MissingHub);
        }
        if let Some((position, a)) = addresses
            .iter()
            .enumerate()
            .find(|(position, a)| a.id() != *position)
        {
            return Err(DataIntegrityError::AddressIdMismatch {
                position,
                id: a.id(),
            });
        }
        if distances.size() != addresses.len() {
            return Err(DataIntegrityError::MatrixSizeMismatch {
                addresses: addresses.len(),
                size: distances.size(),
            });
        }
        distances.validate()?;
        Ok(Self {
            addresses,
            distances,
        })
    }

    /// The hub address.
    pub fn hub(&self) -> &Address {
        &self.addresses[HUB_ADDRESS_ID]
    }

    /// Looks up an address by id.
    pub fn address(&self, id: usize) -> Option<&Address> {
        self.addresses.get(id)
    }

    /// Returns `true` if `id` names a known address.
    pub fn contains(&self, id: usize) -> bool {
        id < self.addresses.len()
    }

    /// All addresses in id order.
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    /// Number of addresses, hub included.
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Always `false` for a constructed geography (the hub is required).
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Distance between two addresses.
    ///
    /// # Panics
    ///
    /// Panics if either id is unknown.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// The underlying matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }
}
