//! Delivery address type.

use serde::{Deserialize, Serialize};

/// Address id of the hub. Every truck starts and ends its trips here.
pub const HUB_ADDRESS_ID: usize = 0;

/// A delivery location.
///
/// The id doubles as the row/column index in the
/// [`DistanceMatrix`](crate::distance::DistanceMatrix). Address 0 is the hub.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Address;
///
/// let hub = Address::new(0, "Western Governors University", "4001 South 700 East");
/// assert!(hub.is_hub());
///
/// let stop = Address::new(3, "Council Hall", "300 State St");
/// assert_eq!(stop.id(), 3);
/// assert_eq!(stop.street(), "300 State St");
/// assert!(!stop.is_hub());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    id: usize,
    name: String,
    street: String,
}

impl Address {
    /// Creates a new address.
    pub fn new(id: usize, name: impl Into<String>, street: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            street: street.into(),
        }
    }

    /// Address ID (0 = hub).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Location name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Street line.
    pub fn street(&self) -> &str {
        &self.street
    }

    /// Returns `true` if this is the hub.
    pub fn is_hub(&self) -> bool {
        self.id == HUB_ADDRESS_ID
    }
}
