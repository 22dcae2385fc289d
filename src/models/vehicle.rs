//! Vehicle type with seat capacity and depot anchoring.

use serde::{Deserialize, Serialize};

/// A vehicle (driven by an employee) that picks up or drops off passengers.
///
/// The vehicle's own home node is `Node::Vehicle(id)`. An *anchor* vehicle
/// starts or ends its route at the depot instead of at its home node.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Vehicle;
///
/// let v = Vehicle::new(7, 4).with_anchor(true);
/// assert_eq!(v.id(), 7);
/// assert_eq!(v.capacity(), 4);
/// assert!(v.is_anchor());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    id: u64,
    capacity: usize,
    #[serde(default)]
    anchor: bool,
}

impl Vehicle {
    /// Creates a non-anchor vehicle with the given ID and seat capacity.
    pub fn new(id: u64, capacity: usize) -> Self {
        Self {
            id,
            capacity,
            anchor: false,
        }
    }

    /// Sets whether the depot leg is charged to the depot.
    pub fn with_anchor(mut self, anchor: bool) -> Self {
        self.anchor = anchor;
        self
    }

    /// Vehicle ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Number of passenger seats.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if the route's depot leg bypasses the vehicle's home node.
    pub fn is_anchor(&self) -> bool {
        self.anchor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_new() {
        let v = Vehicle::new(3, 2);
        assert_eq!(v.id(), 3);
        assert_eq!(v.capacity(), 2);
        assert!(!v.is_anchor());
    }

    #[test]
    fn test_vehicle_anchor_defaults_when_missing() {
        let v: Vehicle = serde_json::from_str(r#"{"id": 1, "capacity": 3}"#).expect("valid");
        assert_eq!(v, Vehicle::new(1, 3));
    }
}
