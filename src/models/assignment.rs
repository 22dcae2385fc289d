//! Pinned seat assignments and per-vehicle dispatch results.

use serde::{Deserialize, Serialize};

/// A caller-mandated seat: `passenger_id` must ride in `vehicle_id` at the
/// 1-based position `sequence` of that vehicle's route.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::FixedAssignment;
///
/// let pin = FixedAssignment::new(1, 20, 1);
/// assert_eq!(pin.slot(), Some(0));
/// assert_eq!(FixedAssignment::new(1, 20, 0).slot(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedAssignment {
    pub vehicle_id: u64,
    pub passenger_id: u64,
    pub sequence: usize,
}

impl FixedAssignment {
    /// Creates a pin.
    pub fn new(vehicle_id: u64, passenger_id: u64, sequence: usize) -> Self {
        Self {
            vehicle_id,
            passenger_id,
            sequence,
        }
    }

    /// Zero-based slot index, or `None` for the invalid sequence 0.
    pub fn slot(&self) -> Option<usize> {
        self.sequence.checked_sub(1)
    }
}

/// The route of one vehicle in a finished dispatch, expressed in caller IDs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleAssignment {
    /// Vehicle ID.
    pub vehicle_id: u64,
    /// Passenger IDs in visit order.
    pub passenger_ids: Vec<u64>,
    /// Route cost (meters or seconds) from the last fitness evaluation.
    pub route_cost: u64,
}
