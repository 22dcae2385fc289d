//! Pinned seats.

use std::collections::HashMap;

use crate::error::ValidationError;
use crate::models::{FixedAssignment, Passenger, Vehicle};

/// Per-vehicle slot arrays of pinned passengers, in index space.
///
/// Only vehicles with at least one pin carry a slot array; its length equals
/// the vehicle's capacity and unpinned slots are `None`.
///
/// # Examples
///
/// ```
/// use u_dispatch::constraints::PinTable;
/// use u_dispatch::models::{FixedAssignment, Passenger, Vehicle};
///
/// let vehicles = vec![Vehicle::new(1, 3), Vehicle::new(2, 3)];
/// let passengers = vec![Passenger::new(10), Passenger::new(11)];
/// let pins = vec![FixedAssignment::new(2, 11, 2)];
///
/// let table = PinTable::build(&pins, &vehicles, &passengers).unwrap();
/// assert_eq!(table.pinned(1, 1), Some(1));
/// assert_eq!(table.pinned(1, 0), None);
/// assert_eq!(table.required_len(1), 2);
/// assert_eq!(table.required_len(0), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PinTable {
    slots: Vec<Option<Vec<Option<usize>>>>,
    seat_of: Vec<Option<(usize, usize)>>,
}

impl PinTable {
    /// Resolves caller pins into vehicle/passenger indices.
    ///
    /// Identical duplicate pins are accepted once. A slot pinned to two
    /// passengers, or a passenger pinned to two seats, is rejected.
    pub fn build(
        pins: &[FixedAssignment],
        vehicles: &[Vehicle],
        passengers: &[Passenger],
    ) -> Result<Self, ValidationError> {
        let vehicle_index: HashMap<u64, usize> =
            vehicles.iter().enumerate().map(|(i, v)| (v.id(), i)).collect();
        let passenger_index: HashMap<u64, usize> =
            passengers.iter().enumerate().map(|(i, p)| (p.id(), i)).collect();

        let mut slots: Vec<Option<Vec<Option<usize>>>> = vec![None; vehicles.len()];
        let mut seat_of = vec![None; passengers.len()];

        for pin in pins {
            let v = *vehicle_index
                .get(&pin.vehicle_id)
                .ok_or(ValidationError::UnknownVehicle {
                    vehicle_id: pin.vehicle_id,
                })?;
            let p = *passenger_index
                .get(&pin.passenger_id)
                .ok_or(ValidationError::UnknownPassenger {
                    passenger_id: pin.passenger_id,
                })?;
            let capacity = vehicles[v].capacity();
            let slot = pin
                .slot()
                .filter(|&s| s < capacity)
                .ok_or(ValidationError::SequenceOutOfRange {
                    vehicle_id: pin.vehicle_id,
                    sequence: pin.sequence,
                    capacity,
                })?;

            let conflict = ValidationError::ConflictingPin {
                vehicle_id: pin.vehicle_id,
                passenger_id: pin.passenger_id,
            };
            match seat_of[p] {
                Some(seat) if seat != (v, slot) => return Err(conflict),
                _ => {}
            }
            let row = slots[v].get_or_insert_with(|| vec![None; capacity]);
            match row[slot] {
                Some(existing) if existing != p => return Err(conflict),
                _ => {}
            }
            row[slot] = Some(p);
            seat_of[p] = Some((v, slot));
        }

        Ok(Self { slots, seat_of })
    }

    /// Returns the passenger pinned at `slot` of vehicle `vehicle`, if any.
    pub fn pinned(&self, vehicle: usize, slot: usize) -> Option<usize> {
        self.slots
            .get(vehicle)?
            .as_ref()?
            .get(slot)
            .copied()
            .flatten()
    }

    /// Minimum route length of `vehicle` that covers all of its pins.
    pub fn required_len(&self, vehicle: usize) -> usize {
        self.slots
            .get(vehicle)
            .and_then(|row| row.as_ref())
            .and_then(|row| row.iter().rposition(Option::is_some))
            .map_or(0, |last| last + 1)
    }

    /// Number of pinned slots on `vehicle`.
    pub fn pinned_count(&self, vehicle: usize) -> usize {
        self.slots
            .get(vehicle)
            .and_then(|row| row.as_ref())
            .map_or(0, |row| row.iter().filter(|s| s.is_some()).count())
    }

    /// The `(vehicle, slot)` a passenger is pinned to, if any.
    pub fn seat_of(&self, passenger: usize) -> Option<(usize, usize)> {
        self.seat_of.get(passenger).copied().flatten()
    }

    /// Returns `true` if no vehicle has a pin.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Returns `true` if any pinned slot holds a different passenger (or is
    /// missing because the route is too short). Unpinned slots are ignored.
    pub fn violated(&self, genes: &[Vec<usize>]) -> bool {
        self.slots.iter().zip(genes).any(|(row, route)| {
            row.as_ref().is_some_and(|row| {
                row.iter()
                    .enumerate()
                    .any(|(slot, pin)| pin.is_some_and(|p| route.get(slot) != Some(&p)))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet() -> (Vec<Vehicle>, Vec<Passenger>) {
        (
            vec![Vehicle::new(1, 2), Vehicle::new(2, 3)],
            vec![Passenger::new(10), Passenger::new(11), Passenger::new(12)],
        )
    }

    #[test]
    fn test_empty_table() {
        let (v, p) = fleet();
        let t = PinTable::build(&[], &v, &p).expect("valid");
        assert!(t.is_empty());
        assert_eq!(t.pinned(0, 0), None);
        assert!(!t.violated(&[vec![0, 1], vec![2]]));
    }

    #[test]
    fn test_violation_detection() {
        let (v, p) = fleet();
        let pins = [FixedAssignment::new(1, 10, 1)];
        let t = PinTable::build(&pins, &v, &p).expect("valid");
        assert!(!t.violated(&[vec![0, 1], vec![2]]));
        assert!(t.violated(&[vec![1, 0], vec![2]]));
        assert!(t.violated(&[vec![], vec![0, 1, 2]]));
    }

    #[test]
    fn test_unpinned_slots_ignored() {
        let (v, p) = fleet();
        let pins = [FixedAssignment::new(2, 12, 2)];
        let t = PinTable::build(&pins, &v, &p).expect("valid");
        assert!(!t.violated(&[vec![0], vec![1, 2]]));
        assert_eq!(t.pinned_count(1), 1);
        assert_eq!(t.seat_of(2), Some((1, 1)));
        assert_eq!(t.seat_of(0), None);
    }

    #[test]
    fn test_duplicate_identical_pin_accepted() {
        let (v, p) = fleet();
        let pins = [FixedAssignment::new(1, 10, 1), FixedAssignment::new(1, 10, 1)];
        assert!(PinTable::build(&pins, &v, &p).is_ok());
    }

    #[test]
    fn test_conflicting_pins() {
        let (v, p) = fleet();
        let same_slot = [FixedAssignment::new(1, 10, 1), FixedAssignment::new(1, 11, 1)];
        assert!(matches!(
            PinTable::build(&same_slot, &v, &p),
            Err(ValidationError::ConflictingPin { .. })
        ));
        let same_passenger = [FixedAssignment::new(1, 10, 1), FixedAssignment::new(2, 10, 1)];
        assert!(matches!(
            PinTable::build(&same_passenger, &v, &p),
            Err(ValidationError::ConflictingPin { .. })
        ));
    }

    #[test]
    fn test_sequence_out_of_range() {
        let (v, p) = fleet();
        for sequence in [0, 3] {
            let pins = [FixedAssignment::new(1, 10, sequence)];
            assert_eq!(
                PinTable::build(&pins, &v, &p).unwrap_err(),
                ValidationError::SequenceOutOfRange {
                    vehicle_id: 1,
                    sequence,
                    capacity: 2,
                }
            );
        }
    }

    #[test]
    fn test_unknown_ids() {
        let (v, p) = fleet();
        assert_eq!(
            PinTable::build(&[FixedAssignment::new(9, 10, 1)], &v, &p).unwrap_err(),
            ValidationError::UnknownVehicle { vehicle_id: 9 }
        );
        assert_eq!(
            PinTable::build(&[FixedAssignment::new(1, 99, 1)], &v, &p).unwrap_err(),
            ValidationError::UnknownPassenger { passenger_id: 99 }
        );
    }
}
