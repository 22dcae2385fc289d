//! Error types for dispatch runs.
//!
//! [`ValidationError`] covers input that can never produce a solution and is
//! raised before the generation loop starts. [`DispatchError`] is the run-level
//! failure returned by the engine.

use std::fmt::{self, Display};

use crate::models::Node;

/// Input rejected before optimization starts.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The vehicle list is empty.
    NoVehicles,
    /// The passenger list is empty.
    NoPassengers,
    /// A vehicle declares zero seats.
    ZeroCapacity { vehicle_id: u64 },
    /// Two vehicles share an ID.
    DuplicateVehicle { vehicle_id: u64 },
    /// Two passengers share an ID.
    DuplicatePassenger { passenger_id: u64 },
    /// There are fewer seats in total than passengers.
    InsufficientSeats { seats: usize, passengers: usize },
    /// A pin references a vehicle that is not part of the run.
    UnknownVehicle { vehicle_id: u64 },
    /// A pin references a passenger that is not part of the run.
    UnknownPassenger { passenger_id: u64 },
    /// A pin sequence is 0 or exceeds the vehicle's capacity.
    SequenceOutOfRange {
        vehicle_id: u64,
        sequence: usize,
        capacity: usize,
    },
    /// A slot is pinned to two different passengers, or a passenger is pinned
    /// to two different slots.
    ConflictingPin { vehicle_id: u64, passenger_id: u64 },
    /// A configuration value is out of its allowed range.
    InvalidConfig { field: &'static str, reason: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoVehicles => write!(f, "No vehicles supplied"),
            Self::NoPassengers => write!(f, "No passengers supplied"),
            Self::ZeroCapacity { vehicle_id } => {
                write!(f, "Vehicle {vehicle_id} has zero capacity")
            }
            Self::DuplicateVehicle { vehicle_id } => {
                write!(f, "Vehicle {vehicle_id} appears more than once")
            }
            Self::DuplicatePassenger { passenger_id } => {
                write!(f, "Passenger {passenger_id} appears more than once")
            }
            Self::InsufficientSeats { seats, passengers } => write!(
                f,
                "{passengers} passengers do not fit into {seats} available seats"
            ),
            Self::UnknownVehicle { vehicle_id } => {
                write!(f, "Fixed assignment references unknown vehicle {vehicle_id}")
            }
            Self::UnknownPassenger { passenger_id } => write!(
                f,
                "Fixed assignment references unknown passenger {passenger_id}"
            ),
            Self::SequenceOutOfRange {
                vehicle_id,
                sequence,
                capacity,
            } => write!(
                f,
                "Sequence {sequence} is outside 1..={capacity} for vehicle {vehicle_id}"
            ),
            Self::ConflictingPin {
                vehicle_id,
                passenger_id,
            } => write!(
                f,
                "Fixed assignment of passenger {passenger_id} to vehicle {vehicle_id} conflicts with another pin"
            ),
            Self::InvalidConfig { field, reason } => {
                write!(f, "Invalid configuration `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// A failed dispatch run.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// The input can never be dispatched.
    Validation(ValidationError),
    /// The travel matrix has no entry for a pair the evaluator needed.
    MissingTravelCost { from: Node, to: Node },
    /// No feasible individual could be built within the attempt budget.
    ConstructionExhausted { attempts: usize },
    /// The run was cancelled before the given generation started.
    Cancelled { generation: usize },
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "Invalid dispatch input: {e}"),
            Self::MissingTravelCost { from, to } => {
                write!(f, "Travel matrix has no entry from {from} to {to}")
            }
            Self::ConstructionExhausted { attempts } => write!(
                f,
                "Could not construct a feasible assignment after {attempts} attempts"
            ),
            Self::Cancelled { generation } => {
                write!(f, "Dispatch run cancelled at generation {generation}")
            }
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for DispatchError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
