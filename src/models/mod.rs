//! Domain model types for passenger dispatch.
//!
//! Provides the caller-facing inputs: vehicles with seat capacity, passengers
//! with seating requirements, couples, pinned seats, travel-matrix nodes, and
//! the dispatch cost regime.

mod assignment;
mod dispatch_type;
mod node;
mod passenger;
mod vehicle;

pub use assignment::{FixedAssignment, VehicleAssignment};
pub use dispatch_type::{Direction, DispatchType, Metric};
pub use node::Node;
pub use passenger::{Couple, Passenger};
pub use vehicle::Vehicle;
