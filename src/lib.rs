//! # u-dispatch
//!
//! Passenger-to-vehicle dispatch optimization: assigns passengers to seats in
//! a fleet of vehicles and orders each pickup sequence with a genetic
//! algorithm, under seat capacity, front-seat, and pinned-seat constraints.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Vehicle, Passenger, Couple, FixedAssignment, DispatchType)
//! - [`distance`] — Travel matrix, dense cost grid, and leg proximity scores
//! - [`constraints`] — Pinned seats and couple preferences in index space
//! - [`evaluation`] — Fitness evaluation with hard-constraint zeroing
//! - [`ga`] — Chromosome, operators, and the generational engine
//! - [`error`] — Validation and run errors
//!
//! ## Example
//!
//! ```
//! use u_dispatch::distance::TravelMatrix;
//! use u_dispatch::ga::{dispatch, DispatchConfig, DispatchRequest};
//! use u_dispatch::models::{DispatchType, Node, Passenger, Vehicle};
//!
//! let nodes = [Node::Depot, Node::Vehicle(7), Node::Passenger(1), Node::Passenger(2)];
//! let mut matrix = TravelMatrix::new();
//! for (i, &a) in nodes.iter().enumerate() {
//!     for &b in &nodes[i + 1..] {
//!         matrix.insert_symmetric(a, b, 300);
//!     }
//! }
//!
//! let request = DispatchRequest::new(
//!     vec![Vehicle::new(7, 4)],
//!     vec![Passenger::new(1), Passenger::new(2).with_front_seat(true)],
//!     matrix,
//!     DispatchType::DurationInbound,
//! );
//! let config = DispatchConfig::default()
//!     .with_population_size(20)
//!     .with_max_generations(10)
//!     .with_seed(1);
//!
//! let assignments = dispatch(request, config).unwrap();
//! assert_eq!(assignments[0].vehicle_id, 7);
//! assert_eq!(assignments[0].passenger_ids.len(), 2);
//! ```

pub mod constraints;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod ga;
pub mod models;

pub use error::{DispatchError, ValidationError};
