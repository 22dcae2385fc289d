//! Travel-matrix node identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A location in the travel matrix.
///
/// There is exactly one depot per run. Vehicles and passengers are identified
/// by their caller-supplied IDs.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Node;
///
/// assert_eq!(Node::Passenger(5).to_string(), "passenger:5");
/// assert_eq!(Node::Depot.to_string(), "depot");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Node {
    /// The single shared origin/destination.
    Depot,
    /// A vehicle's home node.
    Vehicle(u64),
    /// A passenger's pickup/drop-off point.
    Passenger(u64),
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Depot => write!(f, "depot"),
            Node::Vehicle(id) => write!(f, "vehicle:{id}"),
            Node::Passenger(id) => write!(f, "passenger:{id}"),
        }
    }
}
