//! Caller-supplied travel matrix keyed by node pairs.

use std::collections::HashMap;

use crate::models::Node;

/// A directed travel-cost table over depot, vehicle, and passenger nodes.
///
/// Costs are non-negative integers in the unit of the run's
/// [`Metric`](crate::models::Metric): meters for distance regimes, seconds for
/// duration regimes. The matrix is read-only to the optimizer.
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::TravelMatrix;
/// use u_dispatch::models::Node;
///
/// let mut m = TravelMatrix::new();
/// m.insert_symmetric(Node::Depot, Node::Passenger(1), 300);
/// m.insert(Node::Passenger(1), Node::Vehicle(7), 120);
///
/// assert_eq!(m.get(Node::Passenger(1), Node::Depot), Some(300));
/// assert_eq!(m.get(Node::Vehicle(7), Node::Passenger(1)), None);
/// assert_eq!(m.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TravelMatrix {
    costs: HashMap<(Node, Node), u32>,
}

impl TravelMatrix {
    /// Creates an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cost of travelling from `from` to `to`.
    pub fn insert(&mut self, from: Node, to: Node, cost: u32) {
        self.costs.insert((from, to), cost);
    }

    /// Sets the same cost in both directions.
    pub fn insert_symmetric(&mut self, a: Node, b: Node, cost: u32) {
        self.insert(a, b, cost);
        self.insert(b, a, cost);
    }

    /// Returns the cost from `from` to `to`, if present.
    pub fn get(&self, from: Node, to: Node) -> Option<u32> {
        self.costs.get(&(from, to)).copied()
    }

    /// Number of directed entries.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Returns `true` if the matrix has no entries.
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Iterates over all `(from, to, cost)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (Node, Node, u32)> + '_ {
        self.costs.iter().map(|(&(from, to), &cost)| (from, to, cost))
    }
}

impl FromIterator<(Node, Node, u32)> for TravelMatrix {
    fn from_iter<I: IntoIterator<Item = (Node, Node, u32)>>(iter: I) -> Self {
        let mut m = Self::new();
        for (from, to, cost) in iter {
            m.insert(from, to, cost);
        }
        m
    }
}
