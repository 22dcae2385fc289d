//! Dense, index-addressed cost grid compiled once per run.

use std::collections::HashMap;

use crate::error::DispatchError;
use crate::models::{Node, Passenger, Vehicle};

use super::TravelMatrix;

/// A dense n×n cost grid stored in row-major order.
///
/// Node indices are laid out as `[depot, vehicles.., passengers..]`, so the
/// evaluator never hashes node IDs in its inner loop. Entries missing from the
/// source [`TravelMatrix`] stay `None` and surface as
/// [`DispatchError::MissingTravelCost`] when queried.
#[derive(Debug, Clone)]
pub struct CostGrid {
    data: Vec<Option<u32>>,
    nodes: Vec<Node>,
    num_vehicles: usize,
}

impl CostGrid {
    /// Compiles the entries of `matrix` that concern the run's nodes.
    ///
    /// Entries for nodes outside the run are ignored.
    pub fn compile(matrix: &TravelMatrix, vehicles: &[Vehicle], passengers: &[Passenger]) -> Self {
        let mut nodes = Vec::with_capacity(1 + vehicles.len() + passengers.len());
        nodes.push(Node::Depot);
        nodes.extend(vehicles.iter().map(|v| Node::Vehicle(v.id())));
        nodes.extend(passengers.iter().map(|p| Node::Passenger(p.id())));

        let position: HashMap<Node, usize> =
            nodes.iter().enumerate().map(|(i, &node)| (node, i)).collect();
        let size = nodes.len();
        let mut data = vec![None; size * size];
        for (from, to, cost) in matrix.iter() {
            if let (Some(&i), Some(&j)) = (position.get(&from), position.get(&to)) {
                data[i * size + j] = Some(cost);
            }
        }

        Self {
            data,
            nodes,
            num_vehicles: vehicles.len(),
        }
    }

    /// Index of the depot.
    pub fn depot(&self) -> usize {
        0
    }

    /// Index of the home node of vehicle `v` (position in the vehicle list).
    pub fn vehicle(&self, v: usize) -> usize {
        1 + v
    }

    /// Index of passenger `p` (position in the passenger list).
    pub fn passenger(&self, p: usize) -> usize {
        1 + self.num_vehicles + p
    }

    /// Returns the cost from index `from` to index `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> Result<u32, DispatchError> {
        self.data[from * self.nodes.len() + to].ok_or(DispatchError::MissingTravelCost {
            from: self.nodes[from],
            to: self.nodes[to],
        })
    }

    /// Number of nodes in this grid.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }
}
