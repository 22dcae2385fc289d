//! Vehicle-partition chromosome for dispatch genetic algorithms.
//!
//! A chromosome holds one gene per vehicle: the ordered list of passenger
//! indices that vehicle serves. Across all genes every passenger index
//! appears exactly once, and no gene is longer than its vehicle's capacity.

use u_metaheur::ga::Individual;

/// One candidate dispatch: a route per vehicle, the route costs computed by
/// the last evaluation, and the fitness.
///
/// Higher fitness is better; `0.0` marks a hard-constraint violation and is
/// also the value before the first evaluation.
///
/// # Examples
///
/// ```
/// use u_dispatch::ga::Chromosome;
/// use u_metaheur::ga::Individual;
///
/// let c = Chromosome::new(vec![vec![2, 0], vec![1]]);
/// assert_eq!(c.route(0), &[2, 0]);
/// assert_eq!(c.num_assigned(), 3);
/// assert!(c.is_partition_of(3));
/// assert_eq!(c.fitness(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    genes: Vec<Vec<usize>>,
    route_costs: Vec<u64>,
    fitness: f64,
}

impl Chromosome {
    /// Creates an unevaluated chromosome from per-vehicle routes.
    pub fn new(genes: Vec<Vec<usize>>) -> Self {
        let route_costs = vec![0; genes.len()];
        Self {
            genes,
            route_costs,
            fitness: 0.0,
        }
    }

    /// Returns all routes, indexed by vehicle.
    pub fn genes(&self) -> &[Vec<usize>] {
        &self.genes
    }

    /// Returns a mutable reference to the routes.
    pub fn genes_mut(&mut self) -> &mut Vec<Vec<usize>> {
        &mut self.genes
    }

    /// Returns the route of vehicle `vehicle`.
    pub fn route(&self, vehicle: usize) -> &[usize] {
        &self.genes[vehicle]
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.genes.len()
    }

    /// Total number of assigned seats across all vehicles.
    pub fn num_assigned(&self) -> usize {
        self.genes.iter().map(Vec::len).sum()
    }

    /// Per-vehicle route cost from the last evaluation.
    pub fn route_costs(&self) -> &[u64] {
        &self.route_costs
    }

    /// Stores per-vehicle route costs.
    pub fn set_route_costs(&mut self, costs: Vec<u64>) {
        self.route_costs = costs;
    }

    /// Maps a flat gene position (vehicle-major order) to `(vehicle, slot)`.
    ///
    /// Returns `None` if `flat >= num_assigned()`.
    pub fn locate(&self, flat: usize) -> Option<(usize, usize)> {
        let mut offset = flat;
        for (v, route) in self.genes.iter().enumerate() {
            if offset < route.len() {
                return Some((v, offset));
            }
            offset -= route.len();
        }
        None
    }

    /// Returns `true` if every index in `0..num_passengers` appears exactly once.
    pub fn is_partition_of(&self, num_passengers: usize) -> bool {
        let mut seen = vec![false; num_passengers];
        for &p in self.genes.iter().flatten() {
            if p >= num_passengers || seen[p] {
                return false;
            }
            seen[p] = true;
        }
        seen.into_iter().all(|s| s)
    }
}

impl Individual for Chromosome {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}
