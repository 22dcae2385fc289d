//! Variation operators on [`Chromosome`]s.
//!
//! # Operators
//!
//! - **Crossover**: two-point band crossover over the vehicle index range,
//!   followed by duplicate repair
//! - **Mutation**: transposition of two uniformly chosen gene positions
//! - **Repair**: deterministic replacement of duplicated passengers by the
//!   lowest missing ones

use rand::Rng;

use super::chromosome::Chromosome;

/// Draws two crossover points uniformly over `0..num_vehicles`, sorted.
///
/// Returns `(0, 0)` when there are no vehicles.
pub fn crossover_points<R: Rng>(num_vehicles: usize, rng: &mut R) -> (usize, usize) {
    if num_vehicles == 0 {
        return (0, 0);
    }
    let a = rng.random_range(0..num_vehicles);
    let b = rng.random_range(0..num_vehicles);
    (a.min(b), a.max(b))
}

/// Band crossover at fixed points, then repair.
///
/// Vehicles in `[0, first)` and `[second, V)` keep their own parent's
/// passengers; vehicles in `[first, second)` take the other parent's.
/// Copying is position-wise up to the shorter of the two routes, so each child
/// keeps its own parent's route lengths. Coinciding points leave both
/// children equal to their parents.
///
/// # Examples
///
/// ```
/// use u_dispatch::ga::{operators, Chromosome};
///
/// let p1 = Chromosome::new(vec![vec![0, 1], vec![2], vec![3]]);
/// let p2 = Chromosome::new(vec![vec![1, 0], vec![3], vec![2]]);
/// let (c1, c2) = operators::band_crossover(&p1, &p2, (1, 3), 4);
///
/// assert_eq!(c1.genes(), &[vec![0, 1], vec![3], vec![2]]);
/// assert_eq!(c2.genes(), &[vec![1, 0], vec![2], vec![3]]);
/// ```
pub fn band_crossover(
    parent1: &Chromosome,
    parent2: &Chromosome,
    points: (usize, usize),
    num_passengers: usize,
) -> (Chromosome, Chromosome) {
    let mut child1 = Chromosome::new(parent1.genes().to_vec());
    let mut child2 = Chromosome::new(parent2.genes().to_vec());

    let (first, second) = points;
    let swapped = first..second.min(parent1.num_vehicles());
    for v in swapped {
        let from1 = parent1.route(v);
        let from2 = parent2.route(v);
        let len = from1.len().min(from2.len());
        child1.genes_mut()[v][..len].copy_from_slice(&from2[..len]);
        child2.genes_mut()[v][..len].copy_from_slice(&from1[..len]);
    }

    repair(&mut child1, num_passengers);
    repair(&mut child2, num_passengers);
    (child1, child2)
}

/// Band crossover at random points.
pub fn multi_point_crossover<R: Rng>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    num_passengers: usize,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let points = crossover_points(parent1.num_vehicles(), rng);
    band_crossover(parent1, parent2, points, num_passengers)
}

/// Restores the partition invariant after position-based copying.
///
/// Scans genes in ascending (vehicle, slot) order. A passenger already seen
/// earlier in the scan is replaced by the lowest-numbered passenger that
/// appears nowhere in the chromosome. A valid chromosome is left unchanged.
///
/// # Examples
///
/// ```
/// use u_dispatch::ga::{operators, Chromosome};
///
/// let mut c = Chromosome::new(vec![vec![2, 0], vec![2, 0]]);
/// operators::repair(&mut c, 4);
/// assert_eq!(c.genes(), &[vec![2, 0], vec![1, 3]]);
/// ```
pub fn repair(chromosome: &mut Chromosome, num_passengers: usize) {
    let mut present = vec![false; num_passengers];
    for &p in chromosome.genes().iter().flatten() {
        present[p] = true;
    }
    let mut missing = (0..num_passengers).filter(|&p| !present[p]);

    let mut seen = vec![false; num_passengers];
    for gene in chromosome.genes_mut().iter_mut().flatten() {
        if seen[*gene] {
            if let Some(replacement) = missing.next() {
                *gene = replacement;
            }
        }
        seen[*gene] = true;
    }
}

/// Swaps the passengers at two uniformly chosen gene positions.
///
/// The two positions may coincide, in which case nothing changes. Route
/// lengths, and therefore capacities, are preserved.
pub fn swap_mutation<R: Rng>(chromosome: &mut Chromosome, rng: &mut R) {
    let total = chromosome.num_assigned();
    if total < 2 {
        return;
    }
    let a = chromosome.locate(rng.random_range(0..total));
    let b = chromosome.locate(rng.random_range(0..total));
    if let (Some((va, sa)), Some((vb, sb))) = (a, b) {
        let genes = chromosome.genes_mut();
        let tmp = genes[va][sa];
        genes[va][sa] = genes[vb][sb];
        genes[vb][sb] = tmp;
    }
}
