//! Dispatch problem definition.
//!
//! Validates caller input once per run and resolves it into index space:
//! vehicles and passengers are addressed by their position in the input
//! lists, pins and couples by those positions, travel costs by a dense
//! [`CostGrid`].
//!
//! # Construction
//!
//! Each individual is built by
//! 1. shuffling the unpinned passengers (couple partners are then grouped),
//! 2. choosing route lengths: every pinned vehicle covers its highest pin,
//!    empty vehicles get one seat in random order while passengers remain,
//!    the rest are spread uniformly over vehicles with free seats,
//! 3. laying out each route slot by slot, taking the pinned passenger where
//!    a slot is pinned and the next pool passenger otherwise.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::constraints::{CoupleIndex, PinTable};
use crate::distance::{CostGrid, TravelMatrix};
use crate::error::{DispatchError, ValidationError};
use crate::models::{
    Couple, DispatchType, FixedAssignment, Passenger, Vehicle, VehicleAssignment,
};

use super::chromosome::Chromosome;

/// Caller input for one dispatch run.
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::TravelMatrix;
/// use u_dispatch::ga::DispatchRequest;
/// use u_dispatch::models::{Couple, DispatchType, FixedAssignment, Passenger, Vehicle};
///
/// let request = DispatchRequest::new(
///     vec![Vehicle::new(1, 3)],
///     vec![Passenger::new(10), Passenger::new(11)],
///     TravelMatrix::new(),
///     DispatchType::DistanceOutbound,
/// )
/// .with_couples(vec![Couple::new(10, 11)])
/// .with_fixed_assignments(vec![FixedAssignment::new(1, 10, 1)]);
/// assert_eq!(request.couples.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    pub vehicles: Vec<Vehicle>,
    pub passengers: Vec<Passenger>,
    pub couples: Vec<Couple>,
    pub fixed_assignments: Vec<FixedAssignment>,
    pub matrix: TravelMatrix,
    pub dispatch_type: DispatchType,
}

impl DispatchRequest {
    /// Creates a request without couples or pins.
    pub fn new(
        vehicles: Vec<Vehicle>,
        passengers: Vec<Passenger>,
        matrix: TravelMatrix,
        dispatch_type: DispatchType,
    ) -> Self {
        Self {
            vehicles,
            passengers,
            couples: Vec::new(),
            fixed_assignments: Vec::new(),
            matrix,
            dispatch_type,
        }
    }

    /// Sets the couple preferences.
    pub fn with_couples(mut self, couples: Vec<Couple>) -> Self {
        self.couples = couples;
        self
    }

    /// Sets the pinned seats.
    pub fn with_fixed_assignments(mut self, pins: Vec<FixedAssignment>) -> Self {
        self.fixed_assignments = pins;
        self
    }
}

/// A validated dispatch problem.
///
/// Immutable during a run and shared by reference with the evaluator and the
/// rayon workers.
#[derive(Debug, Clone)]
pub struct DispatchProblem {
    vehicles: Vec<Vehicle>,
    passengers: Vec<Passenger>,
    pins: PinTable,
    couples: CoupleIndex,
    grid: CostGrid,
    dispatch_type: DispatchType,
}

impl DispatchProblem {
    /// Validates `request` and compiles it for the engine.
    pub fn new(request: DispatchRequest) -> Result<Self, ValidationError> {
        let DispatchRequest {
            vehicles,
            passengers,
            couples,
            fixed_assignments,
            matrix,
            dispatch_type,
        } = request;

        if vehicles.is_empty() {
            return Err(ValidationError::NoVehicles);
        }
        if passengers.is_empty() {
            return Err(ValidationError::NoPassengers);
        }

        let mut vehicle_ids = HashSet::with_capacity(vehicles.len());
        for v in &vehicles {
            if v.capacity() == 0 {
                return Err(ValidationError::ZeroCapacity { vehicle_id: v.id() });
            }
            if !vehicle_ids.insert(v.id()) {
                return Err(ValidationError::DuplicateVehicle { vehicle_id: v.id() });
            }
        }
        let mut passenger_ids = HashSet::with_capacity(passengers.len());
        for p in &passengers {
            if !passenger_ids.insert(p.id()) {
                return Err(ValidationError::DuplicatePassenger { passenger_id: p.id() });
            }
        }

        let seats: usize = vehicles.iter().map(Vehicle::capacity).sum();
        if seats < passengers.len() {
            return Err(ValidationError::InsufficientSeats {
                seats,
                passengers: passengers.len(),
            });
        }

        let pins = PinTable::build(&fixed_assignments, &vehicles, &passengers)?;
        let couples = CoupleIndex::build(&couples, &passengers);
        let grid = CostGrid::compile(&matrix, &vehicles, &passengers);

        Ok(Self {
            vehicles,
            passengers,
            pins,
            couples,
            grid,
            dispatch_type,
        })
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn pins(&self) -> &PinTable {
        &self.pins
    }

    pub fn couples(&self) -> &CoupleIndex {
        &self.couples
    }

    pub fn grid(&self) -> &CostGrid {
        &self.grid
    }

    pub fn dispatch_type(&self) -> DispatchType {
        self.dispatch_type
    }

    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    pub fn num_passengers(&self) -> usize {
        self.passengers.len()
    }

    /// Makes one construction attempt.
    ///
    /// Returns `None` when the pins leave more unpinned slots below them than
    /// there are free passengers to fill them.
    pub fn create_individual<R: Rng>(&self, rng: &mut R) -> Option<Chromosome> {
        let nv = self.num_vehicles();

        let mut pool: Vec<usize> = (0..self.num_passengers())
            .filter(|&p| self.pins.seat_of(p).is_none())
            .collect();
        pool.shuffle(rng);
        self.couples.group_partners(&mut pool);

        let mut lengths: Vec<usize> = (0..nv).map(|v| self.pins.required_len(v)).collect();
        let holes: usize = (0..nv)
            .map(|v| lengths[v] - self.pins.pinned_count(v))
            .sum();
        let mut extra = pool.len().checked_sub(holes)?;

        let mut order: Vec<usize> = (0..nv).collect();
        order.shuffle(rng);
        for &v in &order {
            if extra == 0 {
                break;
            }
            if lengths[v] == 0 {
                lengths[v] = 1;
                extra -= 1;
            }
        }

        let mut open: Vec<usize> = (0..nv)
            .filter(|&v| lengths[v] < self.vehicles[v].capacity())
            .collect();
        while extra > 0 {
            if open.is_empty() {
                return None;
            }
            let k = rng.random_range(0..open.len());
            let v = open[k];
            lengths[v] += 1;
            extra -= 1;
            if lengths[v] == self.vehicles[v].capacity() {
                open.swap_remove(k);
            }
        }

        let mut fill = pool.into_iter();
        let mut genes = Vec::with_capacity(nv);
        for (v, &len) in lengths.iter().enumerate() {
            let mut route = Vec::with_capacity(len);
            for slot in 0..len {
                match self.pins.pinned(v, slot) {
                    Some(p) => route.push(p),
                    None => route.push(fill.next()?),
                }
            }
            genes.push(route);
        }

        Some(Chromosome::new(genes))
    }

    /// Builds one individual, retrying up to `max_attempts` times.
    pub fn construct<R: Rng>(
        &self,
        rng: &mut R,
        max_attempts: usize,
    ) -> Result<Chromosome, DispatchError> {
        (0..max_attempts)
            .find_map(|_| self.create_individual(rng))
            .ok_or(DispatchError::ConstructionExhausted {
                attempts: max_attempts,
            })
    }

    /// Translates a chromosome into caller IDs, one entry per vehicle.
    pub fn assignments(&self, chromosome: &Chromosome) -> Vec<VehicleAssignment> {
        self.vehicles
            .iter()
            .zip(chromosome.genes())
            .enumerate()
            .map(|(v, (vehicle, route))| VehicleAssignment {
                vehicle_id: vehicle.id(),
                passenger_ids: route.iter().map(|&p| self.passengers[p].id()).collect(),
                route_cost: chromosome.route_costs().get(v).copied().unwrap_or(0),
            })
            .collect()
    }
}
