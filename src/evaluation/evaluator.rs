//! Fitness evaluator that computes route costs, proximity, and hard constraints.

use u_metaheur::ga::Individual;

use crate::error::DispatchError;
use crate::ga::{Chromosome, DispatchProblem};
use crate::models::Direction;

/// Result of evaluating one chromosome.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Chromosome fitness; `0.0` on a hard-constraint violation.
    pub fitness: f64,
    /// Cost of each vehicle's route in the metric's unit.
    pub route_costs: Vec<u64>,
}

/// Evaluates chromosomes against a [`DispatchProblem`].
///
/// Fitness is `K / (total + 1)` plus the proximity score of every scored leg,
/// plus the optional couple bonus. A pin violation or two front-seat
/// passengers in one vehicle force it to exactly `0.0`. Route costs are
/// computed in every case, so a missing travel-matrix entry is reported even
/// for infeasible chromosomes.
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::TravelMatrix;
/// use u_dispatch::evaluation::FitnessEvaluator;
/// use u_dispatch::ga::{DispatchProblem, DispatchRequest};
/// use u_dispatch::models::{DispatchType, Node, Passenger, Vehicle};
///
/// let mut matrix = TravelMatrix::new();
/// matrix.insert(Node::Depot, Node::Passenger(1), 300);
/// matrix.insert(Node::Passenger(1), Node::Depot, 300);
/// let problem = DispatchProblem::new(DispatchRequest::new(
///     vec![Vehicle::new(9, 1).with_anchor(true)],
///     vec![Passenger::new(1)],
///     matrix,
///     DispatchType::DistanceOutbound,
/// ))
/// .unwrap();
///
/// let eval = FitnessEvaluator::new(&problem).evaluate(&[vec![0]]).unwrap();
/// assert_eq!(eval.route_costs, vec![600]);
/// assert!(eval.fitness > 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    problem: &'a DispatchProblem,
    couple_bonus: Option<f64>,
}

impl<'a> FitnessEvaluator<'a> {
    /// Creates an evaluator without couple bonus.
    pub fn new(problem: &'a DispatchProblem) -> Self {
        Self {
            problem,
            couple_bonus: None,
        }
    }

    /// Sets the bonus added per couple sharing a vehicle.
    pub fn with_couple_bonus(mut self, bonus: Option<f64>) -> Self {
        self.couple_bonus = bonus;
        self
    }

    /// Grid index where vehicle `v`'s route starts.
    fn start_node(&self, v: usize) -> usize {
        let grid = self.problem.grid();
        match self.problem.dispatch_type().direction() {
            Direction::Outbound => grid.depot(),
            Direction::Inbound => self.home_or_depot(v),
        }
    }

    /// Grid index where vehicle `v`'s route ends.
    fn end_node(&self, v: usize) -> usize {
        let grid = self.problem.grid();
        match self.problem.dispatch_type().direction() {
            Direction::Outbound => self.home_or_depot(v),
            Direction::Inbound => grid.depot(),
        }
    }

    fn home_or_depot(&self, v: usize) -> usize {
        let grid = self.problem.grid();
        if self.problem.vehicles()[v].is_anchor() {
            grid.depot()
        } else {
            grid.vehicle(v)
        }
    }

    /// Cost of vehicle `v` driving `route`, endpoints included.
    ///
    /// An empty route costs nothing.
    pub fn route_cost(&self, v: usize, route: &[usize]) -> Result<u64, DispatchError> {
        let (Some(&first), Some(&last)) = (route.first(), route.last()) else {
            return Ok(0);
        };
        let grid = self.problem.grid();

        let mut total = u64::from(grid.get(self.start_node(v), grid.passenger(first))?);
        for leg in route.windows(2) {
            total += u64::from(grid.get(grid.passenger(leg[0]), grid.passenger(leg[1]))?);
        }
        total += u64::from(grid.get(grid.passenger(last), self.end_node(v))?);
        Ok(total)
    }

    /// Sum of leg scores along `route`.
    ///
    /// Consecutive passenger legs always count. Outbound adds the leg from
    /// the last passenger to the route end; inbound adds the leg from the
    /// route start to the first passenger and the final leg to the depot.
    pub fn proximity(&self, v: usize, route: &[usize]) -> Result<f64, DispatchError> {
        let (Some(&first), Some(&last)) = (route.first(), route.last()) else {
            return Ok(0.0);
        };
        let grid = self.problem.grid();
        let metric = self.problem.dispatch_type().metric();
        let score = |from: usize, to: usize| -> Result<f64, DispatchError> {
            Ok(metric.score(grid.get(from, to)?).value())
        };

        let mut total = 0.0;
        for leg in route.windows(2) {
            total += score(grid.passenger(leg[0]), grid.passenger(leg[1]))?;
        }
        match self.problem.dispatch_type().direction() {
            Direction::Outbound => {
                total += score(grid.passenger(last), self.end_node(v))?;
            }
            Direction::Inbound => {
                total += score(self.start_node(v), grid.passenger(first))?;
                total += score(grid.passenger(last), grid.depot())?;
            }
        }
        Ok(total)
    }

    /// Returns `true` if any vehicle carries two or more front-seat passengers.
    pub fn front_seat_violated(&self, genes: &[Vec<usize>]) -> bool {
        let passengers = self.problem.passengers();
        genes.iter().any(|route| {
            route
                .iter()
                .filter(|&&p| passengers[p].requires_front_seat())
                .count()
                > 1
        })
    }

    /// Evaluates per-vehicle routes.
    pub fn evaluate(&self, genes: &[Vec<usize>]) -> Result<Evaluation, DispatchError> {
        let route_costs = genes
            .iter()
            .enumerate()
            .map(|(v, route)| self.route_cost(v, route))
            .collect::<Result<Vec<_>, _>>()?;

        if self.front_seat_violated(genes) || self.problem.pins().violated(genes) {
            return Ok(Evaluation {
                fitness: 0.0,
                route_costs,
            });
        }

        let total: u64 = route_costs.iter().sum();
        let mut fitness =
            self.problem.dispatch_type().metric().fitness_scale() / (total as f64 + 1.0);
        for (v, route) in genes.iter().enumerate() {
            fitness += self.proximity(v, route)?;
        }
        if let Some(bonus) = self.couple_bonus {
            fitness += bonus * self.problem.couples().together_count(genes) as f64;
        }

        Ok(Evaluation {
            fitness,
            route_costs,
        })
    }

    /// Evaluates `chromosome` in place, storing its fitness and route costs.
    pub fn evaluate_into(&self, chromosome: &mut Chromosome) -> Result<(), DispatchError> {
        let Evaluation {
            fitness,
            route_costs,
        } = self.evaluate(chromosome.genes())?;
        chromosome.set_route_costs(route_costs);
        chromosome.set_fitness(fitness);
        Ok(())
    }
}
