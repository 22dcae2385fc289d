//! Generational loop for the dispatch genetic algorithm.
//!
//! # Algorithm
//!
//! 1. Build and evaluate `population_size` individuals, sort best-first
//! 2. For each of `max_generations` generations:
//!    - pair neighbours (0/1, 2/3, ...) and recombine with probability
//!      `crossover_rate`, otherwise copy the pair
//!    - swap-mutate each offspring with probability `mutation_rate`
//!    - evaluate offspring, merge with the parents, keep the best
//!      `population_size`
//! 3. Return the population best-first
//!
//! Offspring are evaluated before the merge, so the population is always
//! evaluated and the best fitness never decreases between generations.

use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, error, info, info_span, warn};
use u_metaheur::ga::Individual;
use u_numflow::random::create_rng;

use crate::error::DispatchError;
use crate::evaluation::FitnessEvaluator;
use crate::models::VehicleAssignment;

use super::chromosome::Chromosome;
use super::config::DispatchConfig;
use super::operators;
use super::problem::{DispatchProblem, DispatchRequest};
use super::progress::{CancelToken, ProgressReporter, SilentProgress};

/// Lifecycle of a [`GeneticEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Building the initial population.
    Initializing,
    /// Running the given zero-based generation.
    Evolving { generation: usize },
    /// The run has finished, successfully or not.
    Terminated,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    population: Vec<Chromosome>,
    best_fitness_history: Vec<f64>,
    seed: u64,
}

impl DispatchOutcome {
    /// The best chromosome, or `None` for an empty population.
    pub fn best(&self) -> Option<&Chromosome> {
        self.population.first()
    }

    /// Final population, sorted by fitness descending.
    pub fn population(&self) -> &[Chromosome] {
        &self.population
    }

    pub fn into_population(self) -> Vec<Chromosome> {
        self.population
    }

    /// Best fitness after initialization, then after each generation.
    pub fn best_fitness_history(&self) -> &[f64] {
        &self.best_fitness_history
    }

    /// Seed the run was started with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Runs the dispatch genetic algorithm on one problem.
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::TravelMatrix;
/// use u_dispatch::ga::{DispatchConfig, DispatchProblem, DispatchRequest, GeneticEngine};
/// use u_dispatch::models::{DispatchType, Node, Passenger, Vehicle};
///
/// let nodes = [Node::Depot, Node::Vehicle(1), Node::Passenger(10), Node::Passenger(11)];
/// let mut matrix = TravelMatrix::new();
/// for (i, &a) in nodes.iter().enumerate() {
///     for &b in &nodes[i + 1..] {
///         matrix.insert_symmetric(a, b, 120);
///     }
/// }
///
/// let problem = DispatchProblem::new(DispatchRequest::new(
///     vec![Vehicle::new(1, 2)],
///     vec![Passenger::new(10), Passenger::new(11)],
///     matrix,
///     DispatchType::DistanceOutbound,
/// ))
/// .unwrap();
///
/// let config = DispatchConfig::default()
///     .with_population_size(10)
///     .with_max_generations(5)
///     .with_seed(42);
/// let outcome = GeneticEngine::new(&problem, config).run().unwrap();
/// let best = outcome.best().unwrap();
/// assert!(best.is_partition_of(2));
/// ```
pub struct GeneticEngine<'a> {
    problem: &'a DispatchProblem,
    config: DispatchConfig,
    reporter: Option<&'a dyn ProgressReporter>,
    run_id: String,
    cancel: Option<CancelToken>,
    state: EngineState,
}

impl<'a> GeneticEngine<'a> {
    /// Creates an engine with no progress reporter and no cancellation.
    pub fn new(problem: &'a DispatchProblem, config: DispatchConfig) -> Self {
        Self {
            problem,
            config,
            reporter: None,
            run_id: String::new(),
            cancel: None,
            state: EngineState::Initializing,
        }
    }

    /// Reports progress for `run_id` to `reporter`.
    pub fn with_progress(
        mut self,
        run_id: impl Into<String>,
        reporter: &'a dyn ProgressReporter,
    ) -> Self {
        self.run_id = run_id.into();
        self.reporter = Some(reporter);
        self
    }

    /// Checks `token` before every generation.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Runs the algorithm to completion.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration, a missing travel-matrix entry, when
    /// no individual can be constructed, or on cancellation.
    pub fn run(&mut self) -> Result<DispatchOutcome, DispatchError> {
        let _span = info_span!("dispatch", run_id = %self.run_id).entered();
        let result = self.run_inner();
        self.state = EngineState::Terminated;
        if let Err(e) = &result {
            error!(error = %e, "dispatch run aborted");
        }
        result
    }

    fn run_inner(&mut self) -> Result<DispatchOutcome, DispatchError> {
        self.config.validate()?;
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);
        let evaluator =
            FitnessEvaluator::new(self.problem).with_couple_bonus(self.config.couple_bonus);
        let n = self.problem.num_passengers();

        info!(
            vehicles = self.problem.num_vehicles(),
            passengers = n,
            couples = self.problem.couples().pairs().len(),
            population = self.config.population_size,
            generations = self.config.max_generations,
            seed,
            "dispatch run started"
        );

        self.state = EngineState::Initializing;
        let mut population = self.initial_population(&mut rng, &evaluator)?;
        sort_best_first(&mut population);
        let mut history = Vec::new();
        history.push(best_fitness(&population));
        self.report(self.config.progress_at(0));

        for generation in 0..self.config.max_generations {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                info!(generation, "dispatch run cancelled");
                return Err(DispatchError::Cancelled { generation });
            }
            self.state = EngineState::Evolving { generation };

            let mut offspring = Vec::with_capacity(population.len());
            for pair in population.chunks(2) {
                match pair {
                    [a, b] if rng.random_bool(self.config.crossover_rate) => {
                        let (c1, c2) = operators::multi_point_crossover(a, b, n, &mut rng);
                        offspring.push(c1);
                        offspring.push(c2);
                    }
                    _ => offspring.extend(pair.iter().cloned()),
                }
            }
            for child in &mut offspring {
                if rng.random_bool(self.config.mutation_rate) {
                    operators::swap_mutation(child, &mut rng);
                }
            }
            self.evaluate_all(&mut offspring, &evaluator)?;

            population.append(&mut offspring);
            sort_best_first(&mut population);
            population.truncate(self.config.population_size);

            let best = best_fitness(&population);
            history.push(best);
            debug!(generation, best_fitness = best, "generation finished");
            self.report(self.config.progress_at(generation + 1));
        }

        info!(best_fitness = best_fitness(&population), "dispatch run finished");
        Ok(DispatchOutcome {
            population,
            best_fitness_history: history,
            seed,
        })
    }

    /// Builds the initial population from one sub-seed per individual, so
    /// the result does not depend on `parallel`.
    fn initial_population<R: Rng>(
        &self,
        rng: &mut R,
        evaluator: &FitnessEvaluator<'_>,
    ) -> Result<Vec<Chromosome>, DispatchError> {
        let seeds: Vec<u64> = (0..self.config.population_size)
            .map(|_| rng.random())
            .collect();
        let attempts = self.config.max_construction_attempts;
        let problem = self.problem;
        let build = |seed: u64| -> Result<Chromosome, DispatchError> {
            let mut rng = create_rng(seed);
            let mut chromosome = problem.construct(&mut rng, attempts)?;
            evaluator.evaluate_into(&mut chromosome)?;
            Ok(chromosome)
        };

        if self.config.parallel {
            seeds.into_par_iter().map(build).collect()
        } else {
            seeds.into_iter().map(build).collect()
        }
    }

    fn evaluate_all(
        &self,
        population: &mut [Chromosome],
        evaluator: &FitnessEvaluator<'_>,
    ) -> Result<(), DispatchError> {
        if self.config.parallel {
            population
                .par_iter_mut()
                .try_for_each(|c| evaluator.evaluate_into(c))
        } else {
            population
                .iter_mut()
                .try_for_each(|c| evaluator.evaluate_into(c))
        }
    }

    fn report(&self, percent: f64) {
        if let Some(reporter) = self.reporter {
            if let Err(e) = reporter.report(&self.run_id, percent) {
                warn!(error = %e, percent, "progress report failed");
            }
        }
    }
}

/// Validates `request`, runs the engine, and translates the best chromosome
/// into caller IDs.
///
/// Reports no progress and cannot be cancelled; use [`dispatch_with`] for
/// that.
pub fn dispatch(
    request: DispatchRequest,
    config: DispatchConfig,
) -> Result<Vec<VehicleAssignment>, DispatchError> {
    dispatch_with(request, config, "", &SilentProgress, None)
}

/// Like [`dispatch`], reporting progress for `run_id` to `reporter` and
/// checking `cancel` between generations.
pub fn dispatch_with(
    request: DispatchRequest,
    config: DispatchConfig,
    run_id: &str,
    reporter: &dyn ProgressReporter,
    cancel: Option<CancelToken>,
) -> Result<Vec<VehicleAssignment>, DispatchError> {
    let problem = DispatchProblem::new(request)?;
    let mut engine = GeneticEngine::new(&problem, config).with_progress(run_id, reporter);
    if let Some(token) = cancel {
        engine = engine.with_cancel(token);
    }
    let outcome = engine.run()?;
    Ok(outcome
        .best()
        .map(|best| problem.assignments(best))
        .unwrap_or_default())
}

fn sort_best_first(population: &mut [Chromosome]) {
    population.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
}

fn best_fitness(population: &[Chromosome]) -> f64 {
    population.first().map_or(0.0, |c| c.fitness())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::TravelMatrix;
    use crate::error::ValidationError;
    use crate::models::{DispatchType, Node, Passenger, Vehicle};

    fn problem() -> DispatchProblem {
        let mut nodes = vec![Node::Depot, Node::Vehicle(1), Node::Vehicle(2)];
        nodes.extend((0..5).map(|i| Node::Passenger(10 + i)));
        let mut matrix = TravelMatrix::new();
        for (i, &a) in nodes.iter().enumerate() {
            for (j, &b) in nodes.iter().enumerate() {
                if i != j {
                    matrix.insert(a, b, (50 * (i + j)) as u32);
                }
            }
        }
        DispatchProblem::new(DispatchRequest::new(
            vec![Vehicle::new(1, 3), Vehicle::new(2, 3)],
            (0..5).map(|i| Passenger::new(10 + i)).collect(),
            matrix,
            DispatchType::DistanceOutbound,
        ))
        .expect("valid")
    }

    fn config() -> DispatchConfig {
        DispatchConfig::default()
            .with_population_size(16)
            .with_max_generations(20)
            .with_seed(9)
    }

    #[test]
    fn test_run_terminates_with_sorted_population() {
        let p = problem();
        let mut engine = GeneticEngine::new(&p, config());
        assert_eq!(engine.state(), EngineState::Initializing);
        let outcome = engine.run().unwrap();
        assert_eq!(engine.state(), EngineState::Terminated);
        assert_eq!(outcome.population().len(), 16);
        assert_eq!(outcome.best_fitness_history().len(), 21);
        assert_eq!(outcome.seed(), 9);
        for w in outcome.population().windows(2) {
            assert!(w[0].fitness() >= w[1].fitness());
        }
    }

    #[test]
    fn test_best_fitness_never_decreases() {
        let p = problem();
        let outcome = GeneticEngine::new(&p, config()).run().unwrap();
        for w in outcome.best_fitness_history().windows(2) {
            assert!(w[1] >= w[0]);
        }
    }

    #[test]
    fn test_parallel_and_serial_agree() {
        let p = problem();
        let serial = GeneticEngine::new(&p, config().with_parallel(false))
            .run()
            .unwrap();
        let parallel = GeneticEngine::new(&p, config().with_parallel(true))
            .run()
            .unwrap();
        assert_eq!(serial.population(), parallel.population());
    }

    #[test]
    fn test_zero_generations_returns_initial_population() {
        let p = problem();
        let outcome = GeneticEngine::new(&p, config().with_max_generations(0))
            .run()
            .unwrap();
        assert_eq!(outcome.best_fitness_history().len(), 1);
        assert!(outcome.best().unwrap().is_partition_of(5));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let p = problem();
        let err = GeneticEngine::new(&p, config().with_population_size(0))
            .run()
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Validation(ValidationError::InvalidConfig {
                field: "population_size",
                ..
            })
        ));
    }

    #[test]
    fn test_cancel_before_first_generation() {
        let p = problem();
        let token = CancelToken::new();
        token.cancel();
        let err = GeneticEngine::new(&p, config())
            .with_cancel(token)
            .run()
            .unwrap_err();
        assert_eq!(err, DispatchError::Cancelled { generation: 0 });
    }

    #[test]
    fn test_huge_generation_budget_cancels_cleanly() {
        let p = problem();
        let config: DispatchConfig =
            serde_json::from_str(r#"{"population_size": 4, "seed": 1}"#).expect("valid");
        let config = config.with_max_generations(usize::MAX);
        assert!(config.validate().is_ok());

        let token = CancelToken::new();
        token.cancel();
        let err = GeneticEngine::new(&p, config)
            .with_cancel(token)
            .run()
            .unwrap_err();
        assert_eq!(err, DispatchError::Cancelled { generation: 0 });
    }

    #[test]
    fn test_dispatch_translates_best() {
        let p = problem();
        let request = DispatchRequest::new(
            p.vehicles().to_vec(),
            p.passengers().to_vec(),
            {
                let mut nodes = vec![Node::Depot, Node::Vehicle(1), Node::Vehicle(2)];
                nodes.extend((0..5).map(|i| Node::Passenger(10 + i)));
                let mut m = TravelMatrix::new();
                for &a in &nodes {
                    for &b in &nodes {
                        if a != b {
                            m.insert(a, b, 100);
                        }
                    }
                }
                m
            },
            DispatchType::DurationInbound,
        );
        let assignments = dispatch(request, config()).unwrap();
        assert_eq!(assignments.len(), 2);
        let mut ids: Vec<u64> = assignments
            .iter()
            .flat_map(|a| a.passenger_ids.iter().copied())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![10, 11, 12, 13, 14]);
    }
}
