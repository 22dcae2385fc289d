//! Run configuration for the dispatch genetic algorithm.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Parameters of a dispatch run.
///
/// Defaults reproduce the production budget: 300 generations over a
/// population of 20 000, mutation rate 0.9, crossover rate 0.7. Every field
/// has a default, so a partial serialized object is accepted.
///
/// # Examples
///
/// ```
/// use u_dispatch::ga::DispatchConfig;
///
/// let config = DispatchConfig::default()
///     .with_population_size(200)
///     .with_max_generations(50)
///     .with_seed(7);
/// assert_eq!(config.population_size, 200);
/// assert_eq!(config.mutation_rate, 0.9);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Number of generations; the loop never stops early.
    pub max_generations: usize,
    /// Individuals kept after each combine-and-truncate step.
    pub population_size: usize,
    /// Probability that an offspring receives a swap mutation.
    pub mutation_rate: f64,
    /// Probability that a parent pair is recombined.
    pub crossover_rate: f64,
    /// RNG seed; `None` draws one from the thread RNG.
    pub seed: Option<u64>,
    /// Construction attempts per individual before giving up.
    pub max_construction_attempts: usize,
    /// Fitness bonus per couple sharing a vehicle; `None` disables it.
    pub couple_bonus: Option<f64>,
    /// Progress range (percent) spanned by the generation loop.
    pub progress_band: (f64, f64),
    /// Build and evaluate individuals on the rayon thread pool.
    pub parallel: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_generations: 300,
            population_size: 20_000,
            mutation_rate: 0.9,
            crossover_rate: 0.7,
            seed: None,
            max_construction_attempts: 100,
            couple_bonus: None,
            progress_band: (20.0, 80.0),
            parallel: true,
        }
    }
}

impl DispatchConfig {
    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Fixes the RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the construction attempt budget per individual.
    pub fn with_max_construction_attempts(mut self, n: usize) -> Self {
        self.max_construction_attempts = n;
        self
    }

    /// Enables the per-couple fitness bonus.
    pub fn with_couple_bonus(mut self, bonus: f64) -> Self {
        self.couple_bonus = Some(bonus);
        self
    }

    /// Sets the progress band reported during the generation loop.
    pub fn with_progress_band(mut self, start: f64, end: f64) -> Self {
        self.progress_band = (start, end);
        self
    }

    /// Enables or disables rayon parallelism.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks that every value is in range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let invalid = |field: &'static str, reason: &str| ValidationError::InvalidConfig {
            field,
            reason: reason.to_string(),
        };
        if self.population_size == 0 {
            return Err(invalid("population_size", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(invalid("mutation_rate", "must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(invalid("crossover_rate", "must be within [0, 1]"));
        }
        if self.max_construction_attempts == 0 {
            return Err(invalid("max_construction_attempts", "must be at least 1"));
        }
        if self
            .couple_bonus
            .is_some_and(|b| !b.is_finite() || b < 0.0)
        {
            return Err(invalid("couple_bonus", "must be finite and non-negative"));
        }
        let (start, end) = self.progress_band;
        if !(0.0..=100.0).contains(&start) || !(0.0..=100.0).contains(&end) || start > end {
            return Err(invalid("progress_band", "must satisfy 0 <= start <= end <= 100"));
        }
        Ok(())
    }

    /// Progress percentage reported when `generation` starts.
    pub fn progress_at(&self, generation: usize) -> f64 {
        let (start, end) = self.progress_band;
        if self.max_generations == 0 {
            return start;
        }
        start + (generation as f64 / self.max_generations as f64) * (end - start)
    }
}
