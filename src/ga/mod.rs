//! Genetic algorithm components for passenger dispatch.
//!
//! - [`Chromosome`] — One ordered passenger list per vehicle
//! - [`DispatchProblem`] — Validated input plus population construction
//! - [`operators`] — Band crossover, repair, and swap mutation
//! - [`GeneticEngine`] — Generational loop with progress and cancellation
//! - [`DispatchConfig`] — Run parameters

mod chromosome;
mod config;
mod engine;
pub mod operators;
mod problem;
mod progress;

pub use chromosome::Chromosome;
pub use config::DispatchConfig;
pub use engine::{dispatch, dispatch_with, DispatchOutcome, EngineState, GeneticEngine};
pub use problem::{DispatchProblem, DispatchRequest};
pub use progress::{CancelToken, ProgressError, ProgressReporter, SilentProgress};
