//! Chromosome evaluation.
//!
//! - [`FitnessEvaluator`] — Route costs, proximity scores, and hard-constraint zeroing

mod evaluator;

pub use evaluator::{Evaluation, FitnessEvaluator};
