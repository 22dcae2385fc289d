//! Travel costs and the leg cost model.
//!
//! - [`TravelMatrix`] — Caller-supplied directed cost table keyed by [`Node`](crate::models::Node)
//! - [`CostGrid`] — Dense index-addressed copy used by the evaluator
//! - [`ProximityScore`] — Banded leg score with an explicit co-located variant

mod grid;
mod matrix;
mod score;

pub use grid::CostGrid;
pub use matrix::TravelMatrix;
pub use score::{ProximityScore, COLOCATED_SCORE};
