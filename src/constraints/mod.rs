//! Per-run constraint set.
//!
//! - [`PinTable`] — Hard fixed assignments (passenger pinned to a vehicle seat)
//! - [`CoupleIndex`] — Soft couple preferences

mod couples;
mod fixed;

pub use couples::CoupleIndex;
pub use fixed::PinTable;
