//! Dispatch cost regimes.

use serde::{Deserialize, Serialize};

/// The raw unit carried by the travel matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Meters.
    Distance,
    /// Seconds.
    Duration,
}

/// Direction of the commute relative to the depot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Depot → passengers → vehicle home (or depot for anchor vehicles).
    Outbound,
    /// Vehicle home (or depot for anchor vehicles) → passengers → depot.
    Inbound,
}

/// One of the four cost regimes a dispatch run is optimized for.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{DispatchType, Direction, Metric};
///
/// let t = DispatchType::DurationInbound;
/// assert_eq!(t.metric(), Metric::Duration);
/// assert_eq!(t.direction(), Direction::Inbound);
/// assert_eq!(DispatchType::new(Metric::Duration, Direction::Inbound), t);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DispatchType {
    DistanceOutbound,
    DistanceInbound,
    DurationOutbound,
    DurationInbound,
}

impl DispatchType {
    /// Composes a dispatch type from its metric and direction.
    pub fn new(metric: Metric, direction: Direction) -> Self {
        match (metric, direction) {
            (Metric::Distance, Direction::Outbound) => Self::DistanceOutbound,
            (Metric::Distance, Direction::Inbound) => Self::DistanceInbound,
            (Metric::Duration, Direction::Outbound) => Self::DurationOutbound,
            (Metric::Duration, Direction::Inbound) => Self::DurationInbound,
        }
    }

    /// Cost metric used by the travel matrix and the cost model.
    pub fn metric(self) -> Metric {
        match self {
            Self::DistanceOutbound | Self::DistanceInbound => Metric::Distance,
            Self::DurationOutbound | Self::DurationInbound => Metric::Duration,
        }
    }

    /// Route direction.
    pub fn direction(self) -> Direction {
        match self {
            Self::DistanceOutbound | Self::DurationOutbound => Direction::Outbound,
            Self::DistanceInbound | Self::DurationInbound => Direction::Inbound,
        }
    }
}
