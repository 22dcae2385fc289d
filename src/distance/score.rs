//! Leg proximity scores.
//!
//! Maps a raw travel cost between two nodes to a dimensionless desirability
//! score. Short legs score high; legs between co-located nodes get the
//! dedicated [`ProximityScore::Colocated`] result.

use crate::models::Metric;

/// Value contributed by a co-located leg when scores are summed.
pub const COLOCATED_SCORE: f64 = 10_000.0;

/// Upper bounds (inclusive) of the distance bands in meters, with their scores.
const DISTANCE_BANDS: [(u32, f64); 5] = [(100, 8.0), (250, 5.0), (500, 1.5), (750, 1.0), (1000, 0.5)];

/// Upper bounds (inclusive) of the duration bands in seconds, with their scores.
const DURATION_BANDS: [(u32, f64); 5] = [(60, 8.0), (180, 5.0), (300, 1.5), (600, 1.0), (900, 0.5)];

/// The score of a single leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProximityScore {
    /// Both ends are effectively the same pickup point.
    Colocated,
    /// A regular banded score.
    Scored(f64),
}

impl ProximityScore {
    /// Numeric contribution to fitness.
    pub fn value(self) -> f64 {
        match self {
            Self::Colocated => COLOCATED_SCORE,
            Self::Scored(s) => s,
        }
    }

    /// Returns `true` for co-located legs.
    pub fn is_colocated(self) -> bool {
        matches!(self, Self::Colocated)
    }
}

impl Metric {
    /// Scores a raw leg cost in this metric's unit.
    ///
    /// Non-increasing in `raw`: a shorter leg never scores lower.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_dispatch::distance::ProximityScore;
    /// use u_dispatch::models::Metric;
    ///
    /// assert_eq!(Metric::Distance.score(0), ProximityScore::Colocated);
    /// assert_eq!(Metric::Distance.score(200), ProximityScore::Scored(5.0));
    /// assert_eq!(Metric::Duration.score(5_000), ProximityScore::Scored(0.0));
    /// ```
    pub fn score(self, raw: u32) -> ProximityScore {
        if raw == 0 {
            return ProximityScore::Colocated;
        }
        let bands = match self {
            Metric::Distance => &DISTANCE_BANDS,
            Metric::Duration => &DURATION_BANDS,
        };
        let score = bands
            .iter()
            .find(|&&(max, _)| raw <= max)
            .map_or(0.0, |&(_, s)| s);
        ProximityScore::Scored(score)
    }

    /// Numerator `K` of the route-cost fitness term `K / (total + 1)`.
    ///
    /// Meters are three orders of magnitude finer than seconds, so distance
    /// uses a proportionally larger constant.
    pub fn fitness_scale(self) -> f64 {
        match self {
            Metric::Distance => 1.0e10,
            Metric::Duration => 1.0e7,
        }
    }
}
