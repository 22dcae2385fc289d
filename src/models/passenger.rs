//! Passenger and couple types.

use serde::{Deserialize, Serialize};

/// A passenger to be picked up (outbound) or dropped off (inbound).
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Passenger;
///
/// let p = Passenger::new(11).with_front_seat(true);
/// assert_eq!(p.id(), 11);
/// assert!(p.requires_front_seat());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    id: u64,
    #[serde(default)]
    front_seat: bool,
}

impl Passenger {
    /// Creates a passenger without a front-seat requirement.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            front_seat: false,
        }
    }

    /// Sets the front-seat requirement.
    pub fn with_front_seat(mut self, front_seat: bool) -> Self {
        self.front_seat = front_seat;
        self
    }

    /// Passenger ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns `true` if this passenger must ride in the front seat.
    pub fn requires_front_seat(&self) -> bool {
        self.front_seat
    }
}

/// Two passengers who should ride together.
///
/// The pair is unordered: `Couple::new(a, b)` and `Couple::new(b, a)` are the
/// same preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Couple {
    first: u64,
    second: u64,
}

impl Couple {
    /// Creates a couple from two passenger IDs.
    pub fn new(first: u64, second: u64) -> Self {
        Self { first, second }
    }

    /// The two passenger IDs as given.
    pub fn members(&self) -> (u64, u64) {
        (self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passenger_defaults() {
        let p = Passenger::new(4);
        assert_eq!(p.id(), 4);
        assert!(!p.requires_front_seat());
    }

    #[test]
    fn test_couple_members() {
        assert_eq!(Couple::new(1, 2).members(), (1, 2));
    }
}
