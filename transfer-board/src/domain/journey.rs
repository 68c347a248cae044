//! Composed two-leg journeys.

use super::{Ride, TransitTime};

/// One row of the board: a first ride, the walk, and the matched second ride.
///
/// `second.departure >= adjusted_departure` holds because the second ride
/// was looked up with `adjusted_departure` as its earliest departure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedJourney {
    pub first: Ride,
    pub second: Ride,
    /// First arrival plus the walking time
    pub adjusted_departure: TransitTime,
}

impl ComposedJourney {
    pub fn new(first: Ride, second: Ride, adjusted_departure: TransitTime) -> Self {
        Self {
            first,
            second,
            adjusted_departure,
        }
    }

    /// Minutes spent between stepping off the first ride and boarding the second.
    pub fn transfer_minutes(&self) -> i64 {
        (self.second.departure.datetime() - self.first.arrival.datetime()).num_minutes()
    }
}
