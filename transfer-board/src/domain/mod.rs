//! Domain types for the transfer board.
//!
//! Value types for timetable queries and their results. Queries validate
//! their input at construction, so code that receives a `JourneyQuery`
//! can send it upstream as-is.

mod error;
mod journey;
mod leg;
mod station;
mod time;

pub use error::DomainError;
pub use journey::ComposedJourney;
pub use leg::{Connection, Leg, Ride, VehicleKind};
pub use station::{JourneyQuery, StationPair};
pub use time::{TimeError, TransitTime};
