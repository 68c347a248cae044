//! Station pairs and timetable queries.

use std::fmt;

use super::{DomainError, TransitTime};

/// An (origin, destination) pair of free-text station names.
///
/// Names are passed through to the timetable service, which does its own
/// fuzzy matching, so nothing beyond non-blankness is checked here.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationPair {
    pub origin: String,
    pub destination: String,
}

impl StationPair {
    /// Create a pair from two names.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
        }
    }

    /// The same pair travelled the other way.
    ///
    /// # Examples
    ///
    /// ```
    /// use transfer_board::domain::StationPair;
    ///
    /// let pair = StationPair::new("Zürich Stadelhofen", "Glattbrugg");
    /// assert_eq!(pair.reversed().origin, "Glattbrugg");
    /// assert_eq!(pair.reversed().reversed(), pair);
    /// ```
    pub fn reversed(&self) -> Self {
        Self {
            origin: self.destination.clone(),
            destination: self.origin.clone(),
        }
    }

    /// Check both names are non-blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.origin.trim().is_empty() {
            return Err(DomainError::EmptyStation("origin"));
        }
        if self.destination.trim().is_empty() {
            return Err(DomainError::EmptyStation("destination"));
        }
        Ok(())
    }
}

impl fmt::Debug for StationPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationPair({} -> {})", self.origin, self.destination)
    }
}

impl fmt::Display for StationPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.origin, self.destination)
    }
}

/// A single timetable lookup: which stations, departing when, how many results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyQuery {
    stations: StationPair,
    departure: TransitTime,
    count: usize,
}

impl JourneyQuery {
    /// Create a validated query.
    ///
    /// Fails if either station is blank or `count` is zero.
    pub fn new(
        stations: StationPair,
        departure: TransitTime,
        count: usize,
    ) -> Result<Self, DomainError> {
        stations.validate()?;
        if count == 0 {
            return Err(DomainError::ZeroCount);
        }
        Ok(Self {
            stations,
            departure,
            count,
        })
    }

    pub fn stations(&self) -> &StationPair {
        &self.stations
    }

    pub fn origin(&self) -> &str {
        &self.stations.origin
    }

    pub fn destination(&self) -> &str {
        &self.stations.destination
    }

    /// Earliest departure the timetable should consider.
    pub fn departure(&self) -> TransitTime {
        self.departure
    }

    /// Maximum number of connections requested.
    pub fn count(&self) -> usize {
        self.count
    }
}
