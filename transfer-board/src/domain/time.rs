//! Timetable time handling.
//!
//! The timetable service speaks in local wall-clock timestamps of the form
//! `YYYY-MM-DD HH:MM:SS` and expects query times split into a US-style date
//! and an `HH:MM` time. This module wraps those conversions so the rest of
//! the crate never touches format strings.

use std::fmt;

use chrono::{Duration, NaiveDateTime, Timelike};

/// Format used by the timetable for connection and leg timestamps.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Error returned when parsing an invalid timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp {input:?}: expected YYYY-MM-DD HH:MM:SS")]
pub struct TimeError {
    input: String,
}

/// A local wall-clock timestamp as used by the timetable.
///
/// No timezone is attached: the upstream service reports times in the
/// network's local time and accepts query times in the same clock, so
/// arithmetic stays purely additive.
///
/// # Examples
///
/// ```
/// use transfer_board::domain::TransitTime;
///
/// let arrival = TransitTime::parse("2024-01-01 08:00:00").unwrap();
/// let ready = arrival.plus_minutes(7);
/// assert_eq!(ready.to_string(), "08:07");
/// assert_eq!(ready.timestamp(), "2024-01-01 08:07:00");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitTime(NaiveDateTime);

impl TransitTime {
    /// Wrap a chrono timestamp.
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    /// Parse a timestamp in the upstream `YYYY-MM-DD HH:MM:SS` format.
    ///
    /// # Examples
    ///
    /// ```
    /// use transfer_board::domain::TransitTime;
    ///
    /// assert!(TransitTime::parse("2024-03-15 23:59:00").is_ok());
    /// assert!(TransitTime::parse("2024-03-15 23:59").is_err());
    /// assert!(TransitTime::parse("15.03.2024 10:00:00").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
            .map(Self)
            .map_err(|_| TimeError {
                input: s.to_string(),
            })
    }

    /// Returns the underlying chrono timestamp.
    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Add whole minutes, rolling the date over midnight when needed.
    pub fn plus_minutes(&self, minutes: u32) -> Self {
        Self(self.0 + Duration::minutes(i64::from(minutes)))
    }

    /// Hour:minute label used on the board.
    pub fn hhmm(&self) -> String {
        format!("{:02}:{:02}", self.0.hour(), self.0.minute())
    }

    /// Full timestamp in the upstream format.
    pub fn timestamp(&self) -> String {
        self.0.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Date component as sent in the `date` query parameter (MM/DD/YYYY).
    pub fn query_date(&self) -> String {
        self.0.format("%m/%d/%Y").to_string()
    }

    /// Time component as sent in the `time` query parameter (HH:MM).
    pub fn query_time(&self) -> String {
        self.0.format("%H:%M").to_string()
    }
}

impl fmt::Display for TransitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl fmt::Debug for TransitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransitTime({})", self.timestamp())
    }
}
