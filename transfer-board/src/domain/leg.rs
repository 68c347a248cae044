//! Legs, connections and rides.
//!
//! A `Connection` is what the timetable returns for one itinerary: an
//! arrival time and one or more legs. A `Ride` is the single-vehicle view
//! the board needs, taken from the connection's first leg.

use serde::Serialize;

use super::TransitTime;

/// Kind of vehicle serving a leg.
///
/// The board only distinguishes buses from everything else, so any
/// upstream type other than `"bus"` is treated as rail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Rail,
    Bus,
}

impl VehicleKind {
    /// Classify an upstream `type` value.
    ///
    /// # Examples
    ///
    /// ```
    /// use transfer_board::domain::VehicleKind;
    ///
    /// assert_eq!(VehicleKind::from_type("bus"), VehicleKind::Bus);
    /// assert_eq!(VehicleKind::from_type("tram"), VehicleKind::Rail);
    /// assert_eq!(VehicleKind::from_type("strain"), VehicleKind::Rail);
    /// ```
    pub fn from_type(kind: &str) -> Self {
        if kind == "bus" {
            VehicleKind::Bus
        } else {
            VehicleKind::Rail
        }
    }

    /// Glyph shown in front of the line name.
    pub fn glyph(&self) -> &'static str {
        match self {
            VehicleKind::Bus => "🚎",
            VehicleKind::Rail => "🚈",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleKind::Rail => "rail",
            VehicleKind::Bus => "bus",
        }
    }
}

/// One leg of a connection, as reported by the timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    /// Line identifier, e.g. "S18" or "31"
    pub line: String,
    pub vehicle: VehicleKind,
    /// Track or platform label, when the stop has one
    pub track: Option<String>,
    pub departure: TransitTime,
    /// Display name of the line's terminal stop
    pub terminal: String,
}

/// An origin-to-destination itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Arrival at the queried destination
    pub arrival: TransitTime,
    /// Legs in travel order; never contains arrival-only stubs
    pub legs: Vec<Leg>,
}

impl Connection {
    /// Create a connection from its arrival time and legs.
    pub fn new(arrival: TransitTime, legs: Vec<Leg>) -> Self {
        Self { arrival, legs }
    }

    /// Departure of the first leg, if there is one.
    pub fn departure(&self) -> Option<TransitTime> {
        self.legs.first().map(|leg| leg.departure)
    }

    /// The connection's first leg paired with its arrival time.
    ///
    /// Returns `None` for a connection without legs.
    pub fn first_ride(&self) -> Option<Ride> {
        let leg = self.legs.first()?;
        Some(Ride {
            line: leg.line.clone(),
            vehicle: leg.vehicle,
            track: leg.track.clone(),
            departure: leg.departure,
            arrival: self.arrival,
            terminal: leg.terminal.clone(),
        })
    }
}

/// A single-vehicle hop between two stations, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ride {
    pub line: String,
    pub vehicle: VehicleKind,
    pub track: Option<String>,
    pub departure: TransitTime,
    pub arrival: TransitTime,
    pub terminal: String,
}

impl Ride {
    /// "(Track 3)" when a track is known, otherwise empty.
    pub fn track_label(&self) -> String {
        match self.track.as_deref() {
            Some(track) if !track.is_empty() => format!("(Track {track})"),
            _ => String::new(),
        }
    }

    /// Caption shown above the times, e.g. "🚈 S18 to Forch (Track 3)".
    pub fn caption(&self) -> String {
        let mut caption = format!("{} {}", self.vehicle.glyph(), self.line);
        if !self.terminal.is_empty() {
            caption.push_str(" to ");
            caption.push_str(&self.terminal);
        }
        let track = self.track_label();
        if !track.is_empty() {
            caption.push(' ');
            caption.push_str(&track);
        }
        caption
    }
}
