//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::compose::{Composition, Skipped};
use crate::domain::{ComposedJourney, Ride, StationPair, VehicleKind};
use crate::session::SettingsUpdate;

/// Settings form submitted from the sidebar.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    pub leg1_from: String,
    pub leg1_to: String,
    /// Walking time in minutes
    pub walking_time: u32,
    pub leg2_from: String,
    pub leg2_to: String,
}

impl From<SettingsForm> for SettingsUpdate {
    fn from(form: SettingsForm) -> Self {
        SettingsUpdate {
            leg1_from: form.leg1_from,
            leg1_to: form.leg1_to,
            walking_minutes: form.walking_time,
            leg2_from: form.leg2_from,
            leg2_to: form.leg2_to,
        }
    }
}

/// Query string of the board page.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// `auto` when the page reloaded itself
    pub refresh: Option<String>,
}

impl IndexQuery {
    pub fn is_auto_refresh(&self) -> bool {
        self.refresh.as_deref() == Some("auto")
    }
}

/// Response for the journey board.
#[derive(Debug, Serialize)]
pub struct JourneysResponse {
    /// Composed journeys, in first-leg order
    pub journeys: Vec<ComposedJourneyResult>,

    /// First-leg candidates without a second leg
    pub skipped: Vec<SkippedResult>,
}

/// One composed journey.
#[derive(Debug, Serialize)]
pub struct ComposedJourneyResult {
    pub first: RideResult,
    pub second: RideResult,

    /// Earliest second-leg departure (`YYYY-MM-DD HH:MM:SS`)
    pub adjusted_departure: String,

    /// Minutes between first arrival and second departure
    pub transfer_minutes: i64,
}

/// One ride of a composed journey.
#[derive(Debug, Serialize)]
pub struct RideResult {
    /// Line identifier
    pub line: String,

    /// "rail" or "bus"
    pub vehicle: VehicleKind,

    /// Track or platform
    pub track: Option<String>,

    /// Final stop of the vehicle
    pub terminal: String,

    /// Boarding station as entered by the user
    pub from: String,

    /// Alighting station as entered by the user
    pub to: String,

    /// Departure time (HH:MM)
    pub departure: String,

    /// Arrival time (HH:MM)
    pub arrival: String,
}

/// A skipped candidate.
#[derive(Debug, Serialize)]
pub struct SkippedResult {
    pub index: usize,
    pub reason: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl JourneysResponse {
    /// Create from a composition, labelling rides with the session's stations.
    pub fn from_composition(
        composition: &Composition,
        first: &StationPair,
        second: &StationPair,
    ) -> Self {
        Self {
            journeys: composition
                .journeys
                .iter()
                .map(|j| ComposedJourneyResult::from_journey(j, first, second))
                .collect(),
            skipped: composition.skipped.iter().map(SkippedResult::from_skipped).collect(),
        }
    }
}

impl ComposedJourneyResult {
    pub fn from_journey(
        journey: &ComposedJourney,
        first: &StationPair,
        second: &StationPair,
    ) -> Self {
        Self {
            first: RideResult::from_ride(&journey.first, first),
            second: RideResult::from_ride(&journey.second, second),
            adjusted_departure: journey.adjusted_departure.timestamp(),
            transfer_minutes: journey.transfer_minutes(),
        }
    }
}

impl RideResult {
    pub fn from_ride(ride: &Ride, stations: &StationPair) -> Self {
        Self {
            line: ride.line.clone(),
            vehicle: ride.vehicle,
            track: ride.track.clone(),
            terminal: ride.terminal.clone(),
            from: stations.origin.clone(),
            to: stations.destination.clone(),
            departure: ride.departure.hhmm(),
            arrival: ride.arrival.hhmm(),
        }
    }
}

impl SkippedResult {
    pub fn from_skipped(skipped: &Skipped) -> Self {
        Self {
            index: skipped.index,
            reason: skipped.reason.to_string(),
        }
    }
}
