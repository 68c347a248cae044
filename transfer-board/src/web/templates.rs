//! Askama templates for the web frontend.

use askama::Template;

use crate::compose::{ComposeError, Composition};
use crate::domain::{ComposedJourney, Ride, StationPair};
use crate::session::SessionState;

/// Banner shown when the first leg cannot be fetched.
pub const FETCH_FAILED_MESSAGE: &str =
    "Unable to fetch connections. Please check your inputs and try again.";

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Full board page with settings sidebar.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub settings: SettingsView,
    pub board: BoardView,
    /// Seconds until the page reloads itself, if it should.
    pub refresh_secs: Option<u64>,
}

// ============================================================================
// Fragment Templates (no base.html)
// ============================================================================

/// Journey board fragment.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub board: BoardView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Current inputs, pre-filled into the sidebar form.
#[derive(Debug, Clone)]
pub struct SettingsView {
    pub leg1_from: String,
    pub leg1_to: String,
    pub walking_time: u32,
    pub leg2_from: String,
    pub leg2_to: String,
}

impl SettingsView {
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            leg1_from: state.first.origin.clone(),
            leg1_to: state.first.destination.clone(),
            walking_time: state.walking_minutes,
            leg2_from: state.second.origin.clone(),
            leg2_to: state.second.destination.clone(),
        }
    }
}

/// The journey board: rows, or an error banner.
#[derive(Debug, Clone)]
pub struct BoardView {
    pub journeys: Vec<JourneyView>,
    pub error: Option<String>,
    /// Candidates dropped for want of a second leg.
    pub skipped: usize,
}

impl BoardView {
    /// Build the board for one render of `state`.
    pub fn from_outcome(state: &SessionState, outcome: &Result<Composition, ComposeError>) -> Self {
        match outcome {
            Ok(composition) => Self {
                journeys: composition
                    .journeys
                    .iter()
                    .enumerate()
                    .map(|(i, j)| JourneyView::from_journey(i + 1, j, &state.first, &state.second))
                    .collect(),
                error: None,
                skipped: composition.skipped.len(),
            },
            Err(ComposeError::InvalidQuery(e)) => Self::failed(e.to_string()),
            Err(ComposeError::FirstLeg(_) | ComposeError::NoConnections) => {
                Self::failed(FETCH_FAILED_MESSAGE.to_string())
            }
        }
    }

    fn failed(message: String) -> Self {
        Self {
            journeys: Vec::new(),
            error: Some(message),
            skipped: 0,
        }
    }
}

/// One "Connection k" card.
#[derive(Debug, Clone)]
pub struct JourneyView {
    pub number: usize,
    pub first: RideView,
    pub second: RideView,
    pub transfer_minutes: i64,
}

impl JourneyView {
    pub fn from_journey(
        number: usize,
        journey: &ComposedJourney,
        first: &StationPair,
        second: &StationPair,
    ) -> Self {
        Self {
            number,
            first: RideView::from_ride(&journey.first, first),
            second: RideView::from_ride(&journey.second, second),
            transfer_minutes: journey.transfer_minutes(),
        }
    }
}

/// One side of a card.
#[derive(Debug, Clone)]
pub struct RideView {
    /// e.g. "🚈 S18 to Forch (Track 3)"
    pub caption: String,
    pub departure: String,
    pub arrival: String,
    pub from_label: String,
    pub to_label: String,
}

impl RideView {
    pub fn from_ride(ride: &Ride, stations: &StationPair) -> Self {
        Self {
            caption: ride.caption(),
            departure: ride.departure.hhmm(),
            arrival: ride.arrival.hhmm(),
            from_label: stations.origin.clone(),
            to_label: stations.destination.clone(),
        }
    }
}
