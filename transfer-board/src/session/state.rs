//! Per-session board settings.

use crate::compose::BoardRequest;
use crate::domain::{StationPair, TransitTime};

/// Starting values for a new session.
#[derive(Debug, Clone)]
pub struct SessionDefaults {
    pub first: StationPair,
    pub second: StationPair,
    pub walking_minutes: u32,
    /// Journeys shown before any "load more".
    pub initial_count: usize,
    /// Journeys added by each "load more".
    pub load_more_step: usize,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            first: StationPair::new("Zürich, Schlyfi", "Zürich, Kreuzplatz"),
            second: StationPair::new("Zürich Stadelhofen", "Glattbrugg"),
            walking_minutes: 7,
            initial_count: 3,
            load_more_step: 3,
        }
    }
}

/// Values submitted from the settings form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub leg1_from: String,
    pub leg1_to: String,
    pub walking_minutes: u32,
    pub leg2_from: String,
    pub leg2_to: String,
}

/// Mutable state of one browsing session.
///
/// Only the action methods below change it; rendering reads a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub first: StationPair,
    pub second: StationPair,
    pub walking_minutes: u32,
    /// Number of journeys currently displayed.
    pub loaded_connections: usize,
    /// Automatic refreshes served so far.
    pub auto_refreshes: u32,
    load_more_step: usize,
}

impl SessionState {
    /// Fresh state for a new session.
    pub fn new(defaults: &SessionDefaults) -> Self {
        Self {
            first: defaults.first.clone(),
            second: defaults.second.clone(),
            walking_minutes: defaults.walking_minutes,
            loaded_connections: defaults.initial_count.max(1),
            auto_refreshes: 0,
            load_more_step: defaults.load_more_step,
        }
    }

    /// Show `load_more_step` more journeys.
    pub fn load_more(&mut self) {
        self.loaded_connections = self.loaded_connections.saturating_add(self.load_more_step);
    }

    /// Swap the trip direction.
    ///
    /// Leg 1's origin trades places with leg 2's destination, and leg 1's
    /// destination with leg 2's origin. Applying it twice is a no-op.
    pub fn reverse_journey(&mut self) {
        let first = self.second.reversed();
        self.second = self.first.reversed();
        self.first = first;
    }

    /// Apply the settings form. Blank station fields keep their value.
    pub fn apply_settings(&mut self, update: SettingsUpdate) {
        replace_unless_blank(&mut self.first.origin, update.leg1_from);
        replace_unless_blank(&mut self.first.destination, update.leg1_to);
        replace_unless_blank(&mut self.second.origin, update.leg2_from);
        replace_unless_blank(&mut self.second.destination, update.leg2_to);
        self.walking_minutes = update.walking_minutes;
    }

    /// Count one automatic refresh.
    pub fn record_auto_refresh(&mut self) {
        self.auto_refreshes = self.auto_refreshes.saturating_add(1);
    }

    /// The composition request for a board starting at `departure`.
    pub fn board_request(&self, departure: TransitTime) -> BoardRequest {
        BoardRequest {
            first: self.first.clone(),
            second: self.second.clone(),
            departure,
            count: self.loaded_connections,
            walking_minutes: self.walking_minutes,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(&SessionDefaults::default())
    }
}

fn replace_unless_blank(field: &mut String, value: String) {
    let trimmed = value.trim();
    if !trimmed.is_empty() {
        *field = trimmed.to_string();
    }
}
