//! Application state for the web layer.

use std::sync::Arc;

use chrono::Utc;
use chrono_tz::Tz;

use crate::compose::ComposeConfig;
use crate::domain::TransitTime;
use crate::session::{RefreshPolicy, SessionStore};
use crate::timetable::TimetableClient;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Timetable API client
    pub timetable: Arc<TimetableClient>,

    /// Per-browser board settings
    pub sessions: Arc<SessionStore>,

    /// Composition configuration
    pub compose: Arc<ComposeConfig>,

    /// Automatic refresh schedule
    pub refresh: RefreshPolicy,

    /// Timezone of the timetable's wall clock
    pub timezone: Tz,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        timetable: TimetableClient,
        sessions: SessionStore,
        compose: ComposeConfig,
        refresh: RefreshPolicy,
        timezone: Tz,
    ) -> Self {
        Self {
            timetable: Arc::new(timetable),
            sessions: Arc::new(sessions),
            compose: Arc::new(compose),
            refresh,
            timezone,
        }
    }

    /// Current wall-clock time in the timetable's timezone.
    pub fn now(&self) -> TransitTime {
        TransitTime::new(Utc::now().with_timezone(&self.timezone).naive_local())
    }
}
