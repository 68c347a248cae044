//! Where the composer gets its connections from.

use std::future::Future;

use crate::domain::{Connection, JourneyQuery};
use crate::timetable::{TimetableClient, TimetableError};

/// Trait for fetching connections.
///
/// This abstraction allows the composer to be tested with scripted data.
pub trait ConnectionSource {
    /// Fetch up to `query.count()` connections departing at or after
    /// `query.departure()`, earliest first.
    fn fetch(
        &self,
        query: &JourneyQuery,
    ) -> impl Future<Output = Result<Vec<Connection>, TimetableError>> + Send;
}

impl ConnectionSource for TimetableClient {
    async fn fetch(&self, query: &JourneyQuery) -> Result<Vec<Connection>, TimetableError> {
        TimetableClient::fetch(self, query).await
    }
}
