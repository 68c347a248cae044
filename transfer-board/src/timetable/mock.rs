//! In-memory timetable for tests and offline development.
//!
//! Routes are scripted per (origin, destination). The mock answers the way
//! the real service does: connections departing at or after the query time,
//! earliest first, at most `count` of them.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::compose::ConnectionSource;
use crate::domain::{Connection, JourneyQuery};

use super::error::TimetableError;

/// Scripted answer for one route.
#[derive(Debug, Clone)]
enum MockRoute {
    Connections(Vec<Connection>),
    Status(u16),
}

/// Timetable that serves scripted connections.
#[derive(Debug, Default)]
pub struct MockTimetable {
    routes: Mutex<HashMap<(String, String), MockRoute>>,
    queries: Mutex<Vec<JourneyQuery>>,
}

impl MockTimetable {
    /// Create a mock with no routes; unknown routes return no connections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve these connections for `from` → `to`.
    pub fn with_route(self, from: &str, to: &str, connections: Vec<Connection>) -> Self {
        self.lock_routes()
            .insert(key(from, to), MockRoute::Connections(connections));
        self
    }

    /// Answer `from` → `to` with an HTTP error status.
    pub fn with_failure(self, from: &str, to: &str, status: u16) -> Self {
        self.lock_routes()
            .insert(key(from, to), MockRoute::Status(status));
        self
    }

    /// Every query received so far, in arrival order.
    pub fn queries(&self) -> Vec<JourneyQuery> {
        self.queries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Queries received for one route.
    pub fn queries_for(&self, from: &str, to: &str) -> Vec<JourneyQuery> {
        self.queries()
            .into_iter()
            .filter(|q| q.origin() == from && q.destination() == to)
            .collect()
    }

    fn lock_routes(&self) -> std::sync::MutexGuard<'_, HashMap<(String, String), MockRoute>> {
        self.routes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn answer(&self, query: &JourneyQuery) -> Result<Vec<Connection>, TimetableError> {
        self.queries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(query.clone());

        let route = self
            .lock_routes()
            .get(&key(query.origin(), query.destination()))
            .cloned();

        match route {
            None => Ok(Vec::new()),
            Some(MockRoute::Status(status)) => Err(TimetableError::ApiError {
                status,
                message: format!("mock failure for {}", query.stations()),
            }),
            Some(MockRoute::Connections(connections)) => Ok(connections
                .into_iter()
                .filter(|c| c.departure().is_none_or(|d| d >= query.departure()))
                .take(query.count())
                .collect()),
        }
    }
}

impl ConnectionSource for MockTimetable {
    async fn fetch(&self, query: &JourneyQuery) -> Result<Vec<Connection>, TimetableError> {
        self.answer(query)
    }
}

fn key(from: &str, to: &str) -> (String, String) {
    (from.to_string(), to.to_string())
}
