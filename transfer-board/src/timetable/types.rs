//! Timetable API response DTOs.
//!
//! These types map directly onto the `route.json` response. Nearly every
//! field is optional because the service omits keys rather than sending
//! nulls, and the final entry of `legs` is an arrival stub with no
//! departure or vehicle data.

use serde::Deserialize;

/// Response from `route.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    /// Candidate connections, earliest departure first.
    #[serde(default)]
    pub connections: Vec<ConnectionDto>,
}

/// A single itinerary.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionDto {
    /// Resolved origin name.
    pub from: Option<String>,

    /// Resolved destination name.
    pub to: Option<String>,

    /// Departure from the origin (`YYYY-MM-DD HH:MM:SS`).
    pub departure: Option<String>,

    /// Arrival at the destination (`YYYY-MM-DD HH:MM:SS`).
    pub arrival: Option<String>,

    /// Legs in travel order.
    #[serde(default)]
    pub legs: Vec<LegDto>,
}

/// A leg within a connection.
#[derive(Debug, Clone, Deserialize)]
pub struct LegDto {
    /// Departure time; absent on the final arrival stub.
    pub departure: Option<String>,

    /// Track or platform label.
    pub track: Option<String>,

    /// Vehicle type, e.g. "bus", "tram", "strain", "walk".
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Line identifier.
    pub line: Option<String>,

    /// Final stop of the vehicle.
    pub terminal: Option<String>,
}
