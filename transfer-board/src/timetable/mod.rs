//! Timetable (search.ch `route.json`) client.
//!
//! This module provides an HTTP client for the public timetable API, which
//! answers "how do I get from A to B, departing around this time?".
//!
//! Key characteristics of the API:
//! - Station names are free text; the service resolves them itself
//! - Query times are split into `date` (MM/DD/YYYY) and `time` (HH:MM)
//! - Response timestamps are local wall-clock `YYYY-MM-DD HH:MM:SS`
//! - The last entry of each connection's `legs` is an arrival-only stub

mod client;
mod convert;
mod error;
mod mock;
#[cfg(test)]
pub(crate) mod stub;
mod types;

pub use client::{DEFAULT_BASE_URL, TimetableClient, TimetableConfig, query_params};
pub use convert::{ConversionError, convert_connection, convert_route};
pub use error::TimetableError;
pub use mock::MockTimetable;
pub use types::{ConnectionDto, LegDto, RouteResponse};
