//! Conversion from timetable DTOs to domain types.

use tracing::warn;

use crate::domain::{Connection, Leg, TransitTime, VehicleKind};

use super::types::{ConnectionDto, LegDto, RouteResponse};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// Failed to parse a timestamp
    #[error("invalid time: {0}")]
    InvalidTime(String),

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Convert a route response into connections, keeping upstream order.
///
/// Connections that cannot be converted are skipped rather than failing
/// the whole response.
pub fn convert_route(response: &RouteResponse) -> Vec<Connection> {
    let mut results = Vec::with_capacity(response.connections.len());

    for (index, dto) in response.connections.iter().enumerate() {
        match convert_connection(dto) {
            Ok(connection) => results.push(connection),
            Err(e) => {
                warn!(
                    index,
                    from = dto.from.as_deref().unwrap_or(""),
                    to = dto.to.as_deref().unwrap_or(""),
                    error = %e,
                    "Skipping unreadable connection"
                );
            }
        }
    }

    results
}

/// Convert a single connection.
pub fn convert_connection(dto: &ConnectionDto) -> Result<Connection, ConversionError> {
    let arrival = dto
        .arrival
        .as_deref()
        .ok_or(ConversionError::MissingField("arrival"))?;
    let arrival =
        TransitTime::parse(arrival).map_err(|_| ConversionError::InvalidTime(arrival.into()))?;

    let mut legs = Vec::with_capacity(dto.legs.len());
    for leg in &dto.legs {
        if let Some(leg) = convert_leg(leg)? {
            legs.push(leg);
        }
    }
    if legs.is_empty() {
        return Err(ConversionError::MissingField("legs"));
    }

    Ok(Connection::new(arrival, legs))
}

/// Convert a leg; arrival stubs without a departure yield `None`.
fn convert_leg(dto: &LegDto) -> Result<Option<Leg>, ConversionError> {
    let Some(departure) = dto.departure.as_deref() else {
        return Ok(None);
    };
    let departure = TransitTime::parse(departure)
        .map_err(|_| ConversionError::InvalidTime(departure.into()))?;

    Ok(Some(Leg {
        line: dto.line.clone().unwrap_or_default(),
        vehicle: VehicleKind::from_type(dto.kind.as_deref().unwrap_or_default()),
        track: dto.track.clone().filter(|t| !t.trim().is_empty()),
        departure,
        terminal: dto.terminal.clone().unwrap_or_default(),
    }))
}
