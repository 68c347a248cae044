//! Two-leg journey composition.
//!
//! For every first-leg connection, the second leg is looked up departing
//! no earlier than the first arrival plus the walking time. The upstream
//! service returns the earliest such departure, which becomes the row's
//! second ride.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::{
    ComposedJourney, Connection, DomainError, JourneyQuery, StationPair, TransitTime,
};
use crate::timetable::TimetableError;

use super::config::ComposeConfig;
use super::source::ConnectionSource;

/// Number of connections requested for each second leg.
pub const SECOND_LEG_COUNT: usize = 1;

/// Error from composing a board.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    /// A station field or count was invalid
    #[error("invalid query: {0}")]
    InvalidQuery(#[from] DomainError),

    /// Fetching the first leg failed
    #[error("failed to fetch first leg: {0}")]
    FirstLeg(#[source] TimetableError),

    /// The first leg returned no connections at all
    #[error("no connections found for the first leg")]
    NoConnections,
}

/// Everything needed to compose one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRequest {
    /// Stations of the first leg.
    pub first: StationPair,

    /// Stations of the second leg.
    pub second: StationPair,

    /// Earliest departure for the first leg.
    pub departure: TransitTime,

    /// Number of first-leg candidates to compose.
    pub count: usize,

    /// Minutes between arriving from the first leg and departing on the second.
    pub walking_minutes: u32,
}

/// Why a first-leg candidate produced no row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    /// The first-leg connection had no legs
    #[error("first connection has no legs")]
    FirstLegMissing,

    /// The second-leg lookup failed
    #[error("second leg lookup failed: {0}")]
    SecondLegFailed(String),

    /// The second-leg lookup returned nothing usable
    #[error("no second leg departs after the transfer")]
    SecondLegEmpty,
}

/// A first-leg candidate that was left off the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    /// Position among the first-leg candidates.
    pub index: usize,
    pub reason: SkipReason,
}

/// Result of composition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    /// Composed rows, in first-leg order.
    pub journeys: Vec<ComposedJourney>,

    /// Candidates without a matching second leg, in first-leg order.
    pub skipped: Vec<Skipped>,
}

/// Earliest acceptable second-leg departure for a first-leg arrival.
///
/// # Examples
///
/// ```
/// use transfer_board::compose::adjusted_departure;
/// use transfer_board::domain::TransitTime;
///
/// let arrival = TransitTime::parse("2024-01-01 08:00:00").unwrap();
/// let ready = adjusted_departure(arrival, 7);
/// assert_eq!(ready.timestamp(), "2024-01-01 08:07:00");
/// ```
pub fn adjusted_departure(arrival: TransitTime, walking_minutes: u32) -> TransitTime {
    arrival.plus_minutes(walking_minutes)
}

/// Journey composer.
pub struct Composer<'a, S: ConnectionSource> {
    source: &'a S,
    config: &'a ComposeConfig,
}

impl<'a, S: ConnectionSource + Sync> Composer<'a, S> {
    /// Create a new composer.
    pub fn new(source: &'a S, config: &'a ComposeConfig) -> Self {
        Self { source, config }
    }

    /// Fetch the first leg and compose a full board.
    ///
    /// A failed or empty first leg is an error; no second-leg lookups are
    /// made in that case.
    pub async fn compose_board(&self, request: &BoardRequest) -> Result<Composition, ComposeError> {
        request.second.validate()?;
        let query = JourneyQuery::new(request.first.clone(), request.departure, request.count)?;

        let first_legs = self.source.fetch(&query).await.map_err(|e| {
            warn!(
                stations = %request.first,
                error = %e,
                "First leg lookup failed"
            );
            ComposeError::FirstLeg(e)
        })?;

        if first_legs.is_empty() {
            return Err(ComposeError::NoConnections);
        }

        Ok(self
            .compose(&first_legs, &request.second, request.walking_minutes)
            .await)
    }

    /// Pair each first-leg connection with its second leg.
    ///
    /// Candidates whose second leg cannot be found are skipped; the rest
    /// keep their relative order.
    pub async fn compose(
        &self,
        first_legs: &[Connection],
        second: &StationPair,
        walking_minutes: u32,
    ) -> Composition {
        let mut composition = Composition::default();
        let indexed: Vec<(usize, &Connection)> = first_legs.iter().enumerate().collect();

        for batch in indexed.chunks(self.config.batch_size.max(1)) {
            let futures: Vec<_> = batch
                .iter()
                .map(|&(index, connection)| async move {
                    let outcome = self.compose_one(connection, second, walking_minutes).await;
                    (index, outcome)
                })
                .collect();

            for (index, outcome) in join_all(futures).await {
                match outcome {
                    Ok(journey) => composition.journeys.push(journey),
                    Err(reason) => {
                        warn!(
                            index,
                            stations = %second,
                            reason = %reason,
                            "Skipping candidate"
                        );
                        composition.skipped.push(Skipped { index, reason });
                    }
                }
            }
        }

        debug!(
            candidates = first_legs.len(),
            composed = composition.journeys.len(),
            skipped = composition.skipped.len(),
            "Composition complete"
        );

        composition
    }

    async fn compose_one(
        &self,
        connection: &Connection,
        second: &StationPair,
        walking_minutes: u32,
    ) -> Result<ComposedJourney, SkipReason> {
        let first = connection.first_ride().ok_or(SkipReason::FirstLegMissing)?;
        let adjusted = adjusted_departure(first.arrival, walking_minutes);

        let query = JourneyQuery::new(second.clone(), adjusted, SECOND_LEG_COUNT)
            .map_err(|e| SkipReason::SecondLegFailed(e.to_string()))?;

        let connections = self
            .source
            .fetch(&query)
            .await
            .map_err(|e| SkipReason::SecondLegFailed(e.to_string()))?;

        let second_ride = connections
            .first()
            .and_then(Connection::first_ride)
            .ok_or(SkipReason::SecondLegEmpty)?;

        Ok(ComposedJourney::new(first, second_ride, adjusted))
    }
}
