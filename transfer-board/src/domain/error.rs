//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from transport and API errors.

/// Domain-level errors for query validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A station field was empty or only whitespace
    #[error("station name for {0} must not be empty")]
    EmptyStation(&'static str),

    /// A query asked for zero connections
    #[error("connection count must be at least 1")]
    ZeroCount,
}
