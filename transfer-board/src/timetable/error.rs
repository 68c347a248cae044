//! Timetable client error types.

use std::fmt;

/// Errors from the timetable HTTP client.
///
/// Every variant means "no result" to callers: there is no retry and no
/// partial data.
#[derive(Debug)]
pub enum TimetableError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// Rate limited by the API
    RateLimited,

    /// The client's request limiter was shut down
    Closed,
}

impl TimetableError {
    /// The upstream HTTP status, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TimetableError::ApiError { status, .. } => Some(*status),
            TimetableError::RateLimited => Some(429),
            TimetableError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl fmt::Display for TimetableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimetableError::Http(e) => write!(f, "HTTP error: {e}"),
            TimetableError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            TimetableError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            TimetableError::RateLimited => write!(f, "rate limited by timetable API"),
            TimetableError::Closed => write!(f, "timetable client is shut down"),
        }
    }
}

impl std::error::Error for TimetableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TimetableError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TimetableError {
    fn from(err: reqwest::Error) -> Self {
        TimetableError::Http(err)
    }
}
