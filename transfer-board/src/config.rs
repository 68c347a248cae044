//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use chrono_tz::Tz;

use crate::compose::ComposeConfig;
use crate::session::{RefreshPolicy, SessionConfig};
use crate::timetable::TimetableConfig;

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub timetable: TimetableConfig,
    pub compose: ComposeConfig,
    pub sessions: SessionConfig,
    pub refresh: RefreshPolicy,
    /// Timezone of the timetable's wall clock
    pub timezone: Tz,
    pub static_dir: String,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup, unset keys taking defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timetable = TimetableConfig::new()
            .with_timeout(parse_or(&lookup, "TIMETABLE_TIMEOUT_SECS", 30)?)
            .with_max_concurrent(parse_or(&lookup, "TIMETABLE_MAX_CONCURRENT", 5)?);
        let timetable = match lookup("TIMETABLE_BASE_URL") {
            Some(url) => timetable.with_base_url(url),
            None => timetable,
        };

        let defaults = RefreshPolicy::default();
        let refresh = RefreshPolicy::new(
            Duration::from_secs(parse_or(
                &lookup,
                "TRANSFER_REFRESH_SECS",
                defaults.interval.as_secs(),
            )?),
            parse_or(&lookup, "TRANSFER_REFRESH_LIMIT", defaults.limit)?,
        );

        let sessions = SessionConfig {
            idle_timeout: Duration::from_secs(parse_or(
                &lookup,
                "TRANSFER_SESSION_IDLE_SECS",
                SessionConfig::default().idle_timeout.as_secs(),
            )?),
            ..SessionConfig::default()
        };

        Ok(Self {
            bind: parse_or(&lookup, "TRANSFER_BIND", SocketAddr::from(([127, 0, 0, 1], 3000)))?,
            timetable,
            compose: ComposeConfig::new(parse_or(&lookup, "TRANSFER_BATCH_SIZE", 4)?),
            sessions,
            refresh,
            timezone: parse_or(&lookup, "TRANSFER_TIMEZONE", chrono_tz::CET)?,
            static_dir: lookup("TRANSFER_STATIC_DIR").unwrap_or_else(|| "static".to_string()),
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
