//! Cookie-keyed session storage.
//!
//! Sessions live in memory and expire after a period of inactivity. A
//! request without a known session id starts a new session from the
//! defaults.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use moka::future::Cache as MokaCache;
use tokio::sync::Mutex;
use tracing::debug;

use super::state::{SessionDefaults, SessionState};

/// Shared handle to one session's state.
pub type SessionHandle = Arc<Mutex<SessionState>>;

/// Opaque session identifier carried in the session cookie.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// A fresh random identifier.
    pub fn generate() -> Self {
        let bytes: [u8; 16] = rand::random();
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only a prefix, so logs don't leak usable ids
        write!(f, "SessionId({}…)", self.0.get(..6).unwrap_or(&self.0))
    }
}

/// Configuration for the session store.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Sessions unused for this long are dropped.
    pub idle_timeout: Duration,

    /// Maximum number of live sessions.
    pub max_capacity: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(12 * 60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// A resolved session for one request.
pub struct Session {
    pub id: SessionId,
    pub state: SessionHandle,
    /// Whether the session was created by this request.
    pub is_new: bool,
}

/// In-memory session store.
pub struct SessionStore {
    sessions: MokaCache<SessionId, SessionHandle>,
    defaults: SessionDefaults,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new(config: &SessionConfig, defaults: SessionDefaults) -> Self {
        let sessions = MokaCache::builder()
            .time_to_idle(config.idle_timeout)
            .max_capacity(config.max_capacity)
            .build();

        Self { sessions, defaults }
    }

    /// Look up the session named by `id`, or start a new one.
    pub async fn resume(&self, id: Option<&str>) -> Session {
        if let Some(id) = id {
            let id = SessionId(id.to_string());
            if let Some(state) = self.sessions.get(&id).await {
                return Session {
                    id,
                    state,
                    is_new: false,
                };
            }
        }

        let id = SessionId::generate();
        let state = Arc::new(Mutex::new(SessionState::new(&self.defaults)));
        self.sessions.insert(id.clone(), state.clone()).await;
        debug!(session = ?id, live = self.session_count(), "Started session");

        Session {
            id,
            state,
            is_new: true,
        }
    }

    /// Number of live sessions (approximate, for monitoring).
    pub fn session_count(&self) -> u64 {
        self.sessions.entry_count()
    }
}
