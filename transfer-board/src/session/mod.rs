//! Browsing-session state.
//!
//! Each browser gets its own station settings, walking time and journey
//! count, kept in memory across reloads and auto-refreshes.

mod refresh;
mod state;
mod store;

pub use refresh::RefreshPolicy;
pub use state::{SessionDefaults, SessionState, SettingsUpdate};
pub use store::{Session, SessionConfig, SessionHandle, SessionId, SessionStore};
