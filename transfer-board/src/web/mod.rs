//! Web layer for the transfer board.
//!
//! Serves the board page, its JSON/HTML fragment, and the session actions.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, SESSION_COOKIE, create_router};
pub use state::AppState;
pub use templates::*;
