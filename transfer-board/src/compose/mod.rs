//! Two-leg journey composer.
//!
//! This module implements the core of the board: fetch first-leg
//! connections, add the walking time to each arrival, and look up the
//! earliest second leg departing after it.

mod composer;
mod config;
mod source;

pub use composer::{
    BoardRequest, ComposeError, Composer, Composition, SECOND_LEG_COUNT, SkipReason, Skipped,
    adjusted_departure,
};
pub use config::ComposeConfig;
pub use source::ConnectionSource;
