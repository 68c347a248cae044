//! Two-leg transfer board server.
//!
//! Shows a live board of journeys made of a first ride, a walk between
//! stops, and the earliest onward ride that can still be caught.

pub mod compose;
pub mod config;
pub mod domain;
pub mod session;
pub mod timetable;
pub mod web;
