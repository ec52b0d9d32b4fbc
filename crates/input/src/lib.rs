//! Terminal input for the well.
//!
//! Maps `crossterm` key events onto [`crate::types::InputKind`] and turns them
//! into the press/release stream the well consumes, including terminals that
//! never report key releases.

pub mod handler;
pub mod map;

pub use tui_well_types as types;

pub use handler::{FrameEvents, KeyTracker};
pub use map::{map_key, should_quit};
