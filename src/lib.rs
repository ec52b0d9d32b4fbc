//! TUI Well (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as
//! `tui_well::{core, input, term, types}`.

pub use tui_well_core as core;
pub use tui_well_input as input;
pub use tui_well_term as term;
pub use tui_well_types as types;
