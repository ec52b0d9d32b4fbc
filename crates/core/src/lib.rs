//! Core well logic - pure, deterministic, and testable
//!
//! Everything that decides what happens on the playfield lives here: piece
//! shapes, the settled board, collision checks, input repeat timing, gravity,
//! locking and the line-clear sequence. Nothing in this crate touches a
//! terminal or a clock; time only advances through the `elapsed_ms` handed to
//! [`Well::update`] and [`Session::tick`].
//!
//! # Module Structure
//!
//! - [`piece`]: tetromino shapes in a 4x4 box, one table entry per orientation
//! - [`board`]: 10x22 settled grid, full-row detection, row collapse, text form
//! - [`collision`]: box-against-board tests and the ghost drop
//! - [`keypad`]: held keys, autorepeat and turbo timing
//! - [`gravity`] and [`fade`]: frame-time accumulators
//! - [`well`]: the playfield state machine tying the above together
//! - [`rng`]: seeded 7-bag next-piece queue
//! - [`session`]: a well fed from the queue, one call per frame
//! - [`surface`]: the drawing seam a front-end implements
//!
//! # Example
//!
//! ```
//! use tui_well_core::{Session, WellConfig, WellPhase};
//! use tui_well_core::types::{InputEvent, InputKind, FRAME_MS};
//!
//! let mut session = Session::new(WellConfig::default(), 12345);
//! session.start();
//!
//! // Hard drop the first piece; the next one spawns in the same frame.
//! session.tick(&[InputEvent::press(InputKind::Up)], FRAME_MS);
//! assert_eq!(session.well().board().occupied_count(), 4);
//! assert_eq!(session.well().phase(), WellPhase::Controlled);
//! ```

pub mod board;
pub mod collision;
pub mod config;
pub mod fade;
pub mod gravity;
pub mod keypad;
pub mod piece;
pub mod rng;
pub mod session;
pub mod surface;
pub mod well;

pub use tui_well_types as types;

pub use board::{Board, ClearedRows, ParseBoardError};
pub use collision::{anchor_in_range, drop_row, has_collision};
pub use config::WellConfig;
pub use keypad::{Commands, Keypad, Shift, Spin};
pub use piece::{get_shape, Piece};
pub use rng::{NextQueue, PREVIEW_LEN};
pub use session::Session;
pub use surface::{Tile, WellSurface};
pub use well::{ActivePiece, Well, WellPhase};
