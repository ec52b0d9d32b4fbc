//! Terminal rendering for the well.
//!
//! A small game-oriented rendering layer: the well draws itself onto a
//! framebuffer through [`FrameSurface`], [`GameView`] adds the frame and side
//! panel, and [`TerminalRenderer`] flushes the changed cells to the terminal.
//! Board cells are two columns wide to compensate for glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod surface;

pub use tui_well_core as core;
pub use tui_well_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::TerminalRenderer;
pub use surface::{piece_color, FrameSurface};
