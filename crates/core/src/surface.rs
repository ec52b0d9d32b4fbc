//! Drawing seam between the well and a concrete renderer.
//!
//! The well only knows tiles and an overlay; a front-end decides what a tile
//! looks like and how big it is.

use crate::types::PieceKind;

/// What to draw in one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    /// Empty playfield background
    Background,
    /// A settled or falling mino
    Mino(PieceKind),
    /// Landing preview of the falling piece
    Ghost,
}

/// A target the well can draw itself onto.
///
/// Coordinates are in surface units; the well multiplies board positions by
/// [`WellSurface::tile_size`] and adds the anchor it was given.
pub trait WellSurface {
    /// Size of one board cell as `(width, height)`.
    fn tile_size(&self) -> (u16, u16);

    fn draw_tile(&mut self, x: u16, y: u16, tile: Tile);

    /// Fill a rectangle with a translucent highlight; `alpha` 255 is opaque.
    fn fill_overlay(&mut self, x: u16, y: u16, w: u16, h: u16, alpha: u8);
}
