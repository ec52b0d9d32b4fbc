//! `WellSurface` over a terminal framebuffer.

use crate::core::{Tile, WellSurface};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::PieceKind;

const WELL_BG: Rgb = Rgb::new(30, 30, 40);

/// Draws well tiles as blocks of `cell_w` x `cell_h` terminal cells.
pub struct FrameSurface<'a> {
    fb: &'a mut FrameBuffer,
    cell_w: u16,
    cell_h: u16,
}

impl<'a> FrameSurface<'a> {
    pub fn new(fb: &'a mut FrameBuffer, cell_w: u16, cell_h: u16) -> Self {
        Self { fb, cell_w, cell_h }
    }
}

pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

fn tile_glyph(tile: Tile) -> (char, CellStyle) {
    match tile {
        Tile::Background => (
            '·',
            CellStyle {
                fg: Rgb::new(90, 90, 100),
                bg: WELL_BG,
                bold: false,
                dim: true,
            },
        ),
        Tile::Mino(kind) => (
            '█',
            CellStyle {
                fg: piece_color(kind),
                bg: WELL_BG,
                bold: true,
                dim: false,
            },
        ),
        Tile::Ghost => (
            '░',
            CellStyle {
                fg: Rgb::new(140, 140, 140),
                bg: WELL_BG,
                bold: false,
                dim: true,
            },
        ),
    }
}

impl WellSurface for FrameSurface<'_> {
    fn tile_size(&self) -> (u16, u16) {
        (self.cell_w, self.cell_h)
    }

    fn draw_tile(&mut self, x: u16, y: u16, tile: Tile) {
        let (ch, style) = tile_glyph(tile);
        self.fb.fill_rect(x, y, self.cell_w, self.cell_h, ch, style);
    }

    fn fill_overlay(&mut self, x: u16, y: u16, w: u16, h: u16, alpha: u8) {
        self.fb.blend_rect(x, y, w, h, Rgb::WHITE, alpha);
    }
}
