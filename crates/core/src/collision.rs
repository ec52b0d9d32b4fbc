//! Collision checks of a piece's 4x4 box against the board.
//!
//! These are pure functions: they read the board and piece and never mutate
//! either, so movement code can probe candidate anchors freely.

use crate::board::Board;
use crate::piece::Piece;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Whether `(x, y)` is a legal anchor for the 4x4 box: at least one of its
/// columns lies on the board and the top row lies within the board.
#[inline]
pub fn anchor_in_range(x: i8, y: i8) -> bool {
    x + 3 >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8
}

/// Test the piece's minos against the board with the box anchored at `(x, y)`.
///
/// A mino left of column 0, right of the last column, or below the last row
/// collides. Otherwise it collides only with a settled mino.
///
/// # Panics
///
/// Panics if the anchor is out of range (see [`anchor_in_range`]).
pub fn has_collision(board: &Board, piece: &Piece, x: i8, y: i8) -> bool {
    assert!(
        anchor_in_range(x, y),
        "collision anchor ({x}, {y}) out of range"
    );

    piece.shape().iter().any(|&(dx, dy)| {
        let bx = x + dx;
        let by = y + dy;
        if bx < 0 || bx >= BOARD_WIDTH as i8 || by >= BOARD_HEIGHT as i8 {
            return true;
        }
        board.is_occupied(bx, by)
    })
}

/// Lowest row the box can reach from `y` by pure vertical drop.
///
/// Never less than `y`. The caller guarantees the piece fits at `(x, y)`.
pub fn drop_row(board: &Board, piece: &Piece, x: i8, y: i8) -> i8 {
    let mut row = y;
    while row + 1 < BOARD_HEIGHT as i8 && !has_collision(board, piece, x, row + 1) {
        row += 1;
    }
    row
}
