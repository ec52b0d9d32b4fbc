//! Board module - the settled-mino grid
//!
//! The board is a 10x22 grid where each cell is empty or holds the kind of
//! the mino that settled there. Storage is a flat row-major array, so locking
//! a piece is a plain value move into a slot.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..21 (top to bottom)

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::types::{Cell, PieceKind, ASCII_EMPTY, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Most rows a single piece can complete at once
pub const MAX_CLEARED_ROWS: usize = 4;

/// Row indices of rows to clear, at most four
pub type ClearedRows = ArrayVec<u8, MAX_CLEARED_ROWS>;

/// Errors from parsing a board fixture
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("board text must be {expected} characters (one line of cells plus a newline per row), got {found}")]
    WrongLength { expected: usize, found: usize },
    #[error("row {row} is not terminated by a newline")]
    MissingRowSeparator { row: usize },
    #[error("unexpected character {ch:?} at row {row}, column {col}")]
    UnexpectedChar { row: usize, col: usize, ch: char },
}

/// The settled board - 10 columns x 22 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// One row of cells
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * BOARD_WIDTH as usize;
        &self.cells[start..start + BOARD_WIDTH as usize]
    }

    fn row_mut(&mut self, y: usize) -> &mut [Cell] {
        let start = y * BOARD_WIDTH as usize;
        &mut self.cells[start..start + BOARD_WIDTH as usize]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Indices of all full rows, top to bottom.
    ///
    /// # Panics
    ///
    /// Panics if more than four rows are full; a single piece cannot complete
    /// more, so the board was corrupted upstream.
    pub fn full_rows(&self) -> ClearedRows {
        let mut rows = ClearedRows::new();
        for y in 0..BOARD_HEIGHT as usize {
            if self.is_row_full(y) && rows.try_push(y as u8).is_err() {
                panic!("more than {MAX_CLEARED_ROWS} full rows on the board");
            }
        }
        rows
    }

    /// Empty every cell of a row without moving anything
    pub fn clear_row(&mut self, y: usize) {
        if y < BOARD_HEIGHT as usize {
            self.row_mut(y).fill(None);
        }
    }

    /// Remove the given rows and let every other row fall into the gaps.
    ///
    /// Surviving rows keep their relative order; the rows freed at the top
    /// come out empty. Scans bottom to top with a write cursor, so each row is
    /// copied at most once.
    pub fn collapse_rows(&mut self, removed: &[u8]) {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if removed.contains(&(read_y as u8)) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                self.cells
                    .copy_within(read_y * width..(read_y + 1) * width, write_y * width);
            }
        }

        for y in 0..write_y {
            self.row_mut(y).fill(None);
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Parse a board from its text form: one line per row, `.` for empty
    /// cells and an upper-case kind letter for settled minos. Every row,
    /// including the last, ends with `\n`.
    pub fn from_ascii(text: &str) -> Result<Self, ParseBoardError> {
        let width = BOARD_WIDTH as usize;
        let height = BOARD_HEIGHT as usize;
        let expected = height * (width + 1);
        let found = text.chars().count();
        if found != expected {
            return Err(ParseBoardError::WrongLength { expected, found });
        }

        let mut board = Self::new();
        let mut chars = text.chars();
        for row in 0..height {
            for col in 0..width {
                let ch = chars.next().unwrap_or('\n');
                let cell = match ch {
                    ASCII_EMPTY => None,
                    _ => match PieceKind::from_ascii(ch) {
                        Some(kind) => Some(kind),
                        None => return Err(ParseBoardError::UnexpectedChar { row, col, ch }),
                    },
                };
                board.cells[row * width + col] = cell;
            }
            if chars.next() != Some('\n') {
                return Err(ParseBoardError::MissingRowSeparator { row });
            }
        }

        Ok(board)
    }

    /// Render the board layer as text (inverse of [`Board::from_ascii`])
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(BOARD_SIZE + BOARD_HEIGHT as usize);
        for y in 0..BOARD_HEIGHT as usize {
            for cell in self.row(y) {
                out.push(cell.map_or(ASCII_EMPTY, |kind| kind.as_ascii()));
            }
            out.push('\n');
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_text() -> String {
        let row = ".".repeat(BOARD_WIDTH as usize) + "\n";
        row.repeat(BOARD_HEIGHT as usize)
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 21), Some(219));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 22), None);
    }

    #[test]
    fn test_from_ascii_reads_cells() {
        let mut text = empty_text();
        // Row 21, column 0.
        let idx = 21 * 11;
        text.replace_range(idx..idx + 1, "J");
        let board = Board::from_ascii(&text).unwrap();
        assert_eq!(board.get(0, 21), Some(Some(PieceKind::J)));
        assert_eq!(board.occupied_count(), 1);
        assert_eq!(board.to_ascii(), text);
    }

    #[test]
    fn test_from_ascii_rejects_wrong_length() {
        let text = ".".repeat(10);
        assert_eq!(
            Board::from_ascii(&text),
            Err(ParseBoardError::WrongLength {
                expected: 242,
                found: 10
            })
        );
    }

    #[test]
    fn test_from_ascii_rejects_missing_separator() {
        let mut text = empty_text();
        text.replace_range(10..11, ".");
        text.push('\n');
        text.remove(0);
        assert_eq!(
            Board::from_ascii(&text),
            Err(ParseBoardError::MissingRowSeparator { row: 0 })
        );
    }

    #[test]
    fn test_from_ascii_rejects_unknown_char() {
        let mut text = empty_text();
        text.replace_range(13..14, "x");
        assert_eq!(
            Board::from_ascii(&text),
            Err(ParseBoardError::UnexpectedChar {
                row: 1,
                col: 2,
                ch: 'x'
            })
        );
    }

    #[test]
    fn test_full_rows_top_to_bottom() {
        let mut board = Board::new();
        for y in [5i8, 20, 21] {
            for x in 0..10 {
                board.set(x, y, Some(PieceKind::I));
            }
        }
        assert_eq!(board.full_rows().as_slice(), &[5, 20, 21]);
    }

    #[test]
    #[should_panic(expected = "full rows")]
    fn test_full_rows_panics_past_four() {
        let mut board = Board::new();
        for y in 17..22 {
            for x in 0..10 {
                board.set(x, y, Some(PieceKind::O));
            }
        }
        board.full_rows();
    }

    #[test]
    fn test_collapse_preserves_order_of_survivors() {
        let mut board = Board::new();
        // Tag rows 15..22 with a marker in a distinct column.
        for y in 15..22i8 {
            board.set(y - 12, y, Some(PieceKind::T));
        }
        // Remove rows 16, 18 and 21 (non-contiguous).
        board.collapse_rows(&[16, 18, 21]);

        // Survivors 15, 17, 19, 20 now sit at 18, 19, 20, 21 in order.
        assert_eq!(board.get(3, 18), Some(Some(PieceKind::T)));
        assert_eq!(board.get(5, 19), Some(Some(PieceKind::T)));
        assert_eq!(board.get(7, 20), Some(Some(PieceKind::T)));
        assert_eq!(board.get(8, 21), Some(Some(PieceKind::T)));
        assert_eq!(board.occupied_count(), 4);
        for y in 0..18 {
            assert!(board.row(y).iter().all(|c| c.is_none()));
        }
    }

    #[test]
    fn test_clear_row_leaves_other_rows() {
        let mut board = Board::new();
        board.set(0, 10, Some(PieceKind::S));
        board.set(0, 11, Some(PieceKind::Z));
        board.clear_row(10);
        assert_eq!(board.get(0, 10), Some(None));
        assert_eq!(board.get(0, 11), Some(Some(PieceKind::Z)));
    }
}
