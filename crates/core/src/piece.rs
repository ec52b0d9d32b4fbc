//! Piece module - tetromino shapes inside a 4x4 box
//!
//! A piece is a kind plus an orientation. Its occupancy is looked up from a
//! fixed table (one 4-mino shape per kind and rotation); the only mutable part
//! is the orientation. Offsets are `(col, row)` within the 4x4 box, row 0 at
//! the top.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino inside the 4x4 box
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets inside the 4x4 box
pub type PieceShape = [MinoOffset; 4];

/// Side length of the piece box
pub const PIECE_BOX: usize = 4;

/// Shape table indexed by `[kind][rotation]`, rotation order N, E, S, W.
const SHAPES: [[PieceShape; 4]; 7] = [
    // I
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // O
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (2, 1)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
];

fn kind_index(kind: PieceKind) -> usize {
    match kind {
        PieceKind::I => 0,
        PieceKind::O => 1,
        PieceKind::T => 2,
        PieceKind::S => 3,
        PieceKind::Z => 4,
        PieceKind::J => 5,
        PieceKind::L => 6,
    }
}

fn rotation_index(rotation: Rotation) -> usize {
    match rotation {
        Rotation::North => 0,
        Rotation::East => 1,
        Rotation::South => 2,
        Rotation::West => 3,
    }
}

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[kind_index(kind)][rotation_index(rotation)]
}

/// The falling piece: fixed kind, mutable orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    rotation: Rotation,
}

impl Piece {
    /// Create a piece in its spawn orientation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Mino offsets for the current orientation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// 4x4 occupancy grid for the current orientation, indexed `[row][col]`
    pub fn grid(&self) -> [[bool; PIECE_BOX]; PIECE_BOX] {
        let mut grid = [[false; PIECE_BOX]; PIECE_BOX];
        for (col, row) in self.shape() {
            grid[row as usize][col as usize] = true;
        }
        grid
    }

    /// Whether the box cell at `(col, row)` holds a mino
    pub fn is_occupied(&self, col: i8, row: i8) -> bool {
        self.shape().contains(&(col, row))
    }

    pub fn rotate_cw(&mut self) {
        self.rotation = self.rotation.rotate_cw();
    }

    pub fn rotate_ccw(&mut self) {
        self.rotation = self.rotation.rotate_ccw();
    }
}
