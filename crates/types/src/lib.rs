//! Shared types for the well engine.
//!
//! Everything here is plain data with no dependencies, so it can be used from
//! the core simulation, the terminal front-end and tests alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 22 rows (indexed 0-21, row 0 at the top)
//! - **Spawn anchor**: (3, 0), the top-left corner of the piece's 4x4 box
//!
//! # Timing Defaults
//!
//! All timing values are in milliseconds and are only defaults; the core's
//! `WellConfig` can override each one.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Fixed frame duration supplied by the driving loop |
//! | `GRAVITY_INTERVAL_MS` | 1000 | One forced downward step per interval |
//! | `AUTOREPEAT_DELAY_MS` | 300 | Held-move time before turbo repeat engages |
//! | `NORMAL_REPEAT_MS` | 150 | Repeat interval before turbo |
//! | `TURBO_REPEAT_MS` | 40 | Repeat interval once turbo is engaged |
//! | `LINE_CLEAR_FADE_MS` | 500 | Fade-out duration of cleared rows |
//!
//! # Examples
//!
//! ```
//! use tui_well_types::{InputKind, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_ascii('T'), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.as_ascii(), 'T');
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(InputKind::ALL.len(), 7);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 22);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (22 rows, the top two act as a spawn buffer)
pub const BOARD_HEIGHT: u8 = 22;

/// Spawn anchor column of the piece's 4x4 box
pub const SPAWN_X: i8 = 3;

/// Spawn anchor row of the piece's 4x4 box
pub const SPAWN_Y: i8 = 0;

/// Fixed frame duration in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity interval (1000ms = one row per second)
pub const GRAVITY_INTERVAL_MS: u32 = 1000;

/// Time a directional input must keep repeating before turbo engages
pub const AUTOREPEAT_DELAY_MS: u32 = 300;

/// Repeat interval for held inputs before turbo
pub const NORMAL_REPEAT_MS: u32 = 150;

/// Repeat interval for held inputs once turbo is engaged
pub const TURBO_REPEAT_MS: u32 = 40;

/// Duration of the fade-out on rows pending clearance
pub const LINE_CLEAR_FADE_MS: u32 = 500;

/// Character used for empty cells in the text dump
pub const ASCII_EMPTY: char = '.';

/// Character used for ghost cells in the text dump
pub const ASCII_GHOST: char = 'g';

/// The seven tetromino piece kinds
///
/// Each kind doubles as the identity of the minos it leaves on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in a fixed order (used to fill randomizer bags).
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse a settled-mino character from the text dump (upper-case only).
    ///
    /// ```
    /// use tui_well_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_ascii('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_ascii('i'), None);
    /// assert_eq!(PieceKind::from_ascii('#'), None);
    /// ```
    pub fn from_ascii(ch: char) -> Option<Self> {
        match ch {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Upper-case identity character used for settled minos.
    pub fn as_ascii(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }
}

/// Piece orientation
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use tui_well_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// ```
    /// use tui_well_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }
}

/// Logical input identities tracked by the well
///
/// - **Left / Right**: horizontal move
/// - **Down**: soft drop (one forced step)
/// - **Up**: hard drop
/// - **A**: rotate counter-clockwise
/// - **B**: rotate clockwise
/// - **C**: tracked, currently unbound in the well
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Left,
    Right,
    Up,
    Down,
    A,
    B,
    C,
}

impl InputKind {
    pub const COUNT: usize = 7;

    pub const ALL: [InputKind; Self::COUNT] = [
        InputKind::Left,
        InputKind::Right,
        InputKind::Up,
        InputKind::Down,
        InputKind::A,
        InputKind::B,
        InputKind::C,
    ];

    /// Dense index for keystate tables.
    #[inline(always)]
    pub fn index(self) -> usize {
        match self {
            InputKind::Left => 0,
            InputKind::Right => 1,
            InputKind::Up => 2,
            InputKind::Down => 3,
            InputKind::A => 4,
            InputKind::B => 5,
            InputKind::C => 6,
        }
    }
}

/// A single down/up transition of a logical input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub kind: InputKind,
    pub down: bool,
}

impl InputEvent {
    pub fn press(kind: InputKind) -> Self {
        Self { kind, down: true }
    }

    pub fn release(kind: InputKind) -> Self {
        Self { kind, down: false }
    }
}

/// A cell on the board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: settled mino of the given kind
pub type Cell = Option<PieceKind>;
