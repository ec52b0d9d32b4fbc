//! Well module - the playfield state machine
//!
//! The well owns the board, the falling piece and every timer that drives
//! them. A frame is one call to [`Well::update`]:
//!
//! 1. While rows are fading out, only the fade advances; once it ends the
//!    rows collapse and the well waits for a new piece.
//! 2. Otherwise the keypad applies this frame's input events and, when its
//!    repeat countdown allows, resolves held keys into moves.
//! 3. Gravity forces one downward step per interval unless the player is
//!    already holding Down.
//!
//! A downward step that cannot move locks the piece. Locking may complete
//! rows, which empties them, starts the fade and releases all input.
//!
//! New pieces are supplied from outside: whenever [`Well::requires_new_piece`]
//! is true the caller hands one in through [`Well::add_piece`].

use tracing::{debug, trace};

use crate::board::{Board, ClearedRows, ParseBoardError};
use crate::collision::{anchor_in_range, drop_row, has_collision};
use crate::config::WellConfig;
use crate::fade::LineClearFade;
use crate::gravity::Gravity;
use crate::keypad::{Commands, Keypad, Shift, Spin};
use crate::piece::Piece;
use crate::surface::{Tile, WellSurface};
use crate::types::{
    InputEvent, PieceKind, ASCII_GHOST, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_X, SPAWN_Y,
};

/// The piece under player control, anchored by the top-left of its 4x4 box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub piece: Piece,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    fn spawn(kind: PieceKind) -> Self {
        Self {
            piece: Piece::new(kind),
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.piece.kind()
    }

    /// Board coordinates of the piece's minos with the box top at row `y`.
    pub fn minos_at(&self, y: i8) -> [(i8, i8); 4] {
        self.piece.shape().map(|(dx, dy)| (self.x + dx, y + dy))
    }

    /// Board coordinates of the piece's minos.
    pub fn minos(&self) -> [(i8, i8); 4] {
        self.minos_at(self.y)
    }
}

/// Coarse state of the well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellPhase {
    /// No piece, no animation: waiting for [`Well::add_piece`].
    Empty,
    /// A piece is falling under player control.
    Controlled,
    /// Completed rows are fading out; nothing else moves.
    Clearing,
    /// A spawn was blocked. Terminal.
    GameOver,
}

#[derive(Debug, Clone)]
pub struct Well {
    config: WellConfig,
    board: Board,
    active: Option<ActivePiece>,
    ghost_y: i8,
    pending_rows: ClearedRows,
    keypad: Keypad,
    gravity: Gravity,
    fade: LineClearFade,
    skip_gravity: bool,
    game_over: bool,
}

fn on_board(x: i8, y: i8) -> bool {
    x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8
}

impl Well {
    pub fn new(config: WellConfig) -> Self {
        Self::with_board(config, Board::new())
    }

    /// Start from a prepared board (typically parsed from a text fixture).
    pub fn with_board(config: WellConfig, board: Board) -> Self {
        Self {
            board,
            active: None,
            ghost_y: 0,
            pending_rows: ClearedRows::new(),
            keypad: Keypad::new(&config),
            gravity: Gravity::new(config.gravity_interval_ms),
            fade: LineClearFade::new(config.line_clear_fade_ms),
            skip_gravity: false,
            game_over: false,
            config,
        }
    }

    /// Default-configured well over a board parsed with [`Board::from_ascii`].
    pub fn from_ascii(text: &str) -> Result<Self, ParseBoardError> {
        Ok(Self::with_board(WellConfig::default(), Board::from_ascii(text)?))
    }

    pub fn config(&self) -> &WellConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// Landing row of the active piece's box, if there is one.
    pub fn ghost_y(&self) -> Option<i8> {
        self.active.map(|_| self.ghost_y)
    }

    /// Rows fading out, top to bottom. Empty unless clearing.
    pub fn pending_rows(&self) -> &[u8] {
        &self.pending_rows
    }

    /// Overlay alpha for the pending rows while the fade runs.
    pub fn clear_alpha(&self) -> Option<u8> {
        if self.pending_rows.is_empty() {
            None
        } else {
            Some(self.fade.alpha())
        }
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn phase(&self) -> WellPhase {
        if self.game_over {
            WellPhase::GameOver
        } else if !self.pending_rows.is_empty() {
            WellPhase::Clearing
        } else if self.active.is_some() {
            WellPhase::Controlled
        } else {
            WellPhase::Empty
        }
    }

    /// True iff there is no active piece, no fade running and no game over.
    pub fn requires_new_piece(&self) -> bool {
        self.active.is_none() && !self.game_over && !self.fade.is_running()
    }

    /// Spawn a piece of `kind` at the spawn anchor.
    ///
    /// If the spawn position is already blocked the piece is locked where it
    /// stands and the game is over. Rows that lock completes are still
    /// emptied and left pending.
    ///
    /// # Panics
    ///
    /// Panics unless [`Well::requires_new_piece`] is true.
    pub fn add_piece(&mut self, kind: PieceKind) {
        assert!(
            self.requires_new_piece(),
            "add_piece({kind:?}) while the well is {:?}",
            self.phase()
        );

        let active = ActivePiece::spawn(kind);
        self.active = Some(active);
        self.recalculate_ghost();

        if has_collision(&self.board, &active.piece, active.x, active.y) {
            self.lock_and_release();
            self.game_over = true;
            debug!(kind = ?kind, "spawn blocked, game over");
        } else {
            trace!(kind = ?kind, ghost_y = self.ghost_y, "piece spawned");
        }
    }

    /// Advance the well by one frame.
    pub fn update(&mut self, events: &[InputEvent], elapsed_ms: u32) {
        if self.game_over {
            return;
        }

        if !self.pending_rows.is_empty() {
            assert!(self.fade.is_running(), "rows pending without a fade");
            assert!(self.active.is_none(), "active piece during a line clear");
            if self.fade.advance(elapsed_ms) {
                self.collapse_pending_rows();
            }
            return;
        }

        self.skip_gravity = self.keypad.apply_events(events);

        if let Some(commands) = self.keypad.poll(elapsed_ms) {
            self.run_commands(commands);
            self.keypad.commit(commands, elapsed_ms);
        }

        if self.gravity.tick(elapsed_ms) && !self.skip_gravity {
            self.move_down();
        }
    }

    fn run_commands(&mut self, commands: Commands) {
        match commands.shift {
            Some(Shift::Left) => {
                self.move_left();
            }
            Some(Shift::Right) => {
                self.move_right();
            }
            None => {}
        }

        if commands.soft_drop {
            self.move_down();
            self.skip_gravity = true;
        }

        if commands.hard_drop {
            self.hard_drop();
            self.skip_gravity = true;
        }

        if let Some(spin) = commands.spin {
            self.rotate(spin);
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.shift_by(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift_by(1)
    }

    fn shift_by(&mut self, dx: i8) -> bool {
        let Some(mut active) = self.active else {
            return false;
        };

        let x = active.x + dx;
        if !anchor_in_range(x, active.y) || has_collision(&self.board, &active.piece, x, active.y) {
            return false;
        }

        active.x = x;
        self.active = Some(active);
        self.recalculate_ghost();
        true
    }

    /// Step the piece down one row. If it cannot move it is locked instead.
    ///
    /// Returns whether the piece moved.
    pub fn move_down(&mut self) -> bool {
        let Some(mut active) = self.active else {
            return false;
        };

        let y = active.y + 1;
        if anchor_in_range(active.x, y) && !has_collision(&self.board, &active.piece, active.x, y)
        {
            active.y = y;
            self.active = Some(active);
            return true;
        }

        self.lock_and_release();
        false
    }

    /// Jump to the ghost row and lock.
    pub fn hard_drop(&mut self) {
        let Some(mut active) = self.active else {
            return;
        };

        active.y = self.ghost_y;
        self.active = Some(active);
        let moved = self.move_down();
        debug_assert!(!moved, "ghost row was not the landing row");
    }

    /// Rotate with a one-cell wall kick.
    ///
    /// The new orientation is tried in place, then one cell to either side
    /// (towards the left first for clockwise, towards the right first for
    /// counter-clockwise). If nothing fits the piece is left as it was.
    pub fn rotate(&mut self, spin: Spin) -> bool {
        let Some(mut active) = self.active else {
            return false;
        };

        let kicks: [i8; 3] = match spin {
            Spin::Cw => {
                active.piece.rotate_cw();
                [0, -1, 1]
            }
            Spin::Ccw => {
                active.piece.rotate_ccw();
                [0, 1, -1]
            }
        };

        let y = active.y;
        let fit = kicks.iter().map(|dx| active.x + dx).find(|&x| {
            anchor_in_range(x, y) && !has_collision(&self.board, &active.piece, x, y)
        });

        match fit {
            Some(x) => {
                active.x = x;
                self.active = Some(active);
                self.recalculate_ghost();
                true
            }
            None => false,
        }
    }

    fn recalculate_ghost(&mut self) {
        if let Some(active) = self.active {
            self.ghost_y = drop_row(&self.board, &active.piece, active.x, active.y);
        }
    }

    /// Move the active piece's minos into the board and drop the piece.
    fn merge_active(&mut self) -> Option<ActivePiece> {
        let active = self.active.take()?;
        let kind = active.kind();
        for (x, y) in active.minos() {
            self.board.set(x, y, Some(kind));
        }
        Some(active)
    }

    fn lock_and_release(&mut self) {
        let Some(active) = self.merge_active() else {
            return;
        };
        debug!(kind = ?active.kind(), x = active.x, y = active.y, "piece locked");
        self.start_line_clear();
    }

    fn start_line_clear(&mut self) {
        assert!(self.active.is_none(), "line clear check with an active piece");

        let rows = self.board.full_rows();
        if rows.is_empty() {
            return;
        }

        for &row in &rows {
            self.board.clear_row(row as usize);
        }
        debug!(rows = ?rows.as_slice(), "rows complete, fading out");

        self.pending_rows = rows;
        self.fade.start();
        self.keypad.release_all();
    }

    fn collapse_pending_rows(&mut self) {
        assert!(
            !self.pending_rows.is_empty(),
            "row collapse with no pending rows"
        );

        self.board.collapse_rows(&self.pending_rows);
        debug!(rows = ?self.pending_rows.as_slice(), "rows collapsed");
        self.pending_rows.clear();
    }

    /// Text dump of the well: the board layer with the active piece on top.
    ///
    /// Settled minos use their upper-case kind letter, the active piece its
    /// lower-case letter and ghost cells not covered by the piece
    /// [`ASCII_GHOST`]. Every row ends with a newline.
    pub fn as_ascii(&self) -> String {
        let stride = BOARD_WIDTH as usize + 1;
        let mut out: Vec<char> = self.board.to_ascii().chars().collect();

        if let Some(active) = self.active {
            let real = active.kind().as_ascii().to_ascii_lowercase();
            let layers = [
                (active.minos_at(self.ghost_y), ASCII_GHOST),
                (active.minos(), real),
            ];
            for (minos, ch) in layers {
                for (x, y) in minos {
                    if on_board(x, y) {
                        out[y as usize * stride + x as usize] = ch;
                    }
                }
            }
        }

        out.into_iter().collect()
    }

    /// Draw the well with its top-left corner at `(x, y)`.
    ///
    /// Order: background, settled minos, active piece, ghost cells the piece
    /// does not cover, then the fade overlay on pending rows. Reads only.
    pub fn draw<S: WellSurface>(&self, surface: &mut S, x: u16, y: u16) {
        let (tw, th) = surface.tile_size();
        let at = |col: i8, row: i8| (x + col as u16 * tw, y + row as u16 * th);

        for row in 0..BOARD_HEIGHT as i8 {
            for col in 0..BOARD_WIDTH as i8 {
                let (px, py) = at(col, row);
                surface.draw_tile(px, py, Tile::Background);
            }
        }

        for row in 0..BOARD_HEIGHT as i8 {
            for col in 0..BOARD_WIDTH as i8 {
                if let Some(Some(kind)) = self.board.get(col, row) {
                    let (px, py) = at(col, row);
                    surface.draw_tile(px, py, Tile::Mino(kind));
                }
            }
        }

        if let Some(active) = self.active {
            let minos = active.minos();
            for &(col, row) in &minos {
                if on_board(col, row) {
                    let (px, py) = at(col, row);
                    surface.draw_tile(px, py, Tile::Mino(active.kind()));
                }
            }
            for (col, row) in active.minos_at(self.ghost_y) {
                if on_board(col, row) && !minos.contains(&(col, row)) {
                    let (px, py) = at(col, row);
                    surface.draw_tile(px, py, Tile::Ghost);
                }
            }
        }

        if let Some(alpha) = self.clear_alpha() {
            for &row in &self.pending_rows {
                let (px, py) = at(0, row as i8);
                surface.fill_overlay(px, py, tw * BOARD_WIDTH as u16, th, alpha);
            }
        }
    }
}

impl Default for Well {
    fn default() -> Self {
        Self::new(WellConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InputKind, Rotation, FRAME_MS};

    fn place(well: &mut Well, kind: PieceKind, rotation: Rotation, x: i8, y: i8) {
        let mut piece = Piece::new(kind);
        while piece.rotation() != rotation {
            piece.rotate_cw();
        }
        well.active = Some(ActivePiece { piece, x, y });
        well.recalculate_ghost();
    }

    #[derive(Default)]
    struct Recorder {
        tiles: Vec<(u16, u16, Tile)>,
        overlays: Vec<(u16, u16, u16, u16, u8)>,
    }

    impl WellSurface for Recorder {
        fn tile_size(&self) -> (u16, u16) {
            (2, 1)
        }

        fn draw_tile(&mut self, x: u16, y: u16, tile: Tile) {
            self.tiles.push((x, y, tile));
        }

        fn fill_overlay(&mut self, x: u16, y: u16, w: u16, h: u16, alpha: u8) {
            self.overlays.push((x, y, w, h, alpha));
        }
    }

    #[test]
    fn test_new_well_is_empty_and_wants_a_piece() {
        let well = Well::default();
        assert_eq!(well.phase(), WellPhase::Empty);
        assert!(well.requires_new_piece());
        assert_eq!(well.ghost_y(), None);
    }

    #[test]
    fn test_add_piece_spawns_at_anchor_with_ghost_on_floor() {
        let mut well = Well::default();
        well.add_piece(PieceKind::O);
        let active = well.active().unwrap();
        assert_eq!((active.x, active.y), (3, 0));
        assert_eq!(well.ghost_y(), Some(20));
        assert_eq!(well.phase(), WellPhase::Controlled);
        assert!(!well.requires_new_piece());
    }

    #[test]
    #[should_panic(expected = "add_piece")]
    fn test_add_piece_twice_panics() {
        let mut well = Well::default();
        well.add_piece(PieceKind::T);
        well.add_piece(PieceKind::T);
    }

    #[test]
    fn test_walls_stop_horizontal_moves() {
        let mut well = Well::default();
        well.add_piece(PieceKind::O);

        while well.move_left() {}
        assert_eq!(well.active().unwrap().x, -1);
        assert!(!well.move_left());
        assert_eq!(well.active().unwrap().x, -1);

        while well.move_right() {}
        assert_eq!(well.active().unwrap().x, 7);
        assert!(!well.move_right());
    }

    #[test]
    fn test_rotation_kicks_off_the_left_wall() {
        let mut well = Well::default();
        place(&mut well, PieceKind::I, Rotation::West, -1, 5);

        assert!(well.rotate(Spin::Cw));
        let active = well.active().unwrap();
        assert_eq!(active.piece.rotation(), Rotation::North);
        assert_eq!(active.x, 0);
        assert_eq!(well.ghost_y(), Some(20));
    }

    #[test]
    fn test_kick_prefers_left_for_cw_and_right_for_ccw() {
        // The mino under the T's centre blocks both turns in place; either
        // neighbouring column would fit.
        let mut well = Well::default();
        well.board.set(4, 7, Some(PieceKind::Z));

        place(&mut well, PieceKind::T, Rotation::North, 3, 5);
        assert!(well.rotate(Spin::Cw));
        let active = well.active().unwrap();
        assert_eq!(active.piece.rotation(), Rotation::East);
        assert_eq!(active.x, 2);

        place(&mut well, PieceKind::T, Rotation::North, 3, 5);
        assert!(well.rotate(Spin::Ccw));
        let active = well.active().unwrap();
        assert_eq!(active.piece.rotation(), Rotation::West);
        assert_eq!(active.x, 4);
    }

    #[test]
    fn test_blocked_rotation_leaves_piece_untouched() {
        let mut well = Well::default();
        for y in 5..=8 {
            for x in 1..10 {
                well.board.set(x, y, Some(PieceKind::Z));
            }
        }
        place(&mut well, PieceKind::I, Rotation::West, -1, 5);
        let before = well.active();

        assert!(!well.rotate(Spin::Cw));
        assert!(!well.rotate(Spin::Ccw));
        assert_eq!(well.active(), before);
    }

    #[test]
    fn test_blocked_move_down_locks_piece() {
        let mut well = Well::default();
        place(&mut well, PieceKind::O, Rotation::North, 3, 20);

        assert!(!well.move_down());
        assert!(well.active().is_none());
        assert_eq!(well.board().get(4, 20), Some(Some(PieceKind::O)));
        assert_eq!(well.board().get(5, 21), Some(Some(PieceKind::O)));
        assert_eq!(well.phase(), WellPhase::Empty);
    }

    #[test]
    fn test_hard_drop_locks_at_ghost_row() {
        let mut well = Well::default();
        well.board.set(4, 15, Some(PieceKind::L));
        well.add_piece(PieceKind::O);
        assert_eq!(well.ghost_y(), Some(13));

        well.hard_drop();
        assert!(well.active().is_none());
        assert_eq!(well.board().get(4, 14), Some(Some(PieceKind::O)));
        assert_eq!(well.board().get(5, 13), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_gravity_steps_once_per_interval() {
        let mut well = Well::default();
        well.add_piece(PieceKind::T);
        for _ in 0..62 {
            well.update(&[], FRAME_MS);
        }
        assert_eq!(well.active().unwrap().y, 0);
        well.update(&[], FRAME_MS);
        assert_eq!(well.active().unwrap().y, 1);
    }

    #[test]
    fn test_as_ascii_overlays_piece_and_ghost() {
        let mut well = Well::default();
        well.board.set(0, 21, Some(PieceKind::J));
        well.add_piece(PieceKind::T);

        let text = well.as_ascii();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 22);
        assert_eq!(rows[0], "....t.....");
        assert_eq!(rows[1], "...ttt....");
        assert_eq!(rows[20], "....g.....");
        assert_eq!(rows[21], "J..ggg....");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_as_ascii_piece_hides_overlapping_ghost() {
        let mut well = Well::default();
        place(&mut well, PieceKind::O, Rotation::North, 3, 20);
        let text = well.as_ascii();
        assert!(!text.contains(ASCII_GHOST));
        assert_eq!(text.lines().nth(21), Some("....oo...."));
    }

    #[test]
    fn test_draw_emits_layers_in_order_without_mutation() {
        let mut well = Well::default();
        well.board.set(0, 21, Some(PieceKind::S));
        well.add_piece(PieceKind::I);
        let before = well.as_ascii();

        let mut rec = Recorder::default();
        well.draw(&mut rec, 10, 5);

        let backgrounds = rec
            .tiles
            .iter()
            .filter(|t| t.2 == Tile::Background)
            .count();
        assert_eq!(backgrounds, 220);
        assert_eq!(rec.tiles[0], (10, 5, Tile::Background));
        assert_eq!(rec.tiles[220], (10, 5 + 21, Tile::Mino(PieceKind::S)));
        // I north sits on row 1, columns 3..=6; ghost on row 21.
        assert_eq!(rec.tiles[221], (10 + 6, 6, Tile::Mino(PieceKind::I)));
        assert_eq!(rec.tiles[225], (10 + 6, 5 + 21, Tile::Ghost));
        assert_eq!(rec.tiles.len(), 220 + 1 + 4 + 4);
        assert!(rec.overlays.is_empty());
        assert_eq!(well.as_ascii(), before);
    }

    #[test]
    fn test_draw_overlays_pending_rows() {
        let mut well = Well::default();
        for x in 0..10 {
            if !(4..=5).contains(&x) {
                well.board.set(x, 21, Some(PieceKind::L));
            }
        }
        well.add_piece(PieceKind::O);
        well.hard_drop();
        assert_eq!(well.pending_rows(), &[21]);

        let mut rec = Recorder::default();
        well.draw(&mut rec, 0, 0);
        assert_eq!(rec.overlays, vec![(0, 21, 20, 1, 255)]);
    }

    #[test]
    fn test_line_clear_releases_input() {
        let mut well = Well::default();
        for x in 0..10 {
            if !(4..=5).contains(&x) {
                well.board.set(x, 21, Some(PieceKind::L));
            }
        }
        well.add_piece(PieceKind::O);
        well.update(&[InputEvent::press(InputKind::Up)], FRAME_MS);

        assert_eq!(well.phase(), WellPhase::Clearing);
        assert!(!well.keypad().is_held(InputKind::Up));
    }
}
