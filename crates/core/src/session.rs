//! Session - a well fed from a next-piece queue
//!
//! The well never picks its own pieces. A session pairs it with a
//! [`NextQueue`] and hands a new piece in after any frame that leaves the
//! well waiting for one.

use tracing::debug;

use crate::config::WellConfig;
use crate::rng::NextQueue;
use crate::types::InputEvent;
use crate::well::{Well, WellPhase};

#[derive(Debug, Clone)]
pub struct Session {
    well: Well,
    queue: NextQueue,
    pieces_spawned: u32,
}

impl Session {
    pub fn new(config: WellConfig, seed: u32) -> Self {
        Self::with_well(Well::new(config), seed)
    }

    /// Drive an already prepared well (for example one loaded from a text
    /// fixture).
    pub fn with_well(well: Well, seed: u32) -> Self {
        Self {
            well,
            queue: NextQueue::new(seed),
            pieces_spawned: 0,
        }
    }

    /// Spawn the first piece. Does nothing once a piece has been handed in.
    pub fn start(&mut self) {
        if self.pieces_spawned == 0 {
            debug!(seed = self.queue.seed(), "session started");
            self.spawn_if_needed();
        }
    }

    /// One frame: update the well, then refill it if it wants a piece.
    pub fn tick(&mut self, events: &[InputEvent], elapsed_ms: u32) {
        self.well.update(events, elapsed_ms);
        self.spawn_if_needed();
    }

    fn spawn_if_needed(&mut self) {
        if self.well.requires_new_piece() {
            let kind = self.queue.next();
            self.well.add_piece(kind);
            self.pieces_spawned += 1;
        }
    }

    pub fn well(&self) -> &Well {
        &self.well
    }

    pub fn queue(&self) -> &NextQueue {
        &self.queue
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn is_game_over(&self) -> bool {
        self.well.phase() == WellPhase::GameOver
    }
}
