//! RNG module - 7-bag next-piece queue
//!
//! Each bag holds one of every kind, shuffled with a seeded LCG. Pieces are
//! drawn from the bag until it is empty, then a new bag is shuffled. Equal
//! seeds give equal sequences.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Number of pieces shown by a default preview
pub const PREVIEW_LEN: usize = 5;

/// Longest preview available: the rest of this bag plus the next one never
/// runs short of a full bag.
pub const MAX_PREVIEW: usize = 7;

pub type Preview = ArrayVec<PieceKind, MAX_PREVIEW>;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state would stay zero-heavy for the first draws
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in `[0, max)`
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Fisher-Yates shuffle
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

fn shuffled_bag(rng: &mut SimpleRng) -> [PieceKind; 7] {
    let mut bag = PieceKind::ALL;
    rng.shuffle(&mut bag);
    bag
}

/// Deterministic source of upcoming pieces.
#[derive(Debug, Clone)]
pub struct NextQueue {
    seed: u32,
    bag: [PieceKind; 7],
    bag_index: usize,
    rng: SimpleRng,
}

impl NextQueue {
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let bag = shuffled_bag(&mut rng);
        Self {
            seed,
            bag,
            bag_index: 0,
            rng,
        }
    }

    /// Seed the queue was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Pop the next piece.
    pub fn next(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.bag = shuffled_bag(&mut self.rng);
            self.bag_index = 0;
        }

        let kind = self.bag[self.bag_index];
        self.bag_index += 1;
        kind
    }

    /// The next `count` pieces in draw order, without consuming them.
    ///
    /// `count` is capped at [`MAX_PREVIEW`]. The upcoming bag is previewed on
    /// a copy of the generator, so it matches what [`NextQueue::next`] will
    /// shuffle later.
    pub fn preview(&self, count: usize) -> Preview {
        let count = count.min(MAX_PREVIEW);
        let mut out = Preview::new();
        out.extend(self.bag[self.bag_index..].iter().copied().take(count));

        if out.len() < count {
            let next_bag = shuffled_bag(&mut self.rng.clone());
            let missing = count - out.len();
            out.extend(next_bag.into_iter().take(missing));
        }

        out
    }
}

impl Default for NextQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
