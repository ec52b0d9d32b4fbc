//! Gravity timer: one forced downward step per interval.

/// Accumulates frame time and reports when a gravity step is due.
///
/// At most one step is reported per call; if a frame spans several
/// intervals the surplus stays in the accumulator instead of bursting.
#[derive(Debug, Clone)]
pub struct Gravity {
    interval_ms: u32,
    accumulated_ms: u32,
}

impl Gravity {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            accumulated_ms: 0,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn accumulated_ms(&self) -> u32 {
        self.accumulated_ms
    }

    /// Advance by `elapsed_ms`; true if a gravity step is due this frame.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed_ms);
        if self.accumulated_ms >= self.interval_ms {
            self.accumulated_ms -= self.interval_ms;
            return true;
        }
        false
    }
}
