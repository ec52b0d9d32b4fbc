//! Fade-out timer for rows pending clearance.
//!
//! The fade is plain data advanced by frame time; the well checks
//! [`LineClearFade::advance`] each frame and collapses rows once it reports
//! completion.

#[derive(Debug, Clone)]
pub struct LineClearFade {
    duration_ms: u32,
    elapsed_ms: u32,
    running: bool,
}

impl LineClearFade {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            elapsed_ms: 0,
            running: false,
        }
    }

    /// Restart from fully opaque.
    pub fn start(&mut self) {
        self.elapsed_ms = 0;
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Advance the fade. Returns true on the frame it completes.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        if self.elapsed_ms >= self.duration_ms {
            self.elapsed_ms = self.duration_ms;
            self.running = false;
            return true;
        }
        false
    }

    /// Overlay alpha: 255 at the start, falling linearly to 0 at the end.
    pub fn alpha(&self) -> u8 {
        if self.duration_ms == 0 {
            return 0;
        }
        let t = (self.elapsed_ms as f64 / self.duration_ms as f64).min(1.0);
        ((1.0 - t) * 255.0) as u8
    }
}
