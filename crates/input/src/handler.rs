//! Press/release tracking for terminal key events.
//!
//! The well wants level-triggered input: a press when a key goes down and a
//! release when it comes up. Terminals with keyboard enhancement report both.
//! Plain terminals only report presses (and OS key repeats), so a key with no
//! fresh press for a short timeout is treated as released. Once a real release
//! arrives the timeout is no longer needed and is switched off.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::map_key;
use crate::types::{InputEvent, InputKind};

/// Events produced by one [`KeyTracker::update`].
pub type FrameEvents = ArrayVec<InputEvent, 32>;

// Short enough that a single tap does not turn into a long hold, long enough
// to bridge the gap between OS key repeats.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

#[derive(Debug, Clone)]
pub struct KeyTracker {
    held: [bool; InputKind::COUNT],
    since_press_ms: [u32; InputKind::COUNT],
    pending: FrameEvents,
    reports_release: bool,
    key_release_timeout_ms: u32,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self {
            held: [false; InputKind::COUNT],
            since_press_ms: [0; InputKind::COUNT],
            pending: FrameEvents::new(),
            reports_release: false,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Whether the terminal has been seen reporting key releases.
    pub fn reports_release(&self) -> bool {
        self.reports_release
    }

    pub fn is_held(&self, kind: InputKind) -> bool {
        self.held[kind.index()]
    }

    /// Feed one terminal key event. Returns the input it maps to, if any.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<InputKind> {
        let kind = map_key(key.code)?;
        let i = kind.index();

        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.since_press_ms[i] = 0;
                if !self.held[i] {
                    self.held[i] = true;
                    let _ = self.pending.try_push(InputEvent::press(kind));
                }
            }
            KeyEventKind::Release => {
                self.reports_release = true;
                if self.held[i] {
                    self.held[i] = false;
                    let _ = self.pending.try_push(InputEvent::release(kind));
                }
            }
        }

        Some(kind)
    }

    /// Advance the release timeout and collect this frame's events.
    pub fn update(&mut self, elapsed_ms: u32) -> FrameEvents {
        if !self.reports_release {
            for kind in InputKind::ALL {
                let i = kind.index();
                if !self.held[i] {
                    continue;
                }
                self.since_press_ms[i] = self.since_press_ms[i].saturating_add(elapsed_ms);
                if self.since_press_ms[i] > self.key_release_timeout_ms {
                    self.held[i] = false;
                    let _ = self.pending.try_push(InputEvent::release(kind));
                }
            }
        }

        std::mem::take(&mut self.pending)
    }

    /// Forget all held keys without emitting releases.
    pub fn reset(&mut self) {
        self.held = [false; InputKind::COUNT];
        self.since_press_ms = [0; InputKind::COUNT];
        self.pending.clear();
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}
