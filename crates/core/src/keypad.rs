//! Keystate tracking and repeat timing for the well.
//!
//! The keypad turns held inputs into at most one set of movement commands per
//! repeat interval. Holding a move starts at the normal repeat rate; once the
//! accumulated hold time passes the autorepeat delay the rate switches to
//! turbo. Releasing any key, rotating, or firing nothing drops back to normal.
//!
//! Time only advances through the `elapsed_ms` passed in by the caller.

use crate::config::WellConfig;
use crate::types::{InputEvent, InputKind};

/// Horizontal move direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    Left,
    Right,
}

/// Rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spin {
    Cw,
    Ccw,
}

/// Commands resolved from the held keys for one repeat step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Commands {
    pub shift: Option<Shift>,
    pub soft_drop: bool,
    pub hard_drop: bool,
    pub spin: Option<Spin>,
}

impl Commands {
    pub fn any(&self) -> bool {
        self.shift.is_some() || self.soft_drop || self.hard_drop || self.spin.is_some()
    }

    /// Moves that build up towards turbo repeat.
    pub fn repeats(&self) -> bool {
        self.shift.is_some() || self.soft_drop
    }
}

type Keystates = [bool; InputKind::COUNT];

#[derive(Debug, Clone)]
pub struct Keypad {
    held: Keystates,
    previous: Keystates,
    autorepeat_ms: u32,
    repeat_rate_ms: u32,
    countdown_ms: u32,
    autorepeat_delay_ms: u32,
    normal_repeat_ms: u32,
    turbo_repeat_ms: u32,
}

impl Keypad {
    pub fn new(config: &WellConfig) -> Self {
        Self {
            held: [false; InputKind::COUNT],
            previous: [false; InputKind::COUNT],
            autorepeat_ms: 0,
            repeat_rate_ms: config.normal_repeat_ms,
            countdown_ms: 0,
            autorepeat_delay_ms: config.autorepeat_delay_ms,
            normal_repeat_ms: config.normal_repeat_ms,
            turbo_repeat_ms: config.turbo_repeat_ms,
        }
    }

    pub fn is_held(&self, kind: InputKind) -> bool {
        self.held[kind.index()]
    }

    pub fn was_held(&self, kind: InputKind) -> bool {
        self.previous[kind.index()]
    }

    pub fn repeat_rate_ms(&self) -> u32 {
        self.repeat_rate_ms
    }

    pub fn is_turbo(&self) -> bool {
        self.repeat_rate_ms == self.turbo_repeat_ms && self.turbo_repeat_ms != self.normal_repeat_ms
    }

    /// Snapshot the previous keystates and apply this frame's transitions.
    ///
    /// Returns whether gravity should be skipped: Down was held both before
    /// and after this frame's events.
    pub fn apply_events(&mut self, events: &[InputEvent]) -> bool {
        self.previous = self.held;
        for event in events {
            self.held[event.kind.index()] = event.down;
        }

        let released = self
            .previous
            .iter()
            .zip(self.held.iter())
            .any(|(&was, &now)| was && !now);
        if released {
            self.reset_autorepeat();
        }

        self.is_held(InputKind::Down) && self.was_held(InputKind::Down)
    }

    /// Advance the repeat countdown; once it runs out, resolve the held keys.
    pub fn poll(&mut self, elapsed_ms: u32) -> Option<Commands> {
        self.countdown_ms = self.countdown_ms.saturating_sub(elapsed_ms);
        if self.countdown_ms > 0 {
            return None;
        }
        Some(self.resolve())
    }

    /// Map held keys to commands. Opposite pairs cancel out.
    pub fn resolve(&self) -> Commands {
        let left = self.is_held(InputKind::Left);
        let right = self.is_held(InputKind::Right);
        let a = self.is_held(InputKind::A);
        let b = self.is_held(InputKind::B);

        Commands {
            shift: match (left, right) {
                (true, false) => Some(Shift::Left),
                (false, true) => Some(Shift::Right),
                _ => None,
            },
            soft_drop: self.is_held(InputKind::Down),
            hard_drop: self.is_held(InputKind::Up),
            spin: match (a, b) {
                (true, false) => Some(Spin::Ccw),
                (false, true) => Some(Spin::Cw),
                _ => None,
            },
        }
    }

    /// Update repeat timing after `commands` were carried out.
    pub fn commit(&mut self, commands: Commands, elapsed_ms: u32) {
        if commands.spin.is_some() {
            self.reset_autorepeat();
        }
        if !commands.any() {
            self.reset_autorepeat();
            return;
        }

        self.countdown_ms = self.repeat_rate_ms;

        if commands.repeats() {
            self.autorepeat_ms = self
                .autorepeat_ms
                .saturating_add(self.repeat_rate_ms + elapsed_ms);
            if self.autorepeat_ms > self.autorepeat_delay_ms {
                self.repeat_rate_ms = self.turbo_repeat_ms;
            }
        } else {
            self.reset_autorepeat();
        }
    }

    pub fn reset_autorepeat(&mut self) {
        self.autorepeat_ms = 0;
        self.repeat_rate_ms = self.normal_repeat_ms;
    }

    /// Treat every key as released and restart repeat timing.
    pub fn release_all(&mut self) {
        self.reset_autorepeat();
        self.countdown_ms = self.repeat_rate_ms;
        self.held = [false; InputKind::COUNT];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FRAME_MS;

    /// Hold `kind` for `frames` frames; return the 1-based frames that fired.
    fn fire_frames(keypad: &mut Keypad, kind: InputKind, frames: u32) -> Vec<u32> {
        let mut fired = Vec::new();
        for frame in 1..=frames {
            let events = if frame == 1 {
                vec![InputEvent::press(kind)]
            } else {
                Vec::new()
            };
            keypad.apply_events(&events);
            if let Some(cmds) = keypad.poll(FRAME_MS) {
                if cmds.any() {
                    fired.push(frame);
                }
                keypad.commit(cmds, FRAME_MS);
            }
        }
        fired
    }

    #[test]
    fn test_first_press_fires_immediately() {
        let mut keypad = Keypad::new(&WellConfig::default());
        keypad.apply_events(&[InputEvent::press(InputKind::Left)]);
        let cmds = keypad.poll(FRAME_MS).unwrap();
        assert_eq!(cmds.shift, Some(Shift::Left));
    }

    #[test]
    fn test_held_move_escalates_to_turbo() {
        let mut keypad = Keypad::new(&WellConfig::default());
        let fired = fire_frames(&mut keypad, InputKind::Left, 30);
        // 150ms apart twice, then every 40ms (3 frames of 16ms).
        assert_eq!(fired, vec![1, 11, 21, 24, 27, 30]);
        assert!(keypad.is_turbo());
    }

    #[test]
    fn test_held_rotation_never_turbos() {
        let mut keypad = Keypad::new(&WellConfig::default());
        let fired = fire_frames(&mut keypad, InputKind::B, 30);
        assert_eq!(fired, vec![1, 11, 21]);
        assert!(!keypad.is_turbo());
    }

    #[test]
    fn test_release_drops_back_to_normal_rate() {
        let mut keypad = Keypad::new(&WellConfig::default());
        fire_frames(&mut keypad, InputKind::Right, 30);
        assert!(keypad.is_turbo());

        keypad.apply_events(&[InputEvent::release(InputKind::Right)]);
        assert!(!keypad.is_turbo());
        assert_eq!(keypad.repeat_rate_ms(), 150);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut keypad = Keypad::new(&WellConfig::default());
        keypad.apply_events(&[
            InputEvent::press(InputKind::Left),
            InputEvent::press(InputKind::Right),
            InputEvent::press(InputKind::A),
            InputEvent::press(InputKind::B),
        ]);
        let cmds = keypad.resolve();
        assert_eq!(cmds.shift, None);
        assert_eq!(cmds.spin, None);
        assert!(!cmds.any());
    }

    #[test]
    fn test_skip_gravity_needs_down_on_two_snapshots() {
        let mut keypad = Keypad::new(&WellConfig::default());
        assert!(!keypad.apply_events(&[InputEvent::press(InputKind::Down)]));
        assert!(keypad.apply_events(&[]));
        assert!(!keypad.apply_events(&[InputEvent::release(InputKind::Down)]));
    }

    #[test]
    fn test_release_all_clears_held_keys_and_restarts_countdown() {
        let mut keypad = Keypad::new(&WellConfig::default());
        keypad.apply_events(&[InputEvent::press(InputKind::Left)]);
        keypad.release_all();
        assert!(!keypad.is_held(InputKind::Left));
        assert!(keypad.poll(FRAME_MS).is_none());
    }

    #[test]
    fn test_last_event_for_a_key_wins() {
        let mut keypad = Keypad::new(&WellConfig::default());
        keypad.apply_events(&[
            InputEvent::press(InputKind::C),
            InputEvent::release(InputKind::C),
        ]);
        assert!(!keypad.is_held(InputKind::C));
    }
}
