//! Timing configuration for the well.
//!
//! Defaults come from the constants in `tui_well_types`. Every field can be
//! overridden in code through the `with_*` builders or from JSON, where
//! missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};

use crate::types::{
    AUTOREPEAT_DELAY_MS, GRAVITY_INTERVAL_MS, LINE_CLEAR_FADE_MS, NORMAL_REPEAT_MS,
    TURBO_REPEAT_MS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WellConfig {
    pub gravity_interval_ms: u32,
    pub autorepeat_delay_ms: u32,
    pub normal_repeat_ms: u32,
    pub turbo_repeat_ms: u32,
    pub line_clear_fade_ms: u32,
}

impl WellConfig {
    pub fn with_gravity_interval_ms(mut self, ms: u32) -> Self {
        self.gravity_interval_ms = ms;
        self
    }

    pub fn with_autorepeat_delay_ms(mut self, ms: u32) -> Self {
        self.autorepeat_delay_ms = ms;
        self
    }

    /// Override both repeat rates at once.
    pub fn with_repeat_ms(mut self, normal_ms: u32, turbo_ms: u32) -> Self {
        self.normal_repeat_ms = normal_ms;
        self.turbo_repeat_ms = turbo_ms;
        self
    }

    pub fn with_line_clear_fade_ms(mut self, ms: u32) -> Self {
        self.line_clear_fade_ms = ms;
        self
    }
}

impl Default for WellConfig {
    fn default() -> Self {
        Self {
            gravity_interval_ms: GRAVITY_INTERVAL_MS,
            autorepeat_delay_ms: AUTOREPEAT_DELAY_MS,
            normal_repeat_ms: NORMAL_REPEAT_MS,
            turbo_repeat_ms: TURBO_REPEAT_MS,
            line_clear_fade_ms: LINE_CLEAR_FADE_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let cfg: WellConfig = serde_json::from_str(r#"{"turbo_repeat_ms": 25}"#).unwrap();
        assert_eq!(cfg.turbo_repeat_ms, 25);
        assert_eq!(cfg.normal_repeat_ms, NORMAL_REPEAT_MS);
        assert_eq!(cfg.gravity_interval_ms, GRAVITY_INTERVAL_MS);
    }

    #[test]
    fn test_builders_override_fields() {
        let cfg = WellConfig::default()
            .with_gravity_interval_ms(16)
            .with_repeat_ms(16, 8)
            .with_autorepeat_delay_ms(100)
            .with_line_clear_fade_ms(64);
        assert_eq!(cfg.gravity_interval_ms, 16);
        assert_eq!(cfg.normal_repeat_ms, 16);
        assert_eq!(cfg.turbo_repeat_ms, 8);
        assert_eq!(cfg.autorepeat_delay_ms, 100);
        assert_eq!(cfg.line_clear_fade_ms, 64);
    }
}
