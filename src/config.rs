//! Gameplay tuning knobs.
//!
//! The defaults are the canonical game: three lives, ten points a catch, a new
//! Cupid every second that flies off after two, and a short burst animation
//! after a successful click. Hosts may override any subset (see
//! `CupidGame::with_config` in the bindings).

use std::ops::RangeInclusive;

pub const INITIAL_LIVES: u32 = 3;
pub const CATCH_REWARD: u32 = 10;
pub const SPAWN_INTERVAL_MS: u64 = 1_000;
pub const EXPIRY_MS: u64 = 2_000;
pub const CATCH_DISPLAY_MS: u64 = 300; // burst animation before a caught Cupid disappears

// Spawn area in percent of the play field; the margins keep sprites fully visible.
pub const X_RANGE: (f64, f64) = (10.0, 90.0);
pub const Y_RANGE: (f64, f64) = (10.0, 70.0);

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub initial_lives: u32,
    pub catch_reward: u32,
    pub spawn_interval_ms: u64,
    pub expiry_ms: u64,
    pub catch_display_ms: u64,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_lives: INITIAL_LIVES,
            catch_reward: CATCH_REWARD,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            expiry_ms: EXPIRY_MS,
            catch_display_ms: CATCH_DISPLAY_MS,
            x_range: X_RANGE,
            y_range: Y_RANGE,
        }
    }
}

impl GameConfig {
    /// Clamp degenerate values so the state machine keeps its invariants:
    /// at least one life, a non-zero spawn cadence, and ordered, finite
    /// spawn ranges inside 0..=100.
    pub fn validate(mut self) -> Self {
        self.initial_lives = self.initial_lives.max(1);
        self.spawn_interval_ms = self.spawn_interval_ms.max(1);
        self.x_range = normalize_range(self.x_range, X_RANGE);
        self.y_range = normalize_range(self.y_range, Y_RANGE);
        self
    }

    pub fn x_bounds(&self) -> RangeInclusive<f64> {
        self.x_range.0..=self.x_range.1
    }

    pub fn y_bounds(&self) -> RangeInclusive<f64> {
        self.y_range.0..=self.y_range.1
    }
}

fn normalize_range((lo, hi): (f64, f64), fallback: (f64, f64)) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        return fallback;
    }
    let lo = lo.clamp(0.0, 100.0);
    let hi = hi.clamp(0.0, 100.0);
    if lo <= hi { (lo, hi) } else { (hi, lo) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.initial_lives, 3);
        assert_eq!(cfg.catch_reward, 10);
        assert_eq!(cfg.spawn_interval_ms, 1_000);
        assert_eq!(cfg.expiry_ms, 2_000);
        assert_eq!(cfg.catch_display_ms, 300);
        assert_eq!(cfg.x_bounds(), 10.0..=90.0);
        assert_eq!(cfg.y_bounds(), 10.0..=70.0);
    }

    #[test]
    fn test_validate_clamps_degenerate_values() {
        let cfg = GameConfig {
            initial_lives: 0,
            spawn_interval_ms: 0,
            x_range: (95.0, 5.0),
            y_range: (f64::NAN, 50.0),
            ..GameConfig::default()
        }
        .validate();
        assert_eq!(cfg.initial_lives, 1);
        assert_eq!(cfg.spawn_interval_ms, 1);
        assert_eq!(cfg.x_range, (5.0, 95.0));
        assert_eq!(cfg.y_range, Y_RANGE);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg: GameConfig = serde_json::from_str(r#"{"initial_lives": 5}"#).unwrap();
        assert_eq!(cfg.initial_lives, 5);
        assert_eq!(cfg.catch_reward, CATCH_REWARD);
        assert_eq!(cfg.expiry_ms, EXPIRY_MS);
    }
}
