//! Birthday Arcade - celebratory page games for the browser
//!
//! Core modules:
//! - `progression`: Score/coin/star tracker with timed power-ups and achievements
//! - `runner`: Side-scroller simulation (gravity, spawning, collisions)
//! - `gateway`: Guestbook persistence boundary with demo-mode fallback
//! - `schedule`: Deferred actions and the cancellable frame loop
//! - `assets`: Best-effort sprite loading state
//! - `renderer`: Canvas 2D drawing with flat-color fallbacks
//! - `audio`: Sound cue vocabulary and Web Audio synth
//! - `gallery`: Photo carousel cursor
//! - `platform`: Clock and durable key/value storage ports

pub mod assets;
pub mod audio;
pub mod error;
pub mod gallery;
pub mod gateway;
pub mod platform;
pub mod progression;
pub mod renderer;
pub mod runner;
pub mod schedule;
pub mod settings;

pub use error::{AssetLoadError, GatewayError, StorageError, ValidationError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Points needed per progression level
    pub const POINTS_PER_LEVEL: u64 = 1000;
    /// Power-up badge lifetime (ms)
    pub const POWER_UP_DURATION_MS: f64 = 3000.0;

    /// Score awarded per tracker coin
    pub const COIN_SCORE: u64 = 100;
    /// Power-up bonuses
    pub const STAR_BONUS: u64 = 500;
    pub const HEART_BONUS: u64 = 300;
    pub const DEFAULT_POWER_UP_BONUS: u64 = 200;

    /// Side-scroller canvas dimensions
    pub const GAME_WIDTH: f32 = 300.0;
    pub const GAME_HEIGHT: f32 = 150.0;

    /// Player defaults - x never changes, the world scrolls past
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_START_Y: f32 = 75.0;

    /// Vertical physics (pixels per tick, pixels per tick²)
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_STRENGTH: f32 = -10.0;

    /// World scroll speed (pixels per tick)
    pub const SCROLL_SPEED: f32 = 3.0;

    /// Minimum time between spawns (ms)
    pub const SPAWN_INTERVAL_MS: f64 = 1500.0;
    /// Spawned entities stay above this margin from the bottom edge
    pub const SPAWN_BOTTOM_MARGIN: f32 = 40.0;
    /// Chance that a spawn is a coin; the rest splits evenly star/obstacle
    pub const COIN_SPAWN_CHANCE: f64 = 0.7;

    /// Entity sizes
    pub const OBSTACLE_SIZE: f32 = 30.0;
    pub const PICKUP_SIZE: f32 = 20.0;

    /// Runner pickup scores
    pub const RUNNER_COIN_SCORE: u64 = 10;
    pub const RUNNER_STAR_SCORE: u64 = 50;
}

/// Level reached at a given score (levels are 1000 points wide)
#[inline]
pub fn level_for_score(score: u64) -> u32 {
    (score / consts::POINTS_PER_LEVEL) as u32 + 1
}

/// Progress through the current level as a percentage in `[0, 100)`
pub fn xp_percentage(score: u64) -> f64 {
    let level = level_for_score(score) as u64;
    let level_start = (level - 1) * consts::POINTS_PER_LEVEL;
    let level_end = level * consts::POINTS_PER_LEVEL;
    (score - level_start) as f64 / (level_end - level_start) as f64 * 100.0
}

/// Format a score with thousands separators (e.g. `12,500`)
pub fn format_score(score: u64) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_for_score(0), 1);
        assert_eq!(level_for_score(999), 1);
        assert_eq!(level_for_score(1000), 2);
        assert_eq!(level_for_score(4000), 5);
    }

    #[test]
    fn test_xp_percentage() {
        assert_eq!(xp_percentage(0), 0.0);
        assert_eq!(xp_percentage(500), 50.0);
        assert_eq!(xp_percentage(1250), 25.0);
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0), "0");
        assert_eq!(format_score(999), "999");
        assert_eq!(format_score(1000), "1,000");
        assert_eq!(format_score(1234567), "1,234,567");
    }

    proptest! {
        #[test]
        fn level_matches_floor_division(score in 0u64..10_000_000) {
            prop_assert_eq!(level_for_score(score) as u64, score / 1000 + 1);
        }

        #[test]
        fn xp_stays_within_band(score in 0u64..10_000_000) {
            let xp = xp_percentage(score);
            prop_assert!((0.0..100.0).contains(&xp));
        }
    }
}
