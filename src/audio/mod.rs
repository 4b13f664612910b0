//! Sound cues
//!
//! Gameplay code only names a cue; playback is best effort and never fails
//! the caller. In the browser cues are synthesized with Web Audio oscillators.

use std::cell::RefCell;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Tracker coin collected
    Coin,
    /// Tracker power-up activated
    PowerUp,
    /// Achievement unlocked
    Achievement,
    /// Progression level increased
    LevelUp,
    /// Runner picked up a coin or star
    Collect,
    /// Runner jumped
    Jump,
    /// Runner hit an obstacle
    GameOver,
}

/// Something that can play a cue
pub trait CuePlayer {
    fn play(&self, effect: SoundEffect);
}

/// Cue sink that plays nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCues;

impl CuePlayer for SilentCues {
    fn play(&self, _effect: SoundEffect) {}
}

/// Shared player, so several owners can hold the same audio output
///
/// A cue that arrives while the player is mutably borrowed is dropped.
impl<T: CuePlayer + ?Sized> CuePlayer for Rc<RefCell<T>> {
    fn play(&self, effect: SoundEffect) {
        if let Ok(player) = self.try_borrow() {
            player.play(effect);
        }
    }
}
