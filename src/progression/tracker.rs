//! Progression tracker
//!
//! Owns the session's `ProgressionState` plus injected ports for storage,
//! sound and time. After every mutation it recomputes the level, evaluates
//! achievements and rewrites the snapshot.

use super::achievements::{Achievement, merge_with_catalog};
use super::state::{PowerUpKind, ProgressionState};
use crate::audio::{CuePlayer, SoundEffect};
use crate::consts::*;
use crate::platform::{Clock, KeyValueStore};
use crate::schedule::DeferredQueue;

/// Something the UI should show the player
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// Level increased
    LevelUp { level: u32 },
    /// First newly unlocked achievement of an evaluation pass
    AchievementUnlocked(Achievement),
    /// Progress was wiped
    Reset,
}

impl Notification {
    /// Toast title and body
    pub fn text(&self) -> (String, String) {
        match self {
            Notification::LevelUp { level } => (
                "Level Up!".to_string(),
                format!("You've reached level {}!", level),
            ),
            Notification::AchievementUnlocked(a) => (
                "Achievement Unlocked!".to_string(),
                format!("{} {}: {}", a.icon, a.title, a.description),
            ),
            Notification::Reset => (
                "Game Reset".to_string(),
                "All progress has been reset!".to_string(),
            ),
        }
    }
}

pub struct ProgressionTracker {
    state: ProgressionState,
    store: Box<dyn KeyValueStore>,
    cues: Box<dyn CuePlayer>,
    clock: Box<dyn Clock>,
    /// Session-local; never part of the snapshot
    sound_enabled: bool,
    /// Power-up removals keyed by kind, not by activation
    expiries: DeferredQueue<PowerUpKind>,
    notifications: Vec<Notification>,
}

impl ProgressionTracker {
    /// Snapshot key
    pub const STORAGE_KEY: &'static str = "birthdayGameState";

    /// Rehydrate from the stored snapshot, or start fresh
    pub fn new(
        store: Box<dyn KeyValueStore>,
        cues: Box<dyn CuePlayer>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let mut state = Self::load_snapshot(store.as_ref());
        // Older or hand-edited snapshots may carry a stale level or catalog
        state.level = state.computed_level();
        state.achievements = merge_with_catalog(&state.achievements);

        // Activation times are not saved, so restored power-ups get a full
        // duration from now
        let mut expiries = DeferredQueue::new();
        let due = clock.now_ms() + POWER_UP_DURATION_MS;
        for kind in &state.active_power_ups {
            expiries.schedule(due, kind.clone());
        }
        if !expiries.is_empty() {
            log::info!("Restored {} active power-ups", expiries.len());
        }

        Self {
            state,
            store,
            cues,
            clock,
            sound_enabled: true,
            expiries,
            notifications: Vec::new(),
        }
    }

    /// Set the initial sound gate (from settings)
    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    fn load_snapshot(store: &dyn KeyValueStore) -> ProgressionState {
        let Some(json) = store.get(Self::STORAGE_KEY) else {
            log::info!("No saved progress, starting fresh");
            return ProgressionState::default();
        };

        match serde_json::from_str::<ProgressionState>(&json) {
            Ok(state) => {
                log::info!(
                    "Loaded progress: score {}, level {}",
                    state.score,
                    state.computed_level()
                );
                state
            }
            Err(e) => {
                log::warn!("Discarding unreadable saved progress: {}", e);
                store.remove(Self::STORAGE_KEY);
                ProgressionState::default()
            }
        }
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Progress through the current level, `[0, 100)`
    pub fn xp_percentage(&self) -> f64 {
        crate::xp_percentage(self.state.score)
    }

    /// Collect one coin: +1 coin, +100 score
    pub fn collect_coin(&mut self) {
        self.state.coins += 1;
        self.state.score += COIN_SCORE;
        self.play(SoundEffect::Coin);
        self.after_mutation();
    }

    /// Activate a power-up and schedule its expiry
    pub fn activate_power_up(&mut self, kind: PowerUpKind) {
        self.state.score += kind.bonus();
        if kind == PowerUpKind::Star {
            self.state.stars += 1;
        }
        self.state.active_power_ups.push(kind.clone());

        let due = self.clock.now_ms() + POWER_UP_DURATION_MS;
        self.expiries.schedule(due, kind);

        self.play(SoundEffect::PowerUp);
        self.after_mutation();
    }

    /// Fire every power-up expiry that is due; returns how many fired
    ///
    /// Each expiry removes one occurrence of its kind, whichever activation
    /// that occurrence came from.
    pub fn advance_timers(&mut self) -> usize {
        let due = self.expiries.drain_due(self.clock.now_ms());
        if due.is_empty() {
            return 0;
        }
        for kind in &due {
            if self.state.remove_one_power_up(kind) {
                log::debug!("Power-up expired: {}", kind.name());
            }
        }
        self.after_mutation();
        due.len()
    }

    /// When the next power-up expiry is due, if any
    pub fn next_expiry_ms(&self) -> Option<f64> {
        self.expiries.next_due()
    }

    /// Milliseconds until the next expiry is due, never negative
    ///
    /// A host timer should wait this long, call `advance_timers`, then ask
    /// again: a timer that fires early finds nothing due and re-arms for the
    /// remainder.
    pub fn expiry_delay_ms(&self) -> Option<f64> {
        self.next_expiry_ms()
            .map(|due| (due - self.clock.now_ms()).max(0.0))
    }

    /// Wipe all progress back to defaults
    pub fn reset(&mut self) {
        self.state = ProgressionState::default();
        self.expiries.clear();
        self.after_mutation();
        self.notifications.push(Notification::Reset);
        log::info!("Progress reset");
    }

    /// Flip the sound gate; returns the new value
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    /// Take pending notifications (oldest first)
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn play(&self, effect: SoundEffect) {
        if self.sound_enabled {
            self.cues.play(effect);
        }
    }

    /// Level, then achievements, then snapshot
    fn after_mutation(&mut self) {
        let new_level = self.state.computed_level();
        let old_level = self.state.level;
        self.state.level = new_level;
        if new_level > old_level {
            log::info!("Level up: {}", new_level);
            self.notifications
                .push(Notification::LevelUp { level: new_level });
            self.play(SoundEffect::LevelUp);
        }

        self.evaluate_achievements();
        self.save_snapshot();
    }

    /// Unlock every newly satisfied achievement; notify only the first
    fn evaluate_achievements(&mut self) {
        let now = self.clock.now_ms();
        let newly: Vec<usize> = self
            .state
            .achievements
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.unlocked && a.is_satisfied(&self.state))
            .map(|(i, _)| i)
            .collect();

        for &i in &newly {
            let achievement = &mut self.state.achievements[i];
            achievement.unlocked = true;
            achievement.unlocked_at = Some(now);
            log::info!("Achievement unlocked: {}", achievement.id);
        }

        if let Some(&first) = newly.first() {
            let achievement = self.state.achievements[first].clone();
            self.notifications
                .push(Notification::AchievementUnlocked(achievement));
            self.play(SoundEffect::Achievement);
        }
    }

    fn save_snapshot(&self) {
        match serde_json::to_string(&self.state) {
            Ok(json) => {
                if let Err(e) = self.store.set(Self::STORAGE_KEY, &json) {
                    log::warn!("Progress not saved: {}", e);
                }
            }
            Err(e) => log::warn!("Progress not serialized: {}", e),
        }
    }
}
