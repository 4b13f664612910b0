//! Progression state and power-up kinds
//!
//! This is the whole snapshot written to durable storage.

use serde::{Deserialize, Serialize};

use super::achievements::{Achievement, initial_achievements};
use crate::consts::*;
use crate::level_for_score;

/// Power-up types
///
/// Stored as plain lowercase names so unknown kinds survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PowerUpKind {
    Star,
    Heart,
    Gift,
    Other(String),
}

impl PowerUpKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "star" => PowerUpKind::Star,
            "heart" => PowerUpKind::Heart,
            "gift" => PowerUpKind::Gift,
            other => PowerUpKind::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PowerUpKind::Star => "star",
            PowerUpKind::Heart => "heart",
            PowerUpKind::Gift => "gift",
            PowerUpKind::Other(name) => name,
        }
    }

    /// One-time score bonus on activation
    pub fn bonus(&self) -> u64 {
        match self {
            PowerUpKind::Star => STAR_BONUS,
            PowerUpKind::Heart => HEART_BONUS,
            _ => DEFAULT_POWER_UP_BONUS,
        }
    }

    /// Badge shown while active
    pub fn badge(&self) -> &'static str {
        match self {
            PowerUpKind::Star => "⭐",
            PowerUpKind::Heart => "💖",
            PowerUpKind::Gift => "🎁",
            PowerUpKind::Other(_) => "⚡",
        }
    }
}

impl From<String> for PowerUpKind {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<PowerUpKind> for String {
    fn from(kind: PowerUpKind) -> Self {
        kind.name().to_string()
    }
}

/// Complete progression state (serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressionState {
    pub score: u64,
    pub coins: u64,
    pub stars: u64,
    /// Always `score / 1000 + 1` once a mutation has been applied
    pub level: u32,
    pub achievements: Vec<Achievement>,
    /// Multiset: a kind appears once per unexpired activation
    #[serde(rename = "powerUps")]
    pub active_power_ups: Vec<PowerUpKind>,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            score: 0,
            coins: 0,
            stars: 0,
            level: 1,
            achievements: initial_achievements(),
            active_power_ups: Vec::new(),
        }
    }
}

impl ProgressionState {
    pub fn has_power_up(&self, kind: &PowerUpKind) -> bool {
        self.active_power_ups.contains(kind)
    }

    /// Remove a single occurrence of `kind`; returns whether one was found
    pub fn remove_one_power_up(&mut self, kind: &PowerUpKind) -> bool {
        match self.active_power_ups.iter().position(|k| k == kind) {
            Some(idx) => {
                self.active_power_ups.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Level implied by the current score
    pub fn computed_level(&self) -> u32 {
        level_for_score(self.score)
    }

    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.unlocked).count()
    }

    pub fn achievement(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_up_names_roundtrip() {
        for name in ["star", "heart", "gift", "rocket"] {
            assert_eq!(PowerUpKind::from_name(name).name(), name);
        }
        assert_eq!(PowerUpKind::from_name("rocket"), PowerUpKind::Other("rocket".into()));
    }

    #[test]
    fn test_bonus_and_badge() {
        assert_eq!(PowerUpKind::Star.bonus(), 500);
        assert_eq!(PowerUpKind::Heart.bonus(), 300);
        assert_eq!(PowerUpKind::Gift.bonus(), 200);
        assert_eq!(PowerUpKind::Other("x".into()).bonus(), 200);
        assert_eq!(PowerUpKind::Gift.badge(), "🎁");
        assert_eq!(PowerUpKind::Other("x".into()).badge(), "⚡");
    }

    #[test]
    fn test_remove_one_power_up_keeps_duplicates() {
        let mut state = ProgressionState::default();
        state.active_power_ups = vec![PowerUpKind::Star, PowerUpKind::Heart, PowerUpKind::Star];
        assert!(state.remove_one_power_up(&PowerUpKind::Star));
        assert_eq!(state.active_power_ups, vec![PowerUpKind::Heart, PowerUpKind::Star]);
        assert!(!state.remove_one_power_up(&PowerUpKind::Gift));
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut state = ProgressionState::default();
        state.active_power_ups.push(PowerUpKind::Star);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["powerUps"], serde_json::json!(["star"]));
        assert_eq!(json["level"], 1);
        assert_eq!(json["achievements"][0]["id"], "first-coin");

        let back: ProgressionState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let state: ProgressionState = serde_json::from_str(r#"{"score":1500}"#).unwrap();
        assert_eq!(state.score, 1500);
        assert_eq!(state.achievements.len(), 5);
        assert!(state.active_power_ups.is_empty());
    }
}
