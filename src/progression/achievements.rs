//! Achievement catalog and unlock rules

use serde::{Deserialize, Serialize};

use super::state::{PowerUpKind, ProgressionState};

/// Static description of an achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// The fixed catalog, in unlock evaluation order
pub const CATALOG: [AchievementDef; 5] = [
    AchievementDef {
        id: "first-coin",
        title: "Coin Collector",
        description: "Collect your first coin",
        icon: "🪙",
    },
    AchievementDef {
        id: "first-star",
        title: "Star Power",
        description: "Activate your first star power-up",
        icon: "⭐",
    },
    AchievementDef {
        id: "first-heart",
        title: "Heart Warmer",
        description: "Activate your first heart power-up",
        icon: "💖",
    },
    AchievementDef {
        id: "score-1000",
        title: "High Scorer",
        description: "Reach 1,000 points",
        icon: "🏆",
    },
    AchievementDef {
        id: "level-5",
        title: "Level Master",
        description: "Reach level 5",
        icon: "🎖️",
    },
];

/// An achievement and its unlock status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked: bool,
    /// Unix timestamp (ms) of the unlock
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<f64>,
}

impl From<&AchievementDef> for Achievement {
    fn from(def: &AchievementDef) -> Self {
        Self {
            id: def.id.to_string(),
            title: def.title.to_string(),
            description: def.description.to_string(),
            icon: def.icon.to_string(),
            unlocked: false,
            unlocked_at: None,
        }
    }
}

impl Achievement {
    /// Whether this achievement's rule holds for `state`
    ///
    /// Unknown ids never unlock.
    pub fn is_satisfied(&self, state: &ProgressionState) -> bool {
        match self.id.as_str() {
            "first-coin" => state.coins >= 1,
            "first-star" => state.has_power_up(&PowerUpKind::Star),
            "first-heart" => state.has_power_up(&PowerUpKind::Heart),
            "score-1000" => state.score >= 1000,
            "level-5" => state.level >= 5,
            _ => false,
        }
    }
}

/// Fresh, fully locked catalog
pub fn initial_achievements() -> Vec<Achievement> {
    CATALOG.iter().map(Achievement::from).collect()
}

/// The catalog with unlock status carried over from `stored` by id
///
/// Catalog entries missing from `stored` start locked. Stored ids outside the
/// catalog are dropped.
pub fn merge_with_catalog(stored: &[Achievement]) -> Vec<Achievement> {
    CATALOG
        .iter()
        .map(|def| {
            let mut achievement = Achievement::from(def);
            if let Some(saved) = stored.iter().find(|a| a.id == def.id) {
                achievement.unlocked = saved.unlocked;
                achievement.unlocked_at = saved.unlocked_at;
            }
            achievement
        })
        .collect()
}
