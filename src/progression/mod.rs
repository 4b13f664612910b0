//! Progression tracker
//!
//! Score, coins, stars, level, timed power-ups and achievements for the
//! page's clicker game. State is client-local and written to durable storage
//! after every mutation.

pub mod achievements;
pub mod state;
pub mod tracker;

pub use achievements::{Achievement, AchievementDef, CATALOG};
pub use state::{PowerUpKind, ProgressionState};
pub use tracker::{Notification, ProgressionTracker};
