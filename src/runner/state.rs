//! Runner state and entity types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;

/// Current phase of the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunnerPhase {
    /// Start screen, nothing ticking
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Hit an obstacle; waits for restart or quit
    GameOver,
}

/// Entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Coin,
    Star,
    Obstacle,
}

impl EntityKind {
    /// Width and height of a freshly spawned entity
    pub fn size(&self) -> Vec2 {
        match self {
            EntityKind::Obstacle => Vec2::splat(OBSTACLE_SIZE),
            EntityKind::Coin | EntityKind::Star => Vec2::splat(PICKUP_SIZE),
        }
    }

    /// Points for collecting (obstacles end the run instead)
    pub fn points(&self) -> u64 {
        match self {
            EntityKind::Coin => RUNNER_COIN_SCORE,
            EntityKind::Star => RUNNER_STAR_SCORE,
            EntityKind::Obstacle => 0,
        }
    }
}

/// A scrolling coin, star or obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct SimEntity {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: EntityKind,
    /// Cleared on collection
    pub active: bool,
}

impl SimEntity {
    pub fn new(kind: EntityKind, pos: Vec2) -> Self {
        Self {
            pos,
            size: kind.size(),
            kind,
            active: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Fully past the left edge
    pub fn off_screen(&self) -> bool {
        self.pos.x < -self.size.x
    }
}

/// The player square. `pos.x` never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerBody {
    pub pos: Vec2,
    pub velocity: f32,
}

impl Default for PlayerBody {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            velocity: 0.0,
        }
    }
}

impl PlayerBody {
    /// Highest `y` the player can reach (standing on the ground)
    pub const FLOOR_Y: f32 = GAME_HEIGHT - PLAYER_SIZE;

    pub fn is_grounded(&self) -> bool {
        self.pos.y >= Self::FLOOR_Y
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(PLAYER_SIZE))
    }

    /// Gravity step with floor/ceiling clamping
    pub fn apply_gravity(&mut self) {
        self.velocity += GRAVITY;
        self.pos.y += self.velocity;

        if self.pos.y >= Self::FLOOR_Y {
            self.pos.y = Self::FLOOR_Y;
            self.velocity = 0.0;
        } else if self.pos.y < 0.0 {
            self.pos.y = 0.0;
        }
    }
}

/// Complete runner state
#[derive(Debug, Clone)]
pub struct RunnerState {
    pub phase: RunnerPhase,
    pub score: u64,
    pub player: PlayerBody,
    /// Live entities in spawn order
    pub entities: Vec<SimEntity>,
    /// Wall-clock time (ms) of the last spawn, or of the run start
    pub last_spawn_ms: f64,
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
}

impl RunnerState {
    /// Create an idle runner with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            phase: RunnerPhase::Idle,
            score: 0,
            player: PlayerBody::default(),
            entities: Vec::new(),
            last_spawn_ms: 0.0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Start (or restart) a run
    pub fn start(&mut self, now_ms: f64) {
        self.phase = RunnerPhase::Running;
        self.score = 0;
        self.player = PlayerBody::default();
        self.entities.clear();
        self.last_spawn_ms = now_ms;
        log::info!("Runner started (seed {})", self.seed);
    }

    /// Leave the game back to the start screen
    pub fn quit(&mut self) {
        self.phase = RunnerPhase::Idle;
        self.entities.clear();
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunnerPhase::Running
    }

    /// Jump if standing on the ground; returns whether it took effect
    pub fn jump(&mut self) -> bool {
        if self.phase != RunnerPhase::Running || !self.player.is_grounded() {
            return false;
        }
        self.player.velocity = JUMP_STRENGTH;
        true
    }

    /// Active entities (what gets drawn)
    pub fn active_entities(&self) -> impl Iterator<Item = &SimEntity> {
        self.entities.iter().filter(|e| e.active)
    }
}
