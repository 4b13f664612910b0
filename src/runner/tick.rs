//! Per-frame runner update
//!
//! Advances the simulation once per animation frame.

use glam::Vec2;
use rand::Rng;

use super::state::{EntityKind, RunnerPhase, RunnerState, SimEntity};
use crate::consts::*;
use crate::schedule::LoopControl;

/// Input commands gathered since the last frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space/up arrow/tap)
    pub jump: bool,
}

/// Things that happened during a tick (for sound and HUD)
#[derive(Debug, Clone, PartialEq)]
pub enum RunnerEvent {
    Jumped,
    Spawned(EntityKind),
    Collected { kind: EntityKind, points: u64 },
    GameOver { score: u64 },
}

/// Advance the runner by one frame
///
/// Does nothing unless the runner is `Running`.
pub fn tick(state: &mut RunnerState, input: &TickInput, now_ms: f64) -> Vec<RunnerEvent> {
    let mut events = Vec::new();
    if state.phase != RunnerPhase::Running {
        return events;
    }

    // Gravity and ground contact
    state.player.apply_gravity();

    // Jump (ignored while airborne)
    if input.jump && state.jump() {
        events.push(RunnerEvent::Jumped);
    }

    // Spawn
    if now_ms - state.last_spawn_ms > SPAWN_INTERVAL_MS {
        let entity = spawn_entity(state);
        events.push(RunnerEvent::Spawned(entity.kind));
        state.entities.push(entity);
        state.last_spawn_ms = now_ms;
    }

    // Scroll the world
    for entity in state.entities.iter_mut().filter(|e| e.active) {
        entity.pos.x -= SCROLL_SPEED;
    }

    // Collisions
    let player_rect = state.player.rect();
    for entity in state.entities.iter_mut() {
        if !entity.active || !player_rect.overlaps(&entity.rect()) {
            continue;
        }
        match entity.kind {
            EntityKind::Obstacle => {
                state.phase = RunnerPhase::GameOver;
                log::info!("Runner game over, score {}", state.score);
                events.push(RunnerEvent::GameOver { score: state.score });
                break;
            }
            kind => {
                entity.active = false;
                let points = kind.points();
                state.score += points;
                events.push(RunnerEvent::Collected { kind, points });
            }
        }
    }

    // Cleanup
    state.entities.retain(|e| e.active && !e.off_screen());

    events
}

/// Create a new entity at the right edge with a random height and kind
fn spawn_entity(state: &mut RunnerState) -> SimEntity {
    let rng = &mut state.rng;
    let kind = if rng.random_bool(COIN_SPAWN_CHANCE) {
        EntityKind::Coin
    } else if rng.random_bool(0.5) {
        EntityKind::Star
    } else {
        EntityKind::Obstacle
    };
    let y = rng.random_range(0.0..GAME_HEIGHT - SPAWN_BOTTOM_MARGIN);
    SimEntity::new(kind, Vec2::new(GAME_WIDTH, y))
}

/// Result of one animation frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameStep {
    pub events: Vec<RunnerEvent>,
    /// Whether to request another frame
    pub control: LoopControl,
}

/// One animation frame: tick once assets are settled, then decide whether
/// the loop keeps going
///
/// While assets are still pending nothing ticks but the loop keeps polling.
/// The loop stops once the runner is no longer `Running`; the final frame
/// still gets rendered by the caller.
pub fn frame(
    state: &mut RunnerState,
    input: &TickInput,
    now_ms: f64,
    assets_settled: bool,
) -> FrameStep {
    if !assets_settled {
        return FrameStep {
            events: Vec::new(),
            control: LoopControl::Continue,
        };
    }

    let events = tick(state, input, now_ms);
    let control = if state.is_running() {
        LoopControl::Continue
    } else {
        LoopControl::Stop
    };
    FrameStep { events, control }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::state::PlayerBody;

    fn running(seed: u64) -> RunnerState {
        let mut state = RunnerState::new(seed);
        state.start(0.0);
        state
    }

    fn grounded(seed: u64) -> RunnerState {
        let mut state = running(seed);
        state.player.pos.y = PlayerBody::FLOOR_Y;
        state
    }

    #[test]
    fn test_idle_does_not_tick() {
        let mut state = RunnerState::new(1);
        let events = tick(&mut state, &TickInput { jump: true }, 10_000.0);
        assert!(events.is_empty());
        assert_eq!(state.player, PlayerBody::default());
    }

    #[test]
    fn test_gravity_applied_each_tick() {
        let mut state = running(1);
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.player.velocity, 0.5);
        assert_eq!(state.player.pos.y, 75.5);
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.player.velocity, 1.0);
        assert_eq!(state.player.pos.y, 76.5);
    }

    #[test]
    fn test_jump_when_grounded() {
        let mut state = grounded(1);
        let events = tick(&mut state, &TickInput { jump: true }, 0.0);
        assert_eq!(state.player.velocity, -10.0);
        assert_eq!(events, vec![RunnerEvent::Jumped]);

        // Next tick rises
        tick(&mut state, &TickInput::default(), 0.0);
        assert!(state.player.pos.y < PlayerBody::FLOOR_Y);
    }

    #[test]
    fn test_jump_while_airborne_ignored() {
        let mut state = running(1);
        tick(&mut state, &TickInput::default(), 0.0);
        let velocity = state.player.velocity;
        let events = tick(&mut state, &TickInput { jump: true }, 0.0);
        assert!(events.is_empty());
        assert_eq!(state.player.velocity, velocity + GRAVITY);
    }

    #[test]
    fn test_spawn_interval() {
        let mut state = grounded(7);
        tick(&mut state, &TickInput::default(), 1_500.0);
        assert!(state.entities.is_empty());

        let events = tick(&mut state, &TickInput::default(), 1_501.0);
        assert_eq!(state.entities.len(), 1);
        assert!(matches!(events[0], RunnerEvent::Spawned(_)));
        assert_eq!(state.last_spawn_ms, 1_501.0);

        let e = &state.entities[0];
        // Spawned at the right edge then scrolled once
        assert_eq!(e.pos.x, GAME_WIDTH - SCROLL_SPEED);
        assert!(e.pos.y >= 0.0 && e.pos.y < GAME_HEIGHT - SPAWN_BOTTOM_MARGIN);
        assert_eq!(e.size, e.kind.size());

        tick(&mut state, &TickInput::default(), 2_000.0);
        assert_eq!(state.entities.len(), 1);
    }

    #[test]
    fn test_spawn_mix_is_mostly_coins() {
        let mut state = RunnerState::new(42);
        let mut coins = 0;
        let mut stars = 0;
        let mut obstacles = 0;
        for _ in 0..2_000 {
            match spawn_entity(&mut state).kind {
                EntityKind::Coin => coins += 1,
                EntityKind::Star => stars += 1,
                EntityKind::Obstacle => obstacles += 1,
            }
        }
        assert!((1_250..1_550).contains(&coins), "coins: {}", coins);
        assert!((200..400).contains(&stars), "stars: {}", stars);
        assert!((200..400).contains(&obstacles), "obstacles: {}", obstacles);
    }

    #[test]
    fn test_entities_scroll() {
        let mut state = grounded(1);
        state
            .entities
            .push(SimEntity::new(EntityKind::Coin, Vec2::new(200.0, 0.0)));
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.entities[0].pos.x, 197.0);
    }

    #[test]
    fn test_collect_coin_and_star() {
        let mut state = grounded(1);
        state
            .entities
            .push(SimEntity::new(EntityKind::Coin, Vec2::new(60.0, 125.0)));
        state
            .entities
            .push(SimEntity::new(EntityKind::Star, Vec2::new(65.0, 125.0)));
        let events = tick(&mut state, &TickInput::default(), 0.0);

        assert_eq!(state.score, 60);
        assert!(state.entities.is_empty());
        assert_eq!(
            events,
            vec![
                RunnerEvent::Collected {
                    kind: EntityKind::Coin,
                    points: 10
                },
                RunnerEvent::Collected {
                    kind: EntityKind::Star,
                    points: 50
                },
            ]
        );
    }

    #[test]
    fn test_obstacle_ends_run() {
        let mut state = grounded(1);
        state.score = 40;
        state
            .entities
            .push(SimEntity::new(EntityKind::Obstacle, Vec2::new(60.0, 120.0)));
        let events = tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.phase, RunnerPhase::GameOver);
        assert_eq!(events, vec![RunnerEvent::GameOver { score: 40 }]);

        // Frozen until restart
        state
            .entities
            .push(SimEntity::new(EntityKind::Coin, Vec2::new(60.0, 125.0)));
        let before = state.entities.len();
        let events = tick(&mut state, &TickInput::default(), 100_000.0);
        assert!(events.is_empty());
        assert_eq!(state.score, 40);
        assert_eq!(state.entities.len(), before);

        state.start(200_000.0);
        assert!(state.is_running());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_off_screen_entities_dropped() {
        let mut state = grounded(1);
        state
            .entities
            .push(SimEntity::new(EntityKind::Obstacle, Vec2::new(-28.0, 0.0)));
        state
            .entities
            .push(SimEntity::new(EntityKind::Coin, Vec2::new(-15.0, 0.0)));
        tick(&mut state, &TickInput::default(), 0.0);
        // Obstacle at x=-31 (< -30) is gone; coin at x=-18 (>= -20) stays
        assert_eq!(state.entities.len(), 1);
        assert_eq!(state.entities[0].kind, EntityKind::Coin);
    }

    #[test]
    fn test_frame_waits_for_assets() {
        let mut state = running(1);
        let step = frame(&mut state, &TickInput::default(), 10_000.0, false);
        assert_eq!(step.control, LoopControl::Continue);
        assert_eq!(state.player.pos.y, PLAYER_START_Y);
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_frame_stops_after_game_over() {
        let mut state = grounded(1);
        state
            .entities
            .push(SimEntity::new(EntityKind::Obstacle, Vec2::new(60.0, 120.0)));
        let step = frame(&mut state, &TickInput::default(), 0.0, true);
        assert_eq!(step.control, LoopControl::Stop);

        let mut state = running(1);
        let step = frame(&mut state, &TickInput::default(), 0.0, true);
        assert_eq!(step.control, LoopControl::Continue);
    }
}
