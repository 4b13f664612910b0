// Side-scroller sessions driven frame by frame.

use birthday_arcade::consts::*;
use birthday_arcade::renderer::{DrawCommand, Sprite, build_frame};
use birthday_arcade::runner::{
    EntityKind, PlayerBody, RunnerEvent, RunnerPhase, RunnerState, SimEntity, TickInput, frame,
    tick,
};
use birthday_arcade::schedule::LoopControl;
use glam::Vec2;

const FRAME_MS: f64 = 1000.0 / 60.0;

/// Run until the loop asks to stop or `max_frames` pass
fn play(
    state: &mut RunnerState,
    max_frames: usize,
    jump: impl Fn(&RunnerState) -> bool,
) -> Vec<RunnerEvent> {
    let mut events = Vec::new();
    let mut now = 0.0;
    for _ in 0..max_frames {
        now += FRAME_MS;
        let input = TickInput { jump: jump(state) };
        let step = frame(state, &input, now, true);
        events.extend(step.events);
        if step.control == LoopControl::Stop {
            break;
        }
    }
    events
}

#[test]
fn same_seed_same_run() {
    let mut a = RunnerState::new(99);
    let mut b = RunnerState::new(99);
    a.start(0.0);
    b.start(0.0);
    let ea = play(&mut a, 3_000, |s| s.player.is_grounded());
    let eb = play(&mut b, 3_000, |s| s.player.is_grounded());
    assert_eq!(ea, eb);
    assert_eq!(a.score, b.score);
    assert_eq!(a.phase, b.phase);
}

#[test]
fn score_only_from_collections() {
    let mut state = RunnerState::new(5);
    state.start(0.0);
    let events = play(&mut state, 5_000, |_| false);
    let collected: u64 = events
        .iter()
        .filter_map(|e| match e {
            RunnerEvent::Collected { points, .. } => Some(*points),
            _ => None,
        })
        .sum();
    assert_eq!(state.score, collected);
    assert!(state.entities.iter().all(|e| e.pos.x >= -e.size.x));
}

#[test]
fn game_over_freezes_until_restart() {
    let mut state = RunnerState::new(1);
    state.start(0.0);
    state.player.pos.y = PlayerBody::FLOOR_Y;
    state.score = 70;
    state.entities.push(SimEntity::new(
        EntityKind::Obstacle,
        Vec2::new(PLAYER_START_X + 5.0, PlayerBody::FLOOR_Y),
    ));

    let step = frame(&mut state, &TickInput::default(), 10.0, true);
    assert_eq!(step.control, LoopControl::Stop);
    assert_eq!(step.events, vec![RunnerEvent::GameOver { score: 70 }]);
    assert_eq!(state.phase, RunnerPhase::GameOver);

    let entities = state.entities.clone();
    for i in 0..200 {
        let events = tick(&mut state, &TickInput { jump: true }, 10_000.0 + i as f64 * 1_000.0);
        assert!(events.is_empty());
    }
    assert_eq!(state.score, 70);
    assert_eq!(state.entities, entities);

    let commands = build_frame(&state, |_| true);
    assert!(
        commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Text { text, .. } if text == "GAME OVER"))
    );

    state.start(500_000.0);
    assert!(state.is_running());
    assert_eq!(state.score, 0);
    assert!(state.entities.is_empty());
}

#[test]
fn pending_assets_hold_the_run() {
    let mut state = RunnerState::new(3);
    state.start(0.0);
    for i in 0..100 {
        let step = frame(&mut state, &TickInput { jump: true }, i as f64 * 100.0, false);
        assert_eq!(step.control, LoopControl::Continue);
        assert!(step.events.is_empty());
    }
    assert_eq!(state.player, PlayerBody::default());
    assert!(state.entities.is_empty());
}

#[test]
fn missing_sprites_draw_fallbacks() {
    let mut state = RunnerState::new(3);
    state.start(0.0);
    let commands = build_frame(&state, |_| false);
    assert!(!commands.iter().any(|c| matches!(c, DrawCommand::Image { .. })));

    let commands = build_frame(&state, |s| s != Sprite::Player);
    assert!(commands.iter().any(|c| matches!(c, DrawCommand::FillRect { color: "red", .. })));
}

#[test]
fn jumping_clears_the_floor() {
    let mut state = RunnerState::new(8);
    state.start(0.0);
    state.player.pos.y = PlayerBody::FLOOR_Y;

    let events = tick(&mut state, &TickInput { jump: true }, 0.0);
    assert_eq!(events, vec![RunnerEvent::Jumped]);

    let mut highest = state.player.pos.y;
    for _ in 0..40 {
        tick(&mut state, &TickInput { jump: true }, 0.0);
        highest = highest.min(state.player.pos.y);
    }
    // Apex of a -10 jump under 0.5 gravity is about 100 px up
    assert!(highest < PlayerBody::FLOOR_Y - 80.0);
    assert!(highest >= 0.0);
    assert!(state.player.is_grounded());
}
