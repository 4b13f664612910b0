//! Draw list for one runner frame
//!
//! Building the list is pure so it can be tested without a canvas; the
//! wasm executor in `canvas` replays it onto a `CanvasRenderingContext2d`.

use glam::Vec2;

use crate::consts::*;
use crate::runner::{EntityKind, RunnerPhase, RunnerState};

pub const SKY_COLOR: &str = "#87CEEB";
pub const GROUND_COLOR: &str = "#8B4513";
pub const GROUND_HEIGHT: f32 = 20.0;
pub const PLAYER_COLOR: &str = "red";
pub const COIN_COLOR: &str = "gold";
pub const STAR_COLOR: &str = "yellow";
pub const OBSTACLE_COLOR: &str = "green";
pub const TEXT_COLOR: &str = "white";
pub const OVERLAY_COLOR: &str = "rgba(0, 0, 0, 0.7)";
pub const SCORE_FONT: &str = "16px 'Courier New'";
pub const GAME_OVER_FONT: &str = "20px 'Courier New'";

/// Sprite images used by the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Background,
    Player,
    Coin,
    Star,
    Obstacle,
}

impl Sprite {
    pub const ALL: [Sprite; 5] = [
        Sprite::Background,
        Sprite::Player,
        Sprite::Coin,
        Sprite::Star,
        Sprite::Obstacle,
    ];

    pub fn for_entity(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Coin => Sprite::Coin,
            EntityKind::Star => Sprite::Star,
            EntityKind::Obstacle => Sprite::Obstacle,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Sprite::Background => "background",
            Sprite::Player => "player",
            Sprite::Coin => "coin",
            Sprite::Star => "star",
            Sprite::Obstacle => "obstacle",
        }
    }

    /// Image URL
    pub fn url(&self) -> &'static str {
        match self {
            Sprite::Background => "/placeholder.svg?height=150&width=300&text=Game+Background",
            Sprite::Player => "/placeholder.svg?height=30&width=30&text=Player",
            Sprite::Coin => "/placeholder.svg?height=20&width=20&text=Coin",
            Sprite::Star => "/placeholder.svg?height=20&width=20&text=Star",
            Sprite::Obstacle => "/placeholder.svg?height=30&width=30&text=Obstacle",
        }
    }

    /// Flat-color stand-in for the sprite covering `pos`/`size`
    pub fn fallback(&self, pos: Vec2, size: Vec2) -> Vec<DrawCommand> {
        match self {
            Sprite::Background => vec![
                DrawCommand::FillRect {
                    color: SKY_COLOR,
                    pos,
                    size,
                },
                DrawCommand::FillRect {
                    color: GROUND_COLOR,
                    pos: Vec2::new(pos.x, pos.y + size.y - GROUND_HEIGHT),
                    size: Vec2::new(size.x, GROUND_HEIGHT),
                },
            ],
            Sprite::Coin => vec![DrawCommand::FillCircle {
                color: COIN_COLOR,
                center: pos + size / 2.0,
                radius: size.x / 2.0,
            }],
            Sprite::Player | Sprite::Star | Sprite::Obstacle => {
                let color = match self {
                    Sprite::Player => PLAYER_COLOR,
                    Sprite::Star => STAR_COLOR,
                    _ => OBSTACLE_COLOR,
                };
                vec![DrawCommand::FillRect { color, pos, size }]
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

/// One canvas operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Draw a loaded sprite; the executor falls back to `Sprite::fallback`
    /// if the draw call fails
    Image { sprite: Sprite, pos: Vec2, size: Vec2 },
    FillRect {
        color: &'static str,
        pos: Vec2,
        size: Vec2,
    },
    FillCircle {
        color: &'static str,
        center: Vec2,
        radius: f32,
    },
    Text {
        text: String,
        pos: Vec2,
        font: &'static str,
        color: &'static str,
        align: TextAlign,
    },
}

fn sprite_or_fallback(
    out: &mut Vec<DrawCommand>,
    sprite: Sprite,
    pos: Vec2,
    size: Vec2,
    is_ready: &impl Fn(Sprite) -> bool,
) {
    if is_ready(sprite) {
        out.push(DrawCommand::Image { sprite, pos, size });
    } else {
        out.extend(sprite.fallback(pos, size));
    }
}

/// Build the draw list for the current runner state
///
/// `is_ready` reports which sprites finished loading; the rest are drawn
/// with their flat-color fallback.
pub fn build_frame(state: &RunnerState, is_ready: impl Fn(Sprite) -> bool) -> Vec<DrawCommand> {
    let mut out = Vec::new();
    let canvas = Vec2::new(GAME_WIDTH, GAME_HEIGHT);

    sprite_or_fallback(&mut out, Sprite::Background, Vec2::ZERO, canvas, &is_ready);
    sprite_or_fallback(
        &mut out,
        Sprite::Player,
        state.player.pos,
        Vec2::splat(PLAYER_SIZE),
        &is_ready,
    );
    for entity in state.active_entities() {
        sprite_or_fallback(
            &mut out,
            Sprite::for_entity(entity.kind),
            entity.pos,
            entity.size,
            &is_ready,
        );
    }

    out.push(DrawCommand::Text {
        text: format!("Score: {}", state.score),
        pos: Vec2::new(10.0, 20.0),
        font: SCORE_FONT,
        color: TEXT_COLOR,
        align: TextAlign::Left,
    });

    if state.phase == RunnerPhase::GameOver {
        let mid = canvas / 2.0;
        out.push(DrawCommand::FillRect {
            color: OVERLAY_COLOR,
            pos: Vec2::ZERO,
            size: canvas,
        });
        out.push(DrawCommand::Text {
            text: "GAME OVER".to_string(),
            pos: Vec2::new(mid.x, mid.y - 10.0),
            font: GAME_OVER_FONT,
            color: TEXT_COLOR,
            align: TextAlign::Center,
        });
        out.push(DrawCommand::Text {
            text: format!("Score: {}", state.score),
            pos: Vec2::new(mid.x, mid.y + 20.0),
            font: GAME_OVER_FONT,
            color: TEXT_COLOR,
            align: TextAlign::Center,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::SimEntity;

    fn texts(commands: &[DrawCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_all_ready_uses_images() {
        let mut state = RunnerState::new(1);
        state.start(0.0);
        state
            .entities
            .push(SimEntity::new(EntityKind::Coin, Vec2::new(100.0, 40.0)));
        let commands = build_frame(&state, |_| true);

        assert_eq!(
            commands[0],
            DrawCommand::Image {
                sprite: Sprite::Background,
                pos: Vec2::ZERO,
                size: Vec2::new(300.0, 150.0),
            }
        );
        assert_eq!(
            commands[1],
            DrawCommand::Image {
                sprite: Sprite::Player,
                pos: Vec2::new(50.0, 75.0),
                size: Vec2::splat(30.0),
            }
        );
        assert!(matches!(
            commands[2],
            DrawCommand::Image {
                sprite: Sprite::Coin,
                ..
            }
        ));
        assert_eq!(texts(&commands), vec!["Score: 0"]);
    }

    #[test]
    fn test_fallback_background_has_ground_strip() {
        let state = RunnerState::new(1);
        let commands = build_frame(&state, |_| false);
        assert_eq!(
            commands[0],
            DrawCommand::FillRect {
                color: SKY_COLOR,
                pos: Vec2::ZERO,
                size: Vec2::new(300.0, 150.0),
            }
        );
        assert_eq!(
            commands[1],
            DrawCommand::FillRect {
                color: GROUND_COLOR,
                pos: Vec2::new(0.0, 130.0),
                size: Vec2::new(300.0, 20.0),
            }
        );
        assert_eq!(
            commands[2],
            DrawCommand::FillRect {
                color: PLAYER_COLOR,
                pos: Vec2::new(50.0, 75.0),
                size: Vec2::splat(30.0),
            }
        );
    }

    #[test]
    fn test_entity_fallbacks() {
        let mut state = RunnerState::new(1);
        state.start(0.0);
        state
            .entities
            .push(SimEntity::new(EntityKind::Coin, Vec2::new(100.0, 40.0)));
        state
            .entities
            .push(SimEntity::new(EntityKind::Star, Vec2::new(150.0, 40.0)));
        state
            .entities
            .push(SimEntity::new(EntityKind::Obstacle, Vec2::new(200.0, 40.0)));
        // Only the background loaded
        let commands = build_frame(&state, |s| s == Sprite::Background);

        assert_eq!(
            commands[2],
            DrawCommand::FillCircle {
                color: COIN_COLOR,
                center: Vec2::new(110.0, 50.0),
                radius: 10.0,
            }
        );
        assert!(matches!(
            commands[3],
            DrawCommand::FillRect {
                color: STAR_COLOR,
                ..
            }
        ));
        assert!(matches!(
            commands[4],
            DrawCommand::FillRect {
                color: OBSTACLE_COLOR,
                ..
            }
        ));
    }

    #[test]
    fn test_inactive_entities_not_drawn() {
        let mut state = RunnerState::new(1);
        let mut coin = SimEntity::new(EntityKind::Coin, Vec2::new(100.0, 40.0));
        coin.active = false;
        state.entities.push(coin);
        let commands = build_frame(&state, |_| true);
        // background, player, score
        assert_eq!(commands.len(), 3);
    }

    #[test]
    fn test_game_over_overlay() {
        let mut state = RunnerState::new(1);
        state.start(0.0);
        state.score = 120;
        state.phase = RunnerPhase::GameOver;
        let commands = build_frame(&state, |_| true);

        assert!(commands.contains(&DrawCommand::FillRect {
            color: OVERLAY_COLOR,
            pos: Vec2::ZERO,
            size: Vec2::new(300.0, 150.0),
        }));
        assert_eq!(texts(&commands), vec!["Score: 120", "GAME OVER", "Score: 120"]);
        match commands.last() {
            Some(DrawCommand::Text { pos, align, .. }) => {
                assert_eq!(*pos, Vec2::new(150.0, 95.0));
                assert_eq!(*align, TextAlign::Center);
            }
            other => panic!("unexpected last command: {:?}", other),
        }
    }
}
