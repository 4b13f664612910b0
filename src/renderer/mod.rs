//! Runner rendering
//!
//! `frame` turns runner state into a list of draw commands, choosing a
//! flat-color fallback for any sprite that is not loaded. On wasm the
//! `canvas` executor replays the list onto a 2D context.

pub mod frame;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use frame::{DrawCommand, Sprite, TextAlign, build_frame};

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasRenderer, SpriteSheet, load_sprites};
